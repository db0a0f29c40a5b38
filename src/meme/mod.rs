//! The meme banner renderer.
//!
//! A meme is drawn onto a fixed 800x300 canvas: a six-wedge sunburst, a big emoji in the middle,
//! the "YOU SPENT ..." caption on top, a roast line at the bottom and eight small decorations on an
//! ellipse around the centre. Every random choice is drawn from the caller's `Rng`, always in the
//! same order (emoji, roast, then the eight decorations), so a seeded generator gives
//! byte-identical output.

mod canvas;
mod face;
mod pictograms;

pub use canvas::{RasterSurfaces, SurfaceSource};
pub use face::{BitmapFace, Face, OutlineFace, TextShape};

use crate::model::Transaction;
use base64::Engine;
use canvas::{segment_angle, Canvas, TextStyle};
use rand::Rng;
use serde::Serialize;
use std::f32::consts::TAU;
use thiserror::Error;
use tiny_skia::Color;
use tracing::{debug, error};

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 300;

const CENTER_X: f32 = 400.0;
const CENTER_Y: f32 = 150.0;
/// Comfortably past the canvas diagonal so the wedges cover every corner.
const SUNBURST_RADIUS: f32 = 1800.0;
const SUNBURST_SEGMENTS: usize = 6;
const DECORATION_COUNT: usize = 8;
const DECORATION_RX: f32 = 300.0;
const DECORATION_RY: f32 = 150.0;

const LIGHT_GOLD: (u8, u8, u8) = (0xef, 0xec, 0xdf);
const LIGHT_ORANGE: (u8, u8, u8) = (0xf6, 0xd3, 0x9d);

pub const EMOJIS: [&str; 9] = ["😊", "🤣", "💸", "😭", "🔥", "🤑", "🤯", "🫣", "🎭"];

pub const ROASTS: [&str; 4] = [
    "YOUR WALLET JUST CRIED",
    "EMERGENCY FUND LEFT THE CHAT",
    "FINANCIAL ADVISOR IS LOOKING FOR YOU",
    "SAVINGS ACCOUNT IS DEPRESSED RN",
];

pub const DECORATIONS: [&str; 8] = ["✨", "💥", "🎯", "📈", "📉", "💎", "👑", "💸"];

pub const MIME_TYPE: &str = "image/png";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Unable to acquire a {width}x{height} drawing surface")]
    Surface { width: u32, height: u32 },

    #[error("Drawing failed: {0}")]
    Draw(String),

    #[error("Unable to encode the image: {0}")]
    Encode(String),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// The text chosen for one meme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemeContent {
    pub caption: String,
    pub emoji: &'static str,
    pub roast: &'static str,
    /// One decoration per position around the ellipse, starting at 3 o'clock and going clockwise.
    pub decorations: Vec<&'static str>,
}

impl MemeContent {
    /// Picks the random parts of a meme for `transaction`.
    pub fn choose<R: Rng>(transaction: &Transaction, currency_symbol: &str, rng: &mut R) -> Self {
        let emoji = pick(rng, &EMOJIS);
        let roast = pick(rng, &ROASTS);
        let decorations = (0..DECORATION_COUNT)
            .map(|_| pick(rng, &DECORATIONS))
            .collect();
        Self {
            caption: caption(transaction, currency_symbol),
            emoji,
            roast,
            decorations,
        }
    }
}

fn pick<R: Rng>(rng: &mut R, palette: &[&'static str]) -> &'static str {
    palette[rng.gen_range(0..palette.len())]
}

/// `YOU SPENT <symbol><amount> ON <merchant>`
pub fn caption(transaction: &Transaction, currency_symbol: &str) -> String {
    format!(
        "YOU SPENT {} ON {}",
        transaction.amount().with_symbol(currency_symbol),
        transaction.merchant()
    )
}

/// An encoded meme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemeImage {
    png: Vec<u8>,
    width: u32,
    height: u32,
    content: MemeContent,
}

impl MemeImage {
    pub(crate) fn new(png: Vec<u8>, width: u32, height: u32, content: MemeContent) -> Self {
        Self {
            png,
            width,
            height,
            content,
        }
    }

    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn content(&self) -> &MemeContent {
        &self.content
    }

    pub fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }

    /// The image as a `data:image/png;base64,...` URI.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{MIME_TYPE};base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.png)
        )
    }
}

/// Draws memes. The renderer holds no per-meme state and can be reused for any number of renders.
#[derive(Debug)]
pub struct MemeRenderer {
    face: Box<dyn Face>,
    surfaces: Box<dyn SurfaceSource>,
    currency_symbol: String,
}

impl Default for MemeRenderer {
    fn default() -> Self {
        Self::new(Box::new(BitmapFace))
    }
}

impl MemeRenderer {
    pub fn new(face: Box<dyn Face>) -> Self {
        Self {
            face,
            surfaces: Box::new(RasterSurfaces),
            currency_symbol: "₹".to_string(),
        }
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn with_surfaces(mut self, surfaces: Box<dyn SurfaceSource>) -> Self {
        self.surfaces = surfaces;
        self
    }

    pub fn face(&self) -> &dyn Face {
        self.face.as_ref()
    }

    /// Renders a meme about `transaction`.
    ///
    /// # Errors
    /// Returns a `RenderError` if the surface cannot be acquired, a drawing step fails or the
    /// image cannot be encoded. No partial image is ever returned.
    pub fn render<R: Rng>(
        &self,
        transaction: &Transaction,
        rng: &mut R,
    ) -> RenderResult<MemeImage> {
        let content = MemeContent::choose(transaction, &self.currency_symbol, rng);
        match self.draw(content) {
            Ok(image) => {
                debug!(
                    "Rendered a {}x{} meme for transaction {} ({} bytes)",
                    image.width(),
                    image.height(),
                    transaction.id(),
                    image.png().len()
                );
                Ok(image)
            }
            Err(e) => {
                error!("Error generating meme: {e}");
                Err(e)
            }
        }
    }

    fn draw(&self, content: MemeContent) -> RenderResult<MemeImage> {
        let mut canvas = Canvas::new(self.surfaces.as_ref(), WIDTH, HEIGHT)?;
        let face = self.face.as_ref();

        canvas.fill(Color::WHITE);

        for i in 0..SUNBURST_SEGMENTS {
            let (r, g, b) = if i % 2 == 0 { LIGHT_GOLD } else { LIGHT_ORANGE };
            canvas.fill_wedge(
                CENTER_X,
                CENTER_Y,
                SUNBURST_RADIUS,
                segment_angle(i, SUNBURST_SEGMENTS),
                segment_angle(i + 1, SUNBURST_SEGMENTS),
                Color::from_rgba8(r, g, b, 0xff),
            )?;
        }

        let emoji = TextStyle {
            size: 102.0,
            fill: Color::BLACK,
            stroke: None,
        };
        canvas.text(face, content.emoji, emoji, CENTER_X, CENTER_Y + 30.0)?;

        let headline = TextStyle {
            size: 32.0,
            fill: Color::BLACK,
            stroke: Some((Color::WHITE, 2.0)),
        };
        canvas.text(face, &content.caption, headline, CENTER_X, 50.0)?;
        canvas.text(face, content.roast, headline, CENTER_X, 250.0)?;

        let small = TextStyle {
            size: 22.0,
            fill: Color::BLACK,
            stroke: None,
        };
        for (i, decoration) in content.decorations.iter().enumerate() {
            let angle = TAU * i as f32 / DECORATION_COUNT as f32;
            let x = CENTER_X + angle.cos() * DECORATION_RX;
            let y = CENTER_Y + angle.sin() * DECORATION_RY;
            canvas.text(face, decoration, small, x, y)?;
        }

        canvas.encode(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MockTransactions, TransactionSource};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::{HashMap, HashSet};
    use std::ops::Range;
    use tiny_skia::Pixmap;

    #[derive(Debug)]
    struct Broken;

    impl SurfaceSource for Broken {
        fn acquire(&self, _: u32, _: u32) -> Option<Pixmap> {
            None
        }
    }

    fn latest() -> Transaction {
        MockTransactions.latest().unwrap()
    }

    fn content(seed: u64) -> MemeContent {
        MemeContent::choose(&latest(), "₹", &mut ChaCha8Rng::seed_from_u64(seed))
    }

    fn pixels(seed: u64) -> Pixmap {
        let image = MemeRenderer::default()
            .render(&latest(), &mut ChaCha8Rng::seed_from_u64(seed))
            .unwrap();
        Pixmap::decode_png(image.png()).unwrap()
    }

    /// The RGB values of every pixel in the box, row by row.
    fn region(pixmap: &Pixmap, xs: Range<u32>, ys: Range<u32>) -> Vec<u8> {
        let mut out = Vec::new();
        for y in ys {
            for x in xs.clone() {
                let p = pixmap.pixel(x, y).unwrap();
                out.extend([p.red(), p.green(), p.blue()]);
            }
        }
        out
    }

    /// The number of near-black pixels in the box. The background never gets this dark.
    fn ink(pixmap: &Pixmap, xs: Range<u32>, ys: Range<u32>) -> usize {
        region(pixmap, xs, ys)
            .chunks(3)
            .filter(|rgb| rgb.iter().all(|&c| c < 96))
            .count()
    }

    /// The box around decoration `i`, which is 22px wide with its baseline on the ellipse.
    fn decoration_box(i: usize) -> (Range<u32>, Range<u32>) {
        let angle = TAU * i as f32 / DECORATION_COUNT as f32;
        let x = (CENTER_X + angle.cos() * DECORATION_RX).round() as u32;
        let y = (CENTER_Y + angle.sin() * DECORATION_RY).round() as u32;
        (x - 12..x + 12, y - 21..y + 4)
    }

    #[test]
    fn test_caption() {
        assert_eq!(caption(&latest(), "₹"), "YOU SPENT ₹450 ON Zomato");
        assert_eq!(caption(&latest(), "Rs."), "YOU SPENT Rs.450 ON Zomato");
    }

    #[test]
    fn test_content_is_seeded() {
        let a = MemeContent::choose(&latest(), "₹", &mut ChaCha8Rng::seed_from_u64(7));
        let b = MemeContent::choose(&latest(), "₹", &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
        assert_eq!(a.decorations.len(), 8);
        assert!(EMOJIS.contains(&a.emoji));
        assert!(ROASTS.contains(&a.roast));
        assert!(a.decorations.iter().all(|d| DECORATIONS.contains(d)));
    }

    #[test]
    fn test_content_varies_with_seed() {
        let picks: std::collections::HashSet<Vec<&str>> = (0..32)
            .map(|seed| {
                MemeContent::choose(&latest(), "₹", &mut ChaCha8Rng::seed_from_u64(seed))
                    .decorations
            })
            .collect();
        assert!(picks.len() > 1);
    }

    #[test]
    fn test_render_dimensions() {
        let renderer = MemeRenderer::default();
        let image = renderer
            .render(&latest(), &mut ChaCha8Rng::seed_from_u64(1))
            .unwrap();
        assert_eq!(image.width(), WIDTH);
        assert_eq!(image.height(), HEIGHT);
        let decoded = Pixmap::decode_png(image.png()).unwrap();
        assert_eq!(decoded.width(), 800);
        assert_eq!(decoded.height(), 300);
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = MemeRenderer::default();
        let a = renderer
            .render(&latest(), &mut ChaCha8Rng::seed_from_u64(42))
            .unwrap();
        let b = renderer
            .render(&latest(), &mut ChaCha8Rng::seed_from_u64(42))
            .unwrap();
        assert_eq!(a.png(), b.png());
        assert_eq!(a.to_data_uri(), b.to_data_uri());
    }

    #[test]
    fn test_sunburst_colors() {
        let image = MemeRenderer::default()
            .render(&latest(), &mut ChaCha8Rng::seed_from_u64(3))
            .unwrap();
        let pixmap = Pixmap::decode_png(image.png()).unwrap();
        let rgb = |x, y| {
            let p = pixmap.pixel(x, y).unwrap();
            (p.red(), p.green(), p.blue())
        };
        // Wedge 0 spans 0..60 degrees below and right of centre, wedge 5 the mirror above it.
        assert_eq!(rgb(795, 160), LIGHT_GOLD);
        assert_eq!(rgb(795, 140), LIGHT_ORANGE);
        // The corners are covered by the sunburst too.
        assert_eq!(rgb(0, 0), LIGHT_ORANGE);
        assert_eq!(rgb(0, 299), LIGHT_GOLD);
    }

    #[test]
    fn test_emoji_pick_is_visible() {
        let mut seeds: HashMap<&str, u64> = HashMap::new();
        for seed in 0..1000 {
            seeds.entry(content(seed).emoji).or_insert(seed);
        }
        assert_eq!(seeds.len(), EMOJIS.len());

        // The emoji is 102px wide, centred on x=400 with its baseline at y=180.
        let bands: HashSet<Vec<u8>> = seeds
            .values()
            .map(|&seed| region(&pixels(seed), 340..460, 88..195))
            .collect();
        assert_eq!(bands.len(), EMOJIS.len());
    }

    #[test]
    fn test_decorations_sit_on_the_ellipse() {
        let pixmap = pixels(5);
        // Left and right ends of the ellipse; the others overlap the caption or leave the canvas.
        for i in [0, 4] {
            let (xs, ys) = decoration_box(i);
            assert!(ink(&pixmap, xs, ys) > 0, "decoration {i}");
        }
        assert_eq!(decoration_box(0), (688..712, 129..154));
        assert_eq!(decoration_box(4), (88..112, 129..154));
        // Between the decorations and the emoji there is only background.
        assert_eq!(ink(&pixmap, 238..262, 129..154), 0);
        assert_eq!(ink(&pixmap, 538..562, 129..154), 0);
    }

    #[test]
    fn test_decorations_follow_pick_order() {
        // Two seeds agreeing on the first decoration but not on the fifth.
        let (a, b) = (0..1000u64)
            .flat_map(|a| (a + 1..1000).map(move |b| (a, b)))
            .find(|&(a, b)| {
                let (ca, cb) = (content(a), content(b));
                ca.decorations[0] == cb.decorations[0] && ca.decorations[4] != cb.decorations[4]
            })
            .unwrap();
        let (pa, pb) = (pixels(a), pixels(b));
        let (xs0, ys0) = decoration_box(0);
        let (xs4, ys4) = decoration_box(4);
        assert_eq!(
            region(&pa, xs0.clone(), ys0.clone()),
            region(&pb, xs0, ys0)
        );
        assert_ne!(
            region(&pa, xs4.clone(), ys4.clone()),
            region(&pb, xs4, ys4)
        );
    }

    #[test]
    fn test_caption_and_roast_rows() {
        let pixmap = pixels(11);
        // Caption baseline at y=50, roast baseline at y=250.
        assert!(ink(&pixmap, 300..500, 24..50) > 0);
        assert!(ink(&pixmap, 300..500, 225..250) > 0);
        // Clear bands between the caption and the emoji, and the emoji and the roast.
        assert_eq!(ink(&pixmap, 0..WIDTH, 58..86), 0);
        assert_eq!(ink(&pixmap, 0..WIDTH, 196..218), 0);
    }

    #[test]
    fn test_surface_failure() {
        let renderer = MemeRenderer::default().with_surfaces(Box::new(Broken));
        let result = renderer.render(&latest(), &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(
            result,
            Err(RenderError::Surface {
                width: 800,
                height: 300
            })
        );
    }

    #[test]
    fn test_data_uri() {
        let image = MemeRenderer::default()
            .render(&latest(), &mut ChaCha8Rng::seed_from_u64(9))
            .unwrap();
        let uri = image.to_data_uri();
        assert!(uri.starts_with("data:image/png;base64,iVBORw0KGgo"));
        assert_eq!(image.mime_type(), "image/png");
    }
}
