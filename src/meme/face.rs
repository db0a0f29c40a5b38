//! Typefaces used to turn text into paths.
//!
//! `BitmapFace` is always available and scales the classic 8x8 console font (Latin, Greek and a
//! few symbols) plus a small set of pictograms covering the meme palettes and the rupee sign.
//! `OutlineFace` draws the outlines of a TrueType or OpenType file, given a font that has
//! monochrome outlines for the glyphs it is asked for. Glyphs a face does not have are drawn as a
//! hollow box.

use crate::meme::pictograms::pictogram;
use crate::meme::{RenderError, RenderResult};
use crate::Result;
use ab_glyph::{Font, FontVec, GlyphId, OutlineCurve, PxScale, ScaleFont};
use anyhow::{anyhow, Context};
use font8x8::{UnicodeFonts, BASIC_FONTS, GREEK_FONTS, LATIN_FONTS, MISC_FONTS};
use std::fmt::{Debug, Formatter};
use std::path::Path;
use tiny_skia::{Path as SkPath, PathBuilder, Rect};

/// The shapes making up a run of text.
#[derive(Debug, Clone, Default)]
pub struct TextShape {
    /// Filled to draw the glyphs.
    pub fill: Option<SkPath>,
    /// Stroked to outline the glyphs.
    pub edge: Option<SkPath>,
}

/// A source of glyph shapes.
pub trait Face: Debug + Send + Sync {
    fn name(&self) -> &str;

    /// The advance width of `text` set at `size` pixels.
    fn measure(&self, text: &str, size: f32) -> f32;

    /// Shapes `text` set at `size` pixels, with its left edge at `x` and its baseline at `y`.
    fn shape(
        &self,
        text: &str,
        size: f32,
        x: f32,
        y: f32,
    ) -> RenderResult<TextShape>;
}

/// Variation selectors and joiners take up no space and are not drawn.
fn is_invisible(c: char) -> bool {
    matches!(c, '\u{200D}' | '\u{FE00}'..='\u{FE0F}')
}

/// A hollow box drawn for missing glyphs.
const REPLACEMENT: [u8; 8] = [0x00, 0x7E, 0x42, 0x42, 0x42, 0x42, 0x7E, 0x00];

/// The 8x8 bitmap font and pictograms scaled up to the requested size, one cell per font pixel.
#[derive(Debug, Default, Clone, Copy)]
pub struct BitmapFace;

impl BitmapFace {
    fn bitmap(c: char) -> [u8; 8] {
        pictogram(c)
            .or_else(|| BASIC_FONTS.get(c))
            .or_else(|| LATIN_FONTS.get(c))
            .or_else(|| GREEK_FONTS.get(c))
            .or_else(|| MISC_FONTS.get(c))
            .unwrap_or(REPLACEMENT)
    }
}

fn is_set(bitmap: &[u8; 8], row: i32, col: i32) -> bool {
    if !(0..8).contains(&row) || !(0..8).contains(&col) {
        return false;
    }
    bitmap[row as usize] & (1 << col) != 0
}

impl Face for BitmapFace {
    fn name(&self) -> &str {
        "font8x8"
    }

    fn measure(&self, text: &str, size: f32) -> f32 {
        text.chars().filter(|c| !is_invisible(*c)).count() as f32 * size
    }

    fn shape(
        &self,
        text: &str,
        size: f32,
        x: f32,
        y: f32,
    ) -> RenderResult<TextShape> {
        let cell = size / 8.0;
        // Rows 0..7 sit above the baseline, row 7 holds descenders.
        let top = y - 7.0 * cell;
        let mut fill = PathBuilder::new();
        let mut edge = PathBuilder::new();
        let mut caret = x;

        for c in text.chars().filter(|c| !is_invisible(*c)) {
            let bitmap = Self::bitmap(c);
            for row in 0..8 {
                let cy = top + row as f32 * cell;
                let mut col = 0;
                while col < 8 {
                    if !is_set(&bitmap, row, col) {
                        col += 1;
                        continue;
                    }
                    let start = col;
                    while is_set(&bitmap, row, col) {
                        col += 1;
                    }
                    let run = Rect::from_xywh(
                        caret + start as f32 * cell,
                        cy,
                        (col - start) as f32 * cell,
                        cell,
                    )
                    .ok_or_else(|| RenderError::Draw(format!("bad glyph cell for {c:?}")))?;
                    fill.push_rect(run);
                }

                for col in 0..8 {
                    if !is_set(&bitmap, row, col) {
                        continue;
                    }
                    let left = caret + col as f32 * cell;
                    let right = left + cell;
                    let bottom = cy + cell;
                    if !is_set(&bitmap, row - 1, col) {
                        edge.move_to(left, cy);
                        edge.line_to(right, cy);
                    }
                    if !is_set(&bitmap, row + 1, col) {
                        edge.move_to(left, bottom);
                        edge.line_to(right, bottom);
                    }
                    if !is_set(&bitmap, row, col - 1) {
                        edge.move_to(left, cy);
                        edge.line_to(left, bottom);
                    }
                    if !is_set(&bitmap, row, col + 1) {
                        edge.move_to(right, cy);
                        edge.line_to(right, bottom);
                    }
                }
            }
            caret += size;
        }

        Ok(TextShape {
            fill: fill.finish(),
            edge: edge.finish(),
        })
    }
}

/// A face backed by the outlines in a font file.
pub struct OutlineFace {
    name: String,
    font: FontVec,
}

impl Debug for OutlineFace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFace")
            .field("name", &self.name)
            .finish()
    }
}

impl OutlineFace {
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let font = FontVec::try_from_vec(bytes)
            .map_err(|e| anyhow!("Unable to parse font '{name}': {e}"))?;
        Ok(Self { name, font })
    }

    /// Reads and parses the font file at `path`.
    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Unable to read font file {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_bytes(name, bytes)
    }
}

impl Face for OutlineFace {
    fn name(&self) -> &str {
        &self.name
    }

    fn measure(&self, text: &str, size: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(size));
        let mut width = 0.0;
        let mut prev: Option<GlyphId> = None;
        for c in text.chars().filter(|c| !is_invisible(*c)) {
            let id = scaled.glyph_id(c);
            if let Some(prev) = prev {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }
        width
    }

    fn shape(
        &self,
        text: &str,
        size: f32,
        x: f32,
        y: f32,
    ) -> RenderResult<TextShape> {
        let scaled = self.font.as_scaled(PxScale::from(size));
        let hs = scaled.h_scale_factor();
        let vs = scaled.v_scale_factor();
        let mut pb = PathBuilder::new();
        let mut caret = x;
        let mut prev: Option<GlyphId> = None;

        for c in text.chars().filter(|c| !is_invisible(*c)) {
            let id = scaled.glyph_id(c);
            if let Some(prev) = prev {
                caret += scaled.kern(prev, id);
            }
            prev = Some(id);

            match self.font.outline(id).filter(|_| id != GlyphId(0)) {
                Some(outline) => {
                    // Font units are y-up; the canvas is y-down.
                    let map = |p: ab_glyph::Point| (caret + p.x * hs, y - p.y * vs);
                    let mut last: Option<ab_glyph::Point> = None;
                    for curve in &outline.curves {
                        let (start, end) = match curve {
                            OutlineCurve::Line(a, b) => (*a, *b),
                            OutlineCurve::Quad(a, _, b) => (*a, *b),
                            OutlineCurve::Cubic(a, _, _, b) => (*a, *b),
                        };
                        if last != Some(start) {
                            if last.is_some() {
                                pb.close();
                            }
                            let (sx, sy) = map(start);
                            pb.move_to(sx, sy);
                        }
                        match curve {
                            OutlineCurve::Line(_, b) => {
                                let (bx, by) = map(*b);
                                pb.line_to(bx, by);
                            }
                            OutlineCurve::Quad(_, c1, b) => {
                                let (c1x, c1y) = map(*c1);
                                let (bx, by) = map(*b);
                                pb.quad_to(c1x, c1y, bx, by);
                            }
                            OutlineCurve::Cubic(_, c1, c2, b) => {
                                let (c1x, c1y) = map(*c1);
                                let (c2x, c2y) = map(*c2);
                                let (bx, by) = map(*b);
                                pb.cubic_to(c1x, c1y, c2x, c2y, bx, by);
                            }
                        }
                        last = Some(end);
                    }
                    if last.is_some() {
                        pb.close();
                    }
                }
                None => push_replacement(&mut pb, caret, y, size)?,
            }
            caret += scaled.h_advance(id);
        }

        let fill = pb.finish();
        Ok(TextShape {
            edge: fill.clone(),
            fill,
        })
    }
}

/// Pushes a hollow box one `size` square wide onto `pb`, as two opposite-wound rectangles.
fn push_replacement(
    pb: &mut PathBuilder,
    x: f32,
    y: f32,
    size: f32,
) -> RenderResult<()> {
    let cell = size / 8.0;
    let outer = Rect::from_ltrb(x + cell, y - 6.0 * cell, x + 7.0 * cell, y)
        .ok_or_else(|| RenderError::Draw("bad replacement glyph".to_string()))?;
    pb.push_rect(outer);
    let (l, t, r, b) = (x + 2.0 * cell, y - 5.0 * cell, x + 6.0 * cell, y - cell);
    pb.move_to(l, t);
    pb.line_to(l, b);
    pb.line_to(r, b);
    pb.line_to(r, t);
    pb.close();
    Ok(())
}
