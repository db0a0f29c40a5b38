//! A thin drawing surface over a `tiny_skia::Pixmap` offering the handful of canvas operations the
//! meme needs.

use crate::meme::{Face, MemeContent, MemeImage, RenderError, RenderResult};
use std::fmt::Debug;
use std::f32::consts::TAU;
use tiny_skia::{Color, FillRule, LineCap, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Horizontal space kept clear on each side when a line of text is shrunk to fit.
const TEXT_MARGIN: f32 = 16.0;

/// Straight segments used to approximate each wedge's outer arc.
const ARC_STEPS: usize = 24;

/// Hands out pixel buffers to draw on.
pub trait SurfaceSource: Debug + Send + Sync {
    /// Returns a blank surface of the given size, or `None` if one cannot be created.
    fn acquire(&self, width: u32, height: u32) -> Option<Pixmap>;
}

/// Allocates surfaces in memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct RasterSurfaces;

impl SurfaceSource for RasterSurfaces {
    fn acquire(&self, width: u32, height: u32) -> Option<Pixmap> {
        Pixmap::new(width, height)
    }
}

/// How a line of text is painted.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextStyle {
    pub(crate) size: f32,
    pub(crate) fill: Color,
    /// Color and width of an outline drawn over the fill.
    pub(crate) stroke: Option<(Color, f32)>,
}

pub(crate) struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    pub(crate) fn new(
        surfaces: &dyn SurfaceSource,
        width: u32,
        height: u32,
    ) -> RenderResult<Self> {
        let pixmap = surfaces
            .acquire(width, height)
            .filter(|p| p.width() == width && p.height() == height)
            .ok_or(RenderError::Surface { width, height })?;
        Ok(Self { pixmap })
    }

    pub(crate) fn width(&self) -> f32 {
        self.pixmap.width() as f32
    }

    pub(crate) fn fill(&mut self, color: Color) {
        self.pixmap.fill(color);
    }

    /// Fills the sector of the circle at (`cx`, `cy`) with `radius` between the two angles,
    /// measured clockwise from the positive x axis.
    pub(crate) fn fill_wedge(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        start: f32,
        end: f32,
        color: Color,
    ) -> RenderResult<()> {
        let mut pb = PathBuilder::new();
        pb.move_to(cx, cy);
        for step in 0..=ARC_STEPS {
            let angle = start + (end - start) * step as f32 / ARC_STEPS as f32;
            pb.line_to(cx + radius * angle.cos(), cy + radius * angle.sin());
        }
        pb.close();
        let path = pb
            .finish()
            .ok_or_else(|| RenderError::Draw(format!("empty wedge {start}..{end}")))?;
        self.pixmap.fill_path(
            &path,
            &paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
        Ok(())
    }

    /// Draws `text` horizontally centred on `cx` with its baseline at `y`. Text wider than the
    /// canvas is scaled down to fit.
    pub(crate) fn text(
        &mut self,
        face: &dyn Face,
        text: &str,
        style: TextStyle,
        cx: f32,
        y: f32,
    ) -> RenderResult<()> {
        let max_width = self.width() - 2.0 * TEXT_MARGIN;
        let mut size = style.size;
        let natural = face.measure(text, size);
        if natural > max_width {
            size *= max_width / natural;
        }
        let x = cx - face.measure(text, size) / 2.0;
        let shape = face.shape(text, size, x, y)?;

        if let Some(fill) = &shape.fill {
            self.pixmap.fill_path(
                fill,
                &paint(style.fill),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
        if let (Some((color, width)), Some(edge)) = (style.stroke, &shape.edge) {
            let stroke = Stroke {
                width,
                line_cap: LineCap::Square,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(edge, &paint(color), &stroke, Transform::identity(), None);
        }
        Ok(())
    }

    pub(crate) fn encode(self, content: MemeContent) -> RenderResult<MemeImage> {
        let png = self
            .pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        Ok(MemeImage::new(
            png,
            self.pixmap.width(),
            self.pixmap.height(),
            content,
        ))
    }
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

/// The angle at which wedge `index` of `segments` starts.
pub(crate) fn segment_angle(index: usize, segments: usize) -> f32 {
    TAU * index as f32 / segments as f32
}
