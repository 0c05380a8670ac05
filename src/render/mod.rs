mod primitives;
mod recording;

pub use primitives::{
    Color, FontSpec, FontWeight, LineJoin, StrokeStyle, TextExtent, TextHAlign, TextPrimitive,
    TextVAlign,
};
pub use recording::{DrawCommand, RecordingRenderContext};

pub(crate) use primitives::validate_points;

use crate::core::{ScreenPoint, ScreenRect};
use crate::error::PlotResult;

/// Immediate-mode drawing surface used by models and overlays.
///
/// One implementation exists per backend. The plot surface is generic over
/// this trait, so backends are picked per instance at construction time.
pub trait RenderContext {
    fn backend_name(&self) -> &'static str;

    /// Fills the whole target. `None` clears to transparent.
    fn clear(&mut self, color: Option<Color>) -> PlotResult<()>;

    fn draw_polyline(&mut self, points: &[ScreenPoint], stroke: &StrokeStyle) -> PlotResult<()>;

    fn draw_polygon(
        &mut self,
        points: &[ScreenPoint],
        fill: Option<Color>,
        stroke: Option<&StrokeStyle>,
    ) -> PlotResult<()>;

    fn draw_rectangle(
        &mut self,
        rect: ScreenRect,
        fill: Option<Color>,
        stroke: Option<&StrokeStyle>,
    ) -> PlotResult<()>;

    fn draw_ellipse(
        &mut self,
        rect: ScreenRect,
        fill: Option<Color>,
        stroke: Option<&StrokeStyle>,
    ) -> PlotResult<()>;

    fn draw_text(&mut self, text: &TextPrimitive) -> PlotResult<()>;

    /// Measures a text block; multi-line text stacks its lines.
    fn measure_text(&mut self, text: &str, font: &FontSpec) -> TextExtent;

    /// Restricts subsequent drawing to `rect`. Returns `false` when the
    /// backend cannot clip right now.
    fn set_clip(&mut self, rect: ScreenRect) -> bool;

    fn reset_clip(&mut self);

    /// Drops cached drawing resources. The context stays usable and will
    /// lazily recreate what it needs.
    fn release(&mut self);

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, stroke: &StrokeStyle) -> PlotResult<()> {
        self.draw_polyline(&[from, to], stroke)
    }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderContext, CairoRenderStats};
