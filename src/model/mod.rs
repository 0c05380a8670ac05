//! Seam to the charting collaborator.
//!
//! The plot math lives outside this crate; a chart definition plugs in by
//! implementing [`PlotModel`] and is shared through a [`ModelHandle`].

mod handle;
mod tracker;

pub use handle::{ModelGuard, ModelHandle};
pub use tracker::{AxisExtent, TrackerHitResult};

pub(crate) use handle::ViewLink;

use crate::core::{ScreenPoint, ScreenRect};
use crate::error::PlotResult;
use crate::render::{Color, RenderContext};

/// A mutable chart definition rendered by a plot surface.
///
/// Implementations own series, axes and layout. Only `update`, `render` and
/// `background` are required; the interaction hooks default to no-ops so a
/// static chart needs nothing else.
pub trait PlotModel: Send {
    /// Recomputes layout, and series/axis data when `force_data_refresh` is set.
    fn update(&mut self, force_data_refresh: bool) -> PlotResult<()>;

    /// Draws the chart into `bounds`.
    fn render(&mut self, context: &mut dyn RenderContext, bounds: ScreenRect) -> PlotResult<()>;

    /// Background fill. `None` means undefined (the host decides).
    fn background(&self) -> Option<Color> {
        None
    }

    /// Nearest trackable point to `position`, if any.
    fn tracker_hit(&self, _position: ScreenPoint, _snap: bool) -> Option<TrackerHitResult> {
        None
    }

    fn pan_by(&mut self, _delta: ScreenPoint) {}

    /// Zooms around `center`; factors above 1 zoom in.
    fn zoom_at(&mut self, _center: ScreenPoint, _factor: f64) {}

    fn zoom_to_rectangle(&mut self, _rect: ScreenRect) {}

    fn reset_axes(&mut self) {}
}
