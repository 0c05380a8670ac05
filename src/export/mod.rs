//! Off-screen rendering of a model into a still image or an SVG document.

mod raster;

#[cfg(feature = "cairo-backend")]
mod png;
#[cfg(feature = "cairo-backend")]
mod svg;

pub use raster::RasterImage;

#[cfg(feature = "cairo-backend")]
pub use png::{PngExporter, export_to_file, export_to_image};
#[cfg(feature = "cairo-backend")]
pub use svg::SvgExporter;

use tracing::debug;

use crate::core::{ClientSize, ScreenRect};
use crate::error::{PlotError, PlotResult};
use crate::model::ModelHandle;
use crate::render::RenderContext;

/// Resolution (dots per inch) at which one logical pixel is one image pixel.
pub const DEFAULT_RESOLUTION: f64 = 96.0;

/// Produces a still image of a model, e.g. for copy-to-clipboard.
pub trait SnapshotExporter {
    fn export_snapshot(&self, model: &ModelHandle, size: ClientSize) -> PlotResult<RasterImage>;
}

/// Logical bounds covered by an image of `size` pixels at `resolution` dpi.
pub fn logical_bounds(size: ClientSize, resolution: f64) -> PlotResult<ScreenRect> {
    if !size.is_valid() {
        return Err(PlotError::InvalidViewport {
            width: size.width,
            height: size.height,
        });
    }
    if !resolution.is_finite() || resolution <= 0.0 {
        return Err(PlotError::InvalidData(
            "export resolution must be finite and > 0".to_owned(),
        ));
    }
    let scale = resolution / DEFAULT_RESOLUTION;
    Ok(ScreenRect::new(
        0.0,
        0.0,
        f64::from(size.width) / scale,
        f64::from(size.height) / scale,
    ))
}

/// Renders `model` once into `context`.
///
/// The model's data is always refreshed (`update(true)`), independent of any
/// invalidation pending on a live surface, so exports never show stale data.
/// The model does not need to be attached to a surface. Backends that scale
/// for `resolution` must set that transform on their target beforehand.
pub fn render_offscreen<C: RenderContext>(
    context: &mut C,
    model: &ModelHandle,
    size: ClientSize,
    resolution: f64,
) -> PlotResult<()> {
    let bounds = logical_bounds(size, resolution)?;
    debug!(
        width = size.width,
        height = size.height,
        resolution,
        backend = context.backend_name(),
        "rendering model off-screen"
    );

    let mut model = model.lock();
    if let Some(background) = model.background().filter(|color| color.is_visible()) {
        context.draw_rectangle(bounds, Some(background), None)?;
    }
    model.update(true)?;
    model.render(context, bounds)
}
