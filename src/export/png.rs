use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use cairo::{Context, Format, ImageSurface};
use tracing::info;

use crate::core::ClientSize;
use crate::error::{PlotError, PlotResult};
use crate::export::{DEFAULT_RESOLUTION, RasterImage, SnapshotExporter, render_offscreen};
use crate::model::ModelHandle;
use crate::render::{CairoRenderContext, RenderContext};

/// Renders models to PNG through Cairo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PngExporter {
    pub width: u32,
    pub height: u32,
    /// Dots per inch; 96 renders one logical pixel per image pixel.
    pub resolution: f64,
}

impl Default for PngExporter {
    fn default() -> Self {
        Self {
            width: 700,
            height: 400,
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl PngExporter {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn export_to_image(&self, model: &ModelHandle) -> PlotResult<RasterImage> {
        let invalid = || PlotError::InvalidViewport {
            width: self.width,
            height: self.height,
        };
        let width = i32::try_from(self.width).map_err(|_| invalid())?;
        let height = i32::try_from(self.height).map_err(|_| invalid())?;
        if width <= 0 || height <= 0 {
            return Err(invalid());
        }

        let mut surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| PlotError::Export(format!("failed to create image surface: {err}")))?;
        {
            let context = Context::new(&surface)
                .map_err(|err| PlotError::Export(format!("failed to create context: {err}")))?;
            let scale = self.resolution / DEFAULT_RESOLUTION;
            if scale.is_finite() && scale > 0.0 {
                context.scale(scale, scale);
            }
            let mut render_context = CairoRenderContext::for_context(context);
            let rendered = render_offscreen(
                &mut render_context,
                model,
                ClientSize::new(self.width, self.height),
                self.resolution,
            );
            render_context.release();
            rendered?;
        }

        surface.flush();
        let stride = usize::try_from(surface.stride())
            .map_err(|_| PlotError::Export("negative image stride".to_owned()))?;
        let data = surface
            .data()
            .map_err(|err| PlotError::Export(format!("failed to read image data: {err}")))?
            .to_vec();
        RasterImage::new(self.width, self.height, stride, self.resolution, data)
    }

    pub fn export<W: Write>(&self, model: &ModelHandle, writer: &mut W) -> PlotResult<()> {
        self.export_to_image(model)?.write_png(writer)
    }

    pub fn export_to_file(&self, model: &ModelHandle, path: impl AsRef<Path>) -> PlotResult<()> {
        let path = path.as_ref();
        let image = self.export_to_image(model)?;
        let mut writer = BufWriter::new(File::create(path)?);
        image.write_png(&mut writer)?;
        writer.flush()?;
        info!(path = %path.display(), width = self.width, height = self.height, "exported png");
        Ok(())
    }
}

impl SnapshotExporter for PngExporter {
    fn export_snapshot(&self, model: &ModelHandle, size: ClientSize) -> PlotResult<RasterImage> {
        Self {
            width: size.width,
            height: size.height,
            resolution: self.resolution,
        }
        .export_to_image(model)
    }
}

/// Renders `model` into a new image of `width`×`height` pixels.
pub fn export_to_image(
    model: &ModelHandle,
    width: u32,
    height: u32,
    resolution: f64,
) -> PlotResult<RasterImage> {
    PngExporter::new(width, height)
        .with_resolution(resolution)
        .export_to_image(model)
}

/// Renders `model` and writes it to `path` as PNG.
pub fn export_to_file(
    model: &ModelHandle,
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
    resolution: f64,
) -> PlotResult<()> {
    PngExporter::new(width, height)
        .with_resolution(resolution)
        .export_to_file(model, path)
}
