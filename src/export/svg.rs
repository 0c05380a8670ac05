use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use cairo::{Context, SvgSurface};
use tracing::info;

use crate::core::ClientSize;
use crate::error::{PlotError, PlotResult};
use crate::export::{DEFAULT_RESOLUTION, render_offscreen};
use crate::model::ModelHandle;
use crate::render::{CairoRenderContext, RenderContext};

/// Renders models to SVG documents through Cairo.
///
/// One logical pixel maps to one SVG user unit. Text is measured and laid out
/// by Pango on the SVG surface itself, so metrics match the interactive view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvgExporter {
    pub width: u32,
    pub height: u32,
}

impl Default for SvgExporter {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
        }
    }
}

impl SvgExporter {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Renders `model` into a complete SVG document.
    pub fn export_to_bytes(&self, model: &ModelHandle) -> PlotResult<Vec<u8>> {
        let size = ClientSize::new(self.width, self.height);
        if !size.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }

        let surface =
            SvgSurface::for_stream(f64::from(self.width), f64::from(self.height), Vec::<u8>::new())
                .map_err(|err| PlotError::Export(format!("failed to create svg surface: {err}")))?;
        {
            let context = Context::new(&surface)
                .map_err(|err| PlotError::Export(format!("failed to create context: {err}")))?;
            let mut render_context = CairoRenderContext::for_context(context);
            let rendered = render_offscreen(&mut render_context, model, size, DEFAULT_RESOLUTION);
            render_context.release();
            rendered?;
        }

        let stream = surface
            .finish_output_stream()
            .map_err(|err| PlotError::Io(err.error))?;
        stream
            .downcast::<Vec<u8>>()
            .map(|bytes| *bytes)
            .map_err(|_| PlotError::Export("svg surface returned a foreign stream".to_owned()))
    }

    pub fn export<W: Write>(&self, model: &ModelHandle, writer: &mut W) -> PlotResult<()> {
        let document = self.export_to_bytes(model)?;
        writer.write_all(&document)?;
        Ok(())
    }

    pub fn export_to_file(&self, model: &ModelHandle, path: impl AsRef<Path>) -> PlotResult<()> {
        let path = path.as_ref();
        let document = self.export_to_bytes(model)?;
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(&document)?;
        writer.flush()?;
        info!(path = %path.display(), width = self.width, height = self.height, "exported svg");
        Ok(())
    }
}
