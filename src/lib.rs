//! plotview: an interactive plot surface for desktop toolkits.
//!
//! A [`PlotSurface`] displays one application-owned [`ModelHandle`], routes
//! pointer and keyboard input to a [`PlotController`], and coalesces
//! invalidation requests from any thread into a single update-and-render per
//! paint. Rendering goes through the [`RenderContext`] trait; the
//! `cairo-backend` feature provides a Cairo/Pango implementation plus PNG
//! export, and `gtk4-adapter` embeds the surface in a GTK4 `DrawingArea`.

pub mod core;
pub mod error;
pub mod export;
pub mod input;
pub mod interaction;
pub mod model;
pub mod render;
pub mod surface;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use crate::core::{ClientSize, ScreenPoint, ScreenRect, SurfaceId};
pub use error::{PlotError, PlotResult};
pub use export::{RasterImage, SnapshotExporter, render_offscreen};
pub use interaction::{
    CursorKind, DefaultPlotController, PlotController, PlotView, SharedController,
    shared_controller,
};
pub use model::{ModelHandle, PlotModel, TrackerHitResult};
pub use render::RenderContext;
pub use surface::{
    FrameReport, InvalidationState, PaintOutcome, PlotInvalidator, PlotSurface, PlotSurfaceConfig,
};

#[cfg(feature = "cairo-backend")]
pub use export::{PngExporter, SvgExporter};
#[cfg(feature = "cairo-backend")]
pub use render::CairoRenderContext;
