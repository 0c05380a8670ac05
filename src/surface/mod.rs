//! The interactive plot surface.
//!
//! A [`PlotSurface`] owns a render context and displays at most one
//! [`ModelHandle`]. Invalidation requests may arrive from any thread through
//! the model or a [`PlotInvalidator`]; they coalesce into a single pending
//! state that the next [`PlotSurface::paint`] consumes.
//!
//! Lock order is invalidation state, then attachment, then the model's sync
//! root. The invalidation lock is released before the sync root is taken.

mod config;
mod host;
mod invalidation;
mod overlay;

pub use config::{
    PaintErrorStyle, PlotCursors, PlotSurfaceConfig, TrackerStyle, ZoomRectangleStyle,
};
pub use host::{
    CountingRedraw, HeadlessHost, HeadlessHostState, NoRedraw, RedrawRequester, SurfaceHost,
};
pub use invalidation::InvalidationState;
pub use overlay::tracker_label_rect;

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace, warn};

use crate::core::{ClientSize, ScreenRect, SurfaceId};
use crate::error::{PlotError, PlotResult};
use crate::export::SnapshotExporter;
use crate::input::{
    Key, ModifierKeys, PlotKeyEvent, PlotMouseDownEvent, PlotMouseEvent, PlotWheelEvent,
};
use crate::interaction::{
    CursorKind, DefaultPlotController, PlotController, PlotView, SharedController, commands,
    shared_controller,
};
use crate::model::{ModelHandle, TrackerHitResult, ViewLink};
use crate::render::RenderContext;

/// State reachable from other threads: invalidation, the attached model and
/// the redraw hook.
struct SurfaceShared {
    id: SurfaceId,
    invalidation: Mutex<InvalidationState>,
    attachment: Mutex<Option<ModelHandle>>,
    redraw: Arc<dyn RedrawRequester>,
}

impl SurfaceShared {
    fn invalidate(&self, update_data: bool) {
        {
            let mut state = self.invalidation.lock();
            *state = state.merge(InvalidationState::for_request(update_data));
        }
        self.redraw.request_redraw();
    }

    fn take_pending(&self) -> InvalidationState {
        std::mem::take(&mut *self.invalidation.lock())
    }

    /// Puts back work taken by a paint whose update failed, keeping any
    /// request that arrived meanwhile. No redraw is requested.
    fn restore_pending(&self, taken: InvalidationState) {
        let mut state = self.invalidation.lock();
        *state = state.merge(taken);
    }
}

impl ViewLink for SurfaceShared {
    fn invalidate_plot(&self, update_data: bool) {
        self.invalidate(update_data);
    }
}

/// Thread-safe handle that invalidates one surface.
///
/// Holds no model; requests reach the surface even while no model is
/// attached and are consumed by the next paint that has one.
#[derive(Clone)]
pub struct PlotInvalidator {
    shared: Arc<SurfaceShared>,
}

impl PlotInvalidator {
    pub fn invalidate_plot(&self, update_data: bool) {
        self.shared.invalidate(update_data);
    }

    #[must_use]
    pub fn surface_id(&self) -> SurfaceId {
        self.shared.id
    }
}

impl fmt::Debug for PlotInvalidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotInvalidator")
            .field("surface", &self.shared.id)
            .finish()
    }
}

/// What one paint pass produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameReport {
    /// `update` ran because an invalidation was pending.
    pub model_updated: bool,
    /// That update was asked to refresh data.
    pub data_refreshed: bool,
    pub zoom_rectangle: bool,
    pub tracker: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaintOutcome {
    /// The surface was disposed; nothing was drawn.
    Disposed,
    /// No model is attached; the surface was cleared.
    Cleared,
    /// The model has moved to another surface; the surface was cleared.
    Detached,
    Rendered(FrameReport),
    /// Update or render failed; a diagnostic was drawn instead.
    Failed { message: String },
}

impl PaintOutcome {
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }

    #[must_use]
    pub fn frame(&self) -> Option<FrameReport> {
        match self {
            Self::Rendered(report) => Some(*report),
            _ => None,
        }
    }
}

/// Displays a [`ModelHandle`] through a render context `C` and routes input
/// to a [`PlotController`].
///
/// The surface itself is driven from one thread (the UI thread): painting,
/// resizing and input all take `&mut self`. Only invalidation is shared.
pub struct PlotSurface<C: RenderContext> {
    shared: Arc<SurfaceShared>,
    controller: Option<SharedController>,
    default_controller: SharedController,
    render_context: C,
    host: Box<dyn SurfaceHost>,
    exporter: Option<Box<dyn SnapshotExporter>>,
    config: PlotSurfaceConfig,
    client_size: ClientSize,
    cursor: CursorKind,
    zoom_rectangle: Option<ScreenRect>,
    tracker: Option<TrackerHitResult>,
    disposed: bool,
}

impl<C: RenderContext> PlotSurface<C> {
    /// Creates a surface with no model and the default controller, which
    /// additionally copies the plot image on Ctrl+C.
    pub fn new(
        render_context: C,
        host: Box<dyn SurfaceHost>,
        redraw: Arc<dyn RedrawRequester>,
    ) -> Self {
        let mut default_controller = DefaultPlotController::new();
        default_controller.bind_key_down(Key::C, ModifierKeys::CONTROL, commands::copy_image());

        let shared = Arc::new(SurfaceShared {
            id: SurfaceId::next(),
            invalidation: Mutex::new(InvalidationState::Clean),
            attachment: Mutex::new(None),
            redraw,
        });
        debug!(
            surface = shared.id.get(),
            backend = render_context.backend_name(),
            "plot surface created"
        );

        Self {
            shared,
            controller: None,
            default_controller: shared_controller(default_controller),
            render_context,
            host,
            exporter: None,
            config: PlotSurfaceConfig::default(),
            client_size: ClientSize::default(),
            cursor: CursorKind::Default,
            zoom_rectangle: None,
            tracker: None,
            disposed: false,
        }
    }

    pub fn with_config(mut self, config: PlotSurfaceConfig) -> PlotResult<Self> {
        self.set_config(config)?;
        Ok(self)
    }

    /// Exporter used by [`PlotView::copy_image_to_clipboard`].
    #[must_use]
    pub fn with_exporter(mut self, exporter: Box<dyn SnapshotExporter>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    #[must_use]
    pub fn id(&self) -> SurfaceId {
        self.shared.id
    }

    /// Attaches `model`, detaching the previous one, and requests a data
    /// refresh.
    ///
    /// Setting the reference already stored is a no-op, even when the model
    /// has since been attached elsewhere; set `None` first to reclaim it.
    pub fn set_model(&mut self, model: Option<ModelHandle>) {
        if self.disposed && model.is_some() {
            warn!(
                surface = self.shared.id.get(),
                "set_model on disposed surface ignored"
            );
            return;
        }
        {
            let mut current = self.shared.attachment.lock();
            let unchanged = match (current.as_ref(), model.as_ref()) {
                (Some(current), Some(next)) => current.ptr_eq(next),
                (None, None) => true,
                _ => false,
            };
            if unchanged {
                return;
            }

            if let Some(previous) = current.take() {
                if previous.detach_view(self.shared.id) {
                    debug!(surface = self.shared.id.get(), "model detached");
                }
            }
            if let Some(next) = &model {
                let link: Weak<SurfaceShared> = Arc::downgrade(&self.shared);
                let link: Weak<dyn ViewLink> = link;
                next.attach_view(self.shared.id, link);
                debug!(surface = self.shared.id.get(), "model attached");
            }
            *current = model;
        }

        self.tracker = None;
        self.zoom_rectangle = None;
        self.shared.invalidate(true);
    }

    /// The stored model reference, attached here or not.
    #[must_use]
    pub fn model(&self) -> Option<ModelHandle> {
        self.shared.attachment.lock().clone()
    }

    /// Replaces the controller; `None` restores the default one.
    pub fn set_controller(&mut self, controller: Option<SharedController>) {
        self.controller = controller;
    }

    /// The explicitly set controller, if any.
    #[must_use]
    pub fn controller(&self) -> Option<SharedController> {
        self.controller.clone()
    }

    /// The controller input is routed to.
    #[must_use]
    pub fn actual_controller(&self) -> SharedController {
        self.controller
            .clone()
            .unwrap_or_else(|| Arc::clone(&self.default_controller))
    }

    #[must_use]
    pub fn default_controller(&self) -> SharedController {
        Arc::clone(&self.default_controller)
    }

    /// Requests a repaint; with `update_data` the model also refreshes its
    /// data first. Requests coalesce until the next paint.
    pub fn invalidate_plot(&self, update_data: bool) {
        self.shared.invalidate(update_data);
    }

    #[must_use]
    pub fn invalidator(&self) -> PlotInvalidator {
        PlotInvalidator {
            shared: Arc::clone(&self.shared),
        }
    }

    #[must_use]
    pub fn pending_invalidation(&self) -> InvalidationState {
        *self.shared.invalidation.lock()
    }

    /// Runs one paint pass into the render context's current target.
    ///
    /// Pending invalidation is consumed only when a model attached to this
    /// surface is actually rendered. A failed update leaves it pending, so
    /// the next paint retries it.
    pub fn paint(&mut self) -> PaintOutcome {
        if self.disposed {
            return PaintOutcome::Disposed;
        }

        let model = self.shared.attachment.lock().clone();
        let Some(model) = model else {
            self.clear_background();
            return PaintOutcome::Cleared;
        };
        if !model.is_attached_to(self.shared.id) {
            trace!(
                surface = self.shared.id.get(),
                "model shown elsewhere, skipping render"
            );
            self.clear_background();
            return PaintOutcome::Detached;
        }

        let pending = self.shared.take_pending();
        match self.render_frame(&model, pending) {
            Ok(report) => {
                trace!(surface = self.shared.id.get(), ?report, "painted");
                PaintOutcome::Rendered(report)
            }
            Err(err) => {
                error!(surface = self.shared.id.get(), error = %err, "plot paint failed");
                let message = err.to_string();
                if let Err(draw_err) = overlay::draw_paint_error(
                    &mut self.render_context,
                    &message,
                    self.client_size,
                    &self.config.paint_error,
                ) {
                    warn!(error = %draw_err, "failed to draw paint diagnostic");
                }
                PaintOutcome::Failed { message }
            }
        }
    }

    fn render_frame(
        &mut self,
        model: &ModelHandle,
        pending: InvalidationState,
    ) -> PlotResult<FrameReport> {
        let mut report = FrameReport::default();
        {
            let mut model = model.lock();
            if pending.is_pending() {
                if let Err(err) = model.update(pending.needs_data()) {
                    drop(model);
                    self.shared.restore_pending(pending);
                    return Err(err);
                }
                report.model_updated = true;
                report.data_refreshed = pending.needs_data();
            }
            let background = model.background().or(self.config.default_background);
            self.render_context.clear(background)?;
            let rendered = model.render(&mut self.render_context, self.client_size.bounds());
            self.render_context.reset_clip();
            rendered?;
        }

        if let Some(rect) = self.zoom_rectangle {
            overlay::draw_zoom_rectangle(
                &mut self.render_context,
                rect,
                &self.config.zoom_rectangle,
            )?;
            report.zoom_rectangle = true;
        }
        if let Some(hit) = &self.tracker {
            overlay::draw_tracker(
                &mut self.render_context,
                hit,
                self.client_size,
                &self.config.tracker,
            )?;
            report.tracker = true;
        }
        Ok(report)
    }

    fn clear_background(&mut self) {
        if let Err(err) = self.render_context.clear(self.config.default_background) {
            warn!(surface = self.shared.id.get(), error = %err, "failed to clear surface");
        }
    }

    /// Records a new client size; a change requests a redraw.
    pub fn resize(&mut self, width: u32, height: u32) {
        let size = ClientSize::new(width, height);
        if size == self.client_size {
            return;
        }
        trace!(surface = self.shared.id.get(), width, height, "resized");
        self.client_size = size;
        self.shared.invalidate(false);
    }

    #[must_use]
    pub fn client_size(&self) -> ClientSize {
        self.client_size
    }

    #[must_use]
    pub fn config(&self) -> &PlotSurfaceConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PlotSurfaceConfig) -> PlotResult<()> {
        config.validate()?;
        self.config = config;
        self.apply_cursor();
        self.shared.invalidate(false);
        Ok(())
    }

    /// Replaces the cursor names and re-applies the current cursor.
    pub fn set_cursors(&mut self, cursors: PlotCursors) {
        self.config.cursors = cursors;
        self.apply_cursor();
    }

    #[must_use]
    pub fn cursor_kind(&self) -> CursorKind {
        self.cursor
    }

    fn apply_cursor(&mut self) {
        self.host.set_cursor(self.config.cursors.name_for(self.cursor));
    }

    #[must_use]
    pub fn render_context(&self) -> &C {
        &self.render_context
    }

    pub fn render_context_mut(&mut self) -> &mut C {
        &mut self.render_context
    }

    /// Zoom rectangle overlay, snapped to whole pixels.
    #[must_use]
    pub fn zoom_rectangle(&self) -> Option<ScreenRect> {
        self.zoom_rectangle
    }

    #[must_use]
    pub fn tracker(&self) -> Option<&TrackerHitResult> {
        self.tracker.as_ref()
    }

    pub fn handle_mouse_down(&mut self, event: &PlotMouseDownEvent) -> bool {
        self.dispatch(|controller, view| controller.handle_mouse_down(view, event))
    }

    pub fn handle_mouse_move(&mut self, event: &PlotMouseEvent) -> bool {
        self.dispatch(|controller, view| controller.handle_mouse_move(view, event))
    }

    pub fn handle_mouse_up(&mut self, event: &PlotMouseEvent) -> bool {
        self.dispatch(|controller, view| controller.handle_mouse_up(view, event))
    }

    pub fn handle_mouse_enter(&mut self, event: &PlotMouseEvent) -> bool {
        self.dispatch(|controller, view| controller.handle_mouse_enter(view, event))
    }

    pub fn handle_mouse_leave(&mut self, event: &PlotMouseEvent) -> bool {
        self.dispatch(|controller, view| controller.handle_mouse_leave(view, event))
    }

    pub fn handle_mouse_wheel(&mut self, event: &PlotWheelEvent) -> bool {
        self.dispatch(|controller, view| controller.handle_mouse_wheel(view, event))
    }

    pub fn handle_key_down(&mut self, event: &PlotKeyEvent) -> bool {
        self.dispatch(|controller, view| controller.handle_key_down(view, event))
    }

    fn dispatch(
        &mut self,
        handler: impl FnOnce(&mut dyn PlotController, &mut dyn PlotView) -> bool,
    ) -> bool {
        if self.disposed {
            return false;
        }
        let controller = self.actual_controller();
        let mut controller = controller.lock();
        handler(&mut *controller, self)
    }

    /// Detaches the model and releases cached render resources. Idempotent;
    /// also runs on drop.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.tracker = None;
        self.zoom_rectangle = None;
        self.set_model(None);
        self.controller = None;
        self.render_context.release();
        self.disposed = true;
        debug!(surface = self.shared.id.get(), "plot surface disposed");
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl<C: RenderContext> PlotView for PlotSurface<C> {
    fn actual_model(&self) -> Option<ModelHandle> {
        self.model().filter(|model| model.is_attached_to(self.shared.id))
    }

    fn client_area(&self) -> ScreenRect {
        self.client_size.bounds()
    }

    fn set_cursor_kind(&mut self, kind: CursorKind) {
        self.cursor = kind;
        self.apply_cursor();
    }

    fn show_tracker(&mut self, hit: TrackerHitResult) {
        self.tracker = Some(hit);
        self.shared.redraw.request_redraw();
    }

    fn hide_tracker(&mut self) {
        self.tracker = None;
        self.shared.redraw.request_redraw();
    }

    fn show_zoom_rectangle(&mut self, rect: ScreenRect) {
        self.zoom_rectangle = Some(rect.snapped_to_pixels());
        self.shared.redraw.request_redraw();
    }

    fn hide_zoom_rectangle(&mut self) {
        self.zoom_rectangle = None;
        self.shared.redraw.request_redraw();
    }

    fn invalidate_plot(&mut self, update_data: bool) {
        self.shared.invalidate(update_data);
    }

    fn set_clipboard_text(&mut self, text: &str) {
        self.host.set_clipboard_text(text);
    }

    fn copy_image_to_clipboard(&mut self) -> PlotResult<()> {
        let model = self
            .actual_model()
            .ok_or(PlotError::Unsupported("copy without an attached model"))?;
        let exporter = self
            .exporter
            .as_ref()
            .ok_or(PlotError::Unsupported("copy without a snapshot exporter"))?;
        if !self.client_size.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: self.client_size.width,
                height: self.client_size.height,
            });
        }
        let image = exporter.export_snapshot(&model, self.client_size)?;
        self.host.set_clipboard_image(&image);
        debug!(
            surface = self.shared.id.get(),
            width = image.width(),
            height = image.height(),
            "copied plot image"
        );
        Ok(())
    }
}

impl<C: RenderContext> Drop for PlotSurface<C> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<C: RenderContext> fmt::Debug for PlotSurface<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotSurface")
            .field("id", &self.shared.id)
            .field("backend", &self.render_context.backend_name())
            .field("client_size", &self.client_size)
            .field("pending", &self.pending_invalidation())
            .field("disposed", &self.disposed)
            .finish()
    }
}
