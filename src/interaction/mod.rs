//! Controller protocol between a plot surface and its input bindings.
//!
//! A surface forwards translated input to a [`PlotController`]; the
//! controller mutates the model through its handle and calls back into the
//! surface through [`PlotView`].

pub mod commands;
mod controller;

pub use commands::KeyCommand;
pub use controller::DefaultPlotController;

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::ScreenRect;
use crate::error::PlotResult;
use crate::input::{
    Key, ModifierKeys, PlotKeyEvent, PlotMouseDownEvent, PlotMouseEvent, PlotWheelEvent,
};
use crate::model::{ModelHandle, TrackerHitResult};

/// Cursor a controller asks the view to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CursorKind {
    #[default]
    Default,
    Pan,
    ZoomRectangle,
    ZoomHorizontal,
    ZoomVertical,
}

/// Gesture currently driven by a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Tracking,
    Panning,
    ZoomRectangle,
}

/// Callbacks a controller may invoke on the view it is handling input for.
pub trait PlotView {
    /// Model displayed by this view; `None` when unset or when the model has
    /// been attached to another view since.
    fn actual_model(&self) -> Option<ModelHandle>;

    fn client_area(&self) -> ScreenRect;

    fn set_cursor_kind(&mut self, kind: CursorKind);

    fn show_tracker(&mut self, hit: TrackerHitResult);

    fn hide_tracker(&mut self);

    /// Shows a rubber band; `rect` is in model (device-independent) space.
    fn show_zoom_rectangle(&mut self, rect: ScreenRect);

    fn hide_zoom_rectangle(&mut self);

    fn invalidate_plot(&mut self, update_data: bool);

    fn set_clipboard_text(&mut self, text: &str);

    /// Renders the model at the view's client size and places the image on
    /// the clipboard.
    fn copy_image_to_clipboard(&mut self) -> PlotResult<()>;
}

/// Input-to-interaction bindings.
///
/// Every handler returns whether the event was consumed.
pub trait PlotController: Send {
    fn handle_mouse_down(&mut self, view: &mut dyn PlotView, event: &PlotMouseDownEvent) -> bool;

    fn handle_mouse_move(&mut self, view: &mut dyn PlotView, event: &PlotMouseEvent) -> bool;

    fn handle_mouse_up(&mut self, view: &mut dyn PlotView, event: &PlotMouseEvent) -> bool;

    fn handle_mouse_enter(&mut self, view: &mut dyn PlotView, event: &PlotMouseEvent) -> bool;

    fn handle_mouse_leave(&mut self, view: &mut dyn PlotView, event: &PlotMouseEvent) -> bool;

    fn handle_mouse_wheel(&mut self, view: &mut dyn PlotView, event: &PlotWheelEvent) -> bool;

    fn handle_key_down(&mut self, view: &mut dyn PlotView, event: &PlotKeyEvent) -> bool;

    fn bind_key_down(&mut self, key: Key, modifiers: ModifierKeys, command: KeyCommand);
}

/// Controller shared between the application and one or more surfaces.
pub type SharedController = Arc<Mutex<dyn PlotController>>;

#[must_use]
pub fn shared_controller(controller: impl PlotController + 'static) -> SharedController {
    Arc::new(Mutex::new(controller))
}
