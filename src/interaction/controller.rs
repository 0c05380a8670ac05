use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::{ScreenPoint, ScreenRect};
use crate::input::{
    Key, ModifierKeys, MouseButton, PlotKeyEvent, PlotMouseDownEvent, PlotMouseEvent,
    PlotWheelEvent, WHEEL_DELTA_PER_NOTCH,
};
use crate::interaction::{
    CursorKind, InteractionMode, KeyCommand, PlotController, PlotView, commands,
};

/// Zoom factor applied per wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 1.2;

/// Smallest rubber band (in pixels, per side) that triggers a zoom.
pub const MIN_ZOOM_RECTANGLE_PX: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    Tracking {
        button: MouseButton,
    },
    Panning {
        button: MouseButton,
        last: ScreenPoint,
    },
    ZoomRectangle {
        button: MouseButton,
        start: ScreenPoint,
        current: ScreenPoint,
        modifiers: ModifierKeys,
    },
}

impl Gesture {
    fn button(self) -> MouseButton {
        match self {
            Self::Idle => MouseButton::None,
            Self::Tracking { button }
            | Self::Panning { button, .. }
            | Self::ZoomRectangle { button, .. } => button,
        }
    }
}

/// Stock bindings:
///
/// - left drag tracks the nearest data point,
/// - right drag pans,
/// - middle drag or Ctrl+left drag zooms to a rectangle (Shift keeps the
///   full height, Alt keeps the full width),
/// - middle double-click or `A` resets the axes,
/// - the wheel zooms around the pointer.
pub struct DefaultPlotController {
    gesture: Gesture,
    key_bindings: IndexMap<(Key, ModifierKeys), KeyCommand>,
}

impl Default for DefaultPlotController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DefaultPlotController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultPlotController")
            .field("gesture", &self.gesture)
            .field("key_bindings", &self.key_bindings.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl DefaultPlotController {
    #[must_use]
    pub fn new() -> Self {
        let mut controller = Self {
            gesture: Gesture::Idle,
            key_bindings: IndexMap::new(),
        };
        controller.bind_key_down(Key::A, ModifierKeys::NONE, commands::reset_axes());
        controller
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        match self.gesture {
            Gesture::Idle => InteractionMode::Idle,
            Gesture::Tracking { .. } => InteractionMode::Tracking,
            Gesture::Panning { .. } => InteractionMode::Panning,
            Gesture::ZoomRectangle { .. } => InteractionMode::ZoomRectangle,
        }
    }

    pub fn unbind_key_down(&mut self, key: Key, modifiers: ModifierKeys) -> Option<KeyCommand> {
        self.key_bindings.shift_remove(&(key, modifiers))
    }

    #[must_use]
    pub fn is_key_bound(&self, key: Key, modifiers: ModifierKeys) -> bool {
        self.key_bindings.contains_key(&(key, modifiers))
    }

    /// Bound chords in registration order.
    pub fn key_bindings(&self) -> impl Iterator<Item = (Key, ModifierKeys)> + '_ {
        self.key_bindings.keys().copied()
    }

    fn update_tracker(view: &mut dyn PlotView, position: ScreenPoint) {
        let Some(model) = view.actual_model() else {
            return;
        };
        let hit = model.lock().tracker_hit(position, true);
        match hit {
            Some(hit) => view.show_tracker(hit),
            None => view.hide_tracker(),
        }
    }

    fn zoom_rectangle(
        view: &dyn PlotView,
        start: ScreenPoint,
        current: ScreenPoint,
        modifiers: ModifierKeys,
    ) -> (ScreenRect, CursorKind) {
        let rect = ScreenRect::from_corners(start, current);
        let client = view.client_area();
        if modifiers.contains(ModifierKeys::SHIFT) {
            (
                ScreenRect::new(rect.left, client.top, rect.width, client.height),
                CursorKind::ZoomHorizontal,
            )
        } else if modifiers.contains(ModifierKeys::ALT) {
            (
                ScreenRect::new(client.left, rect.top, client.width, rect.height),
                CursorKind::ZoomVertical,
            )
        } else {
            (rect, CursorKind::ZoomRectangle)
        }
    }

    fn finish_gesture(&mut self, view: &mut dyn PlotView, commit: bool) {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => {}
            Gesture::Tracking { .. } => view.hide_tracker(),
            Gesture::Panning { .. } => view.set_cursor_kind(CursorKind::Default),
            Gesture::ZoomRectangle {
                start,
                current,
                modifiers,
                ..
            } => {
                view.hide_zoom_rectangle();
                view.set_cursor_kind(CursorKind::Default);
                let (rect, _) = Self::zoom_rectangle(view, start, current, modifiers);
                if !commit
                    || rect.width < MIN_ZOOM_RECTANGLE_PX
                    || rect.height < MIN_ZOOM_RECTANGLE_PX
                {
                    return;
                }
                if let Some(model) = view.actual_model() {
                    debug!(?rect, "zoom to rectangle");
                    model.with(|model| model.zoom_to_rectangle(rect));
                    view.invalidate_plot(false);
                }
            }
        }
    }
}

impl PlotController for DefaultPlotController {
    fn handle_mouse_down(&mut self, view: &mut dyn PlotView, event: &PlotMouseDownEvent) -> bool {
        if self.gesture != Gesture::Idle {
            return false;
        }
        let ctrl = event.modifiers.contains(ModifierKeys::CONTROL);
        let position = event.position;

        match event.button {
            MouseButton::Middle if event.click_count >= 2 => {
                let Some(model) = view.actual_model() else {
                    return false;
                };
                model.with(|model| model.reset_axes());
                view.invalidate_plot(false);
                true
            }
            MouseButton::Left if !ctrl => {
                self.gesture = Gesture::Tracking {
                    button: event.button,
                };
                Self::update_tracker(view, position);
                true
            }
            MouseButton::Left | MouseButton::Middle => {
                let (_, cursor) = Self::zoom_rectangle(view, position, position, event.modifiers);
                self.gesture = Gesture::ZoomRectangle {
                    button: event.button,
                    start: position,
                    current: position,
                    modifiers: event.modifiers,
                };
                view.set_cursor_kind(cursor);
                true
            }
            MouseButton::Right => {
                self.gesture = Gesture::Panning {
                    button: event.button,
                    last: position,
                };
                view.set_cursor_kind(CursorKind::Pan);
                true
            }
            MouseButton::None | MouseButton::XButton1 | MouseButton::XButton2 => false,
        }
    }

    fn handle_mouse_move(&mut self, view: &mut dyn PlotView, event: &PlotMouseEvent) -> bool {
        match &mut self.gesture {
            Gesture::Idle => false,
            Gesture::Tracking { .. } => {
                Self::update_tracker(view, event.position);
                true
            }
            Gesture::Panning { last, .. } => {
                let delta = event.position.offset_from(*last);
                *last = event.position;
                if let Some(model) = view.actual_model() {
                    trace!(dx = delta.x, dy = delta.y, "pan");
                    model.with(|model| model.pan_by(delta));
                    view.invalidate_plot(false);
                }
                true
            }
            Gesture::ZoomRectangle {
                start,
                current,
                modifiers,
                ..
            } => {
                *current = event.position;
                let (rect, cursor) = Self::zoom_rectangle(view, *start, *current, *modifiers);
                view.set_cursor_kind(cursor);
                view.show_zoom_rectangle(rect);
                true
            }
        }
    }

    fn handle_mouse_up(&mut self, view: &mut dyn PlotView, event: &PlotMouseEvent) -> bool {
        if self.gesture == Gesture::Idle || self.gesture.button() != event.button {
            return false;
        }
        if let Gesture::ZoomRectangle { current, .. } = &mut self.gesture {
            *current = event.position;
        }
        self.finish_gesture(view, true);
        true
    }

    fn handle_mouse_enter(&mut self, _view: &mut dyn PlotView, _event: &PlotMouseEvent) -> bool {
        false
    }

    fn handle_mouse_leave(&mut self, view: &mut dyn PlotView, _event: &PlotMouseEvent) -> bool {
        if self.gesture == Gesture::Idle {
            return false;
        }
        self.finish_gesture(view, false);
        true
    }

    fn handle_mouse_wheel(&mut self, view: &mut dyn PlotView, event: &PlotWheelEvent) -> bool {
        if event.delta == 0 {
            return false;
        }
        let Some(model) = view.actual_model() else {
            return false;
        };
        let factor = WHEEL_ZOOM_STEP.powf(f64::from(event.delta) / WHEEL_DELTA_PER_NOTCH);
        trace!(factor, "wheel zoom");
        model.with(|model| model.zoom_at(event.position, factor));
        view.invalidate_plot(false);
        true
    }

    fn handle_key_down(&mut self, view: &mut dyn PlotView, event: &PlotKeyEvent) -> bool {
        let Some(command) = self.key_bindings.get(&(event.key, event.modifiers)).cloned() else {
            return false;
        };
        command(view, event)
    }

    fn bind_key_down(&mut self, key: Key, modifiers: ModifierKeys, command: KeyCommand) {
        self.key_bindings.insert((key, modifiers), command);
    }
}
