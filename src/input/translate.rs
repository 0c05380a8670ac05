use crate::core::ScreenPoint;
use crate::input::{
    Key, ModifierKeys, MouseButton, PlotKeyEvent, PlotMouseDownEvent, PlotMouseEvent,
    PlotWheelEvent,
};

/// Wheel delta reported for one scroll notch.
pub const WHEEL_DELTA_PER_NOTCH: f64 = 120.0;

/// Live keyboard modifier state.
///
/// Some toolkit backends leave the modifier field of pointer events empty, so
/// translation always asks the keyboard directly.
pub trait KeyboardState {
    fn modifiers(&self) -> ModifierKeys;
}

/// Keyboard state that never reports modifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoModifiers;

impl KeyboardState for NoModifiers {
    fn modifiers(&self) -> ModifierKeys {
        ModifierKeys::NONE
    }
}

/// Fixed modifier state, handy for scripted input.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedModifiers(pub ModifierKeys);

impl KeyboardState for FixedModifiers {
    fn modifiers(&self) -> ModifierKeys {
        self.0
    }
}

/// Maps X11-numbered pointer buttons (1 left, 2 middle, 3 right, 8/9 extra).
#[must_use]
pub fn mouse_button_from_native(button: u32) -> MouseButton {
    match button {
        1 => MouseButton::Left,
        2 => MouseButton::Middle,
        3 => MouseButton::Right,
        8 => MouseButton::XButton1,
        9 => MouseButton::XButton2,
        _ => MouseButton::None,
    }
}

/// Converts a vertical scroll amount (positive = down) into a wheel delta.
#[must_use]
pub fn wheel_delta_from_scroll(scroll_dy: f64) -> i32 {
    (-scroll_dy * WHEEL_DELTA_PER_NOTCH).round() as i32
}

/// Turns toolkit-native event data into interaction-protocol events.
///
/// Coordinates pass through unchanged: widget-local pixels are the protocol's
/// coordinate space.
#[derive(Debug, Clone, Default)]
pub struct InputTranslator<K: KeyboardState> {
    keyboard: K,
}

impl<K: KeyboardState> InputTranslator<K> {
    #[must_use]
    pub fn new(keyboard: K) -> Self {
        Self { keyboard }
    }

    #[must_use]
    pub fn keyboard(&self) -> &K {
        &self.keyboard
    }

    #[must_use]
    pub fn mouse_down(
        &self,
        x: f64,
        y: f64,
        native_button: u32,
        click_count: u32,
    ) -> PlotMouseDownEvent {
        debug_assert!(click_count > 0, "button press must report at least one click");
        PlotMouseDownEvent {
            position: position(x, y),
            button: mouse_button_from_native(native_button),
            click_count: click_count.max(1),
            modifiers: self.keyboard.modifiers(),
        }
    }

    #[must_use]
    pub fn mouse_move(&self, x: f64, y: f64) -> PlotMouseEvent {
        self.pointer(x, y, MouseButton::None)
    }

    #[must_use]
    pub fn mouse_up(&self, x: f64, y: f64, native_button: u32) -> PlotMouseEvent {
        self.pointer(x, y, mouse_button_from_native(native_button))
    }

    #[must_use]
    pub fn mouse_enter(&self, x: f64, y: f64) -> PlotMouseEvent {
        self.pointer(x, y, MouseButton::None)
    }

    #[must_use]
    pub fn mouse_leave(&self, x: f64, y: f64) -> PlotMouseEvent {
        self.pointer(x, y, MouseButton::None)
    }

    #[must_use]
    pub fn wheel(&self, x: f64, y: f64, scroll_dy: f64) -> PlotWheelEvent {
        PlotWheelEvent {
            position: position(x, y),
            delta: wheel_delta_from_scroll(scroll_dy),
            modifiers: self.keyboard.modifiers(),
        }
    }

    #[must_use]
    pub fn key_down(&self, key_name: &str) -> PlotKeyEvent {
        PlotKeyEvent {
            key: Key::from_name(key_name),
            modifiers: self.keyboard.modifiers(),
        }
    }

    fn pointer(&self, x: f64, y: f64, button: MouseButton) -> PlotMouseEvent {
        PlotMouseEvent {
            position: position(x, y),
            button,
            modifiers: self.keyboard.modifiers(),
        }
    }
}

fn position(x: f64, y: f64) -> ScreenPoint {
    debug_assert!(x.is_finite() && y.is_finite(), "pointer coordinates must be finite");
    ScreenPoint::new(x, y)
}
