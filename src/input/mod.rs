//! Interaction-protocol input events and their translation from native data.

mod events;
mod translate;

pub use events::{
    Key, ModifierKeys, MouseButton, PlotKeyEvent, PlotMouseDownEvent, PlotMouseEvent,
    PlotWheelEvent,
};
pub use translate::{
    FixedModifiers, InputTranslator, KeyboardState, NoModifiers, WHEEL_DELTA_PER_NOTCH,
    mouse_button_from_native, wheel_delta_from_scroll,
};
