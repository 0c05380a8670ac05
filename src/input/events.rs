use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::core::ScreenPoint;

bitflags! {
    /// Modifier keys held during an input event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ModifierKeys: u8 {
        const NONE = 0;
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
        /// Super/Meta key.
        const WINDOWS = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    None,
    Left,
    Middle,
    Right,
    XButton1,
    XButton2,
}

/// Keys the interaction protocol can bind commands to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    D0,
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
    D7,
    D8,
    D9,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    Backspace,
    Tab,
    Enter,
    Escape,
    Space,
    Add,
    Subtract,
    Unknown,
}

impl Key {
    const LETTERS: [Key; 26] = [
        Key::A,
        Key::B,
        Key::C,
        Key::D,
        Key::E,
        Key::F,
        Key::G,
        Key::H,
        Key::I,
        Key::J,
        Key::K,
        Key::L,
        Key::M,
        Key::N,
        Key::O,
        Key::P,
        Key::Q,
        Key::R,
        Key::S,
        Key::T,
        Key::U,
        Key::V,
        Key::W,
        Key::X,
        Key::Y,
        Key::Z,
    ];

    const DIGITS: [Key; 10] = [
        Key::D0,
        Key::D1,
        Key::D2,
        Key::D3,
        Key::D4,
        Key::D5,
        Key::D6,
        Key::D7,
        Key::D8,
        Key::D9,
    ];

    const FUNCTION_KEYS: [Key; 12] = [
        Key::F1,
        Key::F2,
        Key::F3,
        Key::F4,
        Key::F5,
        Key::F6,
        Key::F7,
        Key::F8,
        Key::F9,
        Key::F10,
        Key::F11,
        Key::F12,
    ];

    /// Maps an X11/GDK key name (`"a"`, `"Left"`, `"KP_Add"`, ...) to a key.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let mut chars = name.chars();
        if let (Some(ch), None) = (chars.next(), chars.clone().next()) {
            if ch.is_ascii_alphabetic() {
                let index = (ch.to_ascii_lowercase() as u8 - b'a') as usize;
                return Self::LETTERS[index];
            }
            if let Some(digit) = ch.to_digit(10) {
                return Self::DIGITS[digit as usize];
            }
        }

        if let Some(number) = name
            .strip_prefix('F')
            .and_then(|rest| rest.parse::<usize>().ok())
            .filter(|number| (1..=12).contains(number))
        {
            return Self::FUNCTION_KEYS[number - 1];
        }

        if let Some(digit) = name
            .strip_prefix("KP_")
            .and_then(|rest| rest.parse::<usize>().ok())
            .filter(|digit| *digit <= 9)
        {
            return Self::DIGITS[digit];
        }

        match name {
            "Left" | "KP_Left" => Self::Left,
            "Right" | "KP_Right" => Self::Right,
            "Up" | "KP_Up" => Self::Up,
            "Down" | "KP_Down" => Self::Down,
            "Home" | "KP_Home" => Self::Home,
            "End" | "KP_End" => Self::End,
            "Page_Up" | "Prior" | "KP_Page_Up" => Self::PageUp,
            "Page_Down" | "Next" | "KP_Page_Down" => Self::PageDown,
            "Insert" | "KP_Insert" => Self::Insert,
            "Delete" | "KP_Delete" => Self::Delete,
            "BackSpace" => Self::Backspace,
            "Tab" | "ISO_Left_Tab" => Self::Tab,
            "Return" | "KP_Enter" => Self::Enter,
            "Escape" => Self::Escape,
            "space" | "KP_Space" => Self::Space,
            "plus" | "KP_Add" => Self::Add,
            "minus" | "KP_Subtract" => Self::Subtract,
            _ => Self::Unknown,
        }
    }
}

/// Pointer event in the interaction protocol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotMouseEvent {
    pub position: ScreenPoint,
    pub button: MouseButton,
    pub modifiers: ModifierKeys,
}

/// Button press; `click_count` is 2 for a double click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotMouseDownEvent {
    pub position: ScreenPoint,
    pub button: MouseButton,
    pub click_count: u32,
    pub modifiers: ModifierKeys,
}

impl PlotMouseDownEvent {
    #[must_use]
    pub fn as_mouse_event(&self) -> PlotMouseEvent {
        PlotMouseEvent {
            position: self.position,
            button: self.button,
            modifiers: self.modifiers,
        }
    }
}

/// Wheel event; `delta` is 120 per notch, positive when scrolling up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotWheelEvent {
    pub position: ScreenPoint,
    pub delta: i32,
    pub modifiers: ModifierKeys,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotKeyEvent {
    pub key: Key,
    pub modifiers: ModifierKeys,
}
