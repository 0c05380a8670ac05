use plotview::core::ScreenPoint;
use plotview::input::{
    FixedModifiers, InputTranslator, Key, ModifierKeys, MouseButton, NoModifiers,
    mouse_button_from_native, wheel_delta_from_scroll,
};

#[test]
fn native_buttons_map_to_protocol_buttons() {
    assert_eq!(mouse_button_from_native(1), MouseButton::Left);
    assert_eq!(mouse_button_from_native(2), MouseButton::Middle);
    assert_eq!(mouse_button_from_native(3), MouseButton::Right);
    assert_eq!(mouse_button_from_native(8), MouseButton::XButton1);
    assert_eq!(mouse_button_from_native(9), MouseButton::XButton2);
    assert_eq!(mouse_button_from_native(0), MouseButton::None);
    assert_eq!(mouse_button_from_native(4), MouseButton::None);
}

#[test]
fn scroll_amounts_become_wheel_notches() {
    assert_eq!(wheel_delta_from_scroll(-1.0), 120);
    assert_eq!(wheel_delta_from_scroll(1.0), -120);
    assert_eq!(wheel_delta_from_scroll(0.5), -60);
    assert_eq!(wheel_delta_from_scroll(0.0), 0);
}

#[test]
fn every_event_reads_live_modifiers() {
    let translator =
        InputTranslator::new(FixedModifiers(ModifierKeys::CONTROL | ModifierKeys::ALT));

    let down = translator.mouse_down(3.0, 4.0, 1, 2);
    assert_eq!(down.position, ScreenPoint::new(3.0, 4.0));
    assert_eq!(down.button, MouseButton::Left);
    assert_eq!(down.click_count, 2);
    assert!(down.modifiers.contains(ModifierKeys::CONTROL));
    assert!(down.modifiers.contains(ModifierKeys::ALT));
    assert!(!down.modifiers.contains(ModifierKeys::SHIFT));

    let up = translator.mouse_up(3.0, 4.0, 3);
    assert_eq!(up.button, MouseButton::Right);
    assert_eq!(up.modifiers, down.modifiers);

    let wheel = translator.wheel(5.0, 6.0, -2.0);
    assert_eq!(wheel.delta, 240);
    assert_eq!(wheel.modifiers, down.modifiers);

    let key = translator.key_down("c");
    assert_eq!(key.key, Key::C);
    assert_eq!(key.modifiers, down.modifiers);
}

#[test]
fn pointer_events_carry_no_button() {
    let translator = InputTranslator::new(NoModifiers);

    for event in [
        translator.mouse_move(1.0, 2.0),
        translator.mouse_enter(1.0, 2.0),
        translator.mouse_leave(1.0, 2.0),
    ] {
        assert_eq!(event.button, MouseButton::None);
        assert!(event.modifiers.is_empty());
        assert_eq!(event.position, ScreenPoint::new(1.0, 2.0));
    }
}

#[test]
fn unknown_key_names_map_to_unknown() {
    let translator = InputTranslator::new(NoModifiers);
    assert_eq!(translator.key_down("XF86AudioPlay").key, Key::Unknown);
    assert_eq!(translator.key_down("Escape").key, Key::Escape);
}
