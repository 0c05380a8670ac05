mod support;

use std::sync::Arc;

use approx::assert_relative_eq;
use plotview::core::{ClientSize, ScreenRect};
use plotview::error::PlotResult;
use plotview::export::{RasterImage, SnapshotExporter};
use plotview::input::{
    Key, ModifierKeys, MouseButton, PlotKeyEvent, PlotMouseDownEvent, PlotMouseEvent,
    PlotWheelEvent,
};
use plotview::interaction::{
    DefaultPlotController, InteractionMode, KeyCommand, PlotController, PlotView, commands,
    shared_controller,
};
use plotview::model::ModelHandle;
use plotview::surface::PlotCursors;

use support::{double_click, down, fake_model, harness, key, moved, point, up, wheel};

#[test]
fn right_drag_pans_with_pan_cursor() {
    let mut h = harness();
    let (model, log) = fake_model();
    h.surface.set_model(Some(model));
    h.surface.paint();

    assert!(h.surface.handle_mouse_down(&down(50.0, 50.0, MouseButton::Right, ModifierKeys::NONE)));
    assert_eq!(h.host.cursor().as_deref(), Some("move"));

    h.surface.handle_mouse_move(&moved(60.0, 45.0));
    h.surface.handle_mouse_move(&moved(70.0, 45.0));
    assert_eq!(log.lock().pans, vec![point(10.0, -5.0), point(10.0, 0.0)]);

    assert!(h.surface.handle_mouse_up(&up(70.0, 45.0, MouseButton::Right)));
    assert_eq!(h.host.cursor().as_deref(), Some("default"));

    h.surface.paint();
    assert_eq!(log.lock().updates, vec![true, false]);
}

#[test]
fn release_of_another_button_does_not_end_the_gesture() {
    let mut h = harness();
    let (model, _log) = fake_model();
    h.surface.set_model(Some(model));

    h.surface.handle_mouse_down(&down(50.0, 50.0, MouseButton::Right, ModifierKeys::NONE));
    assert!(!h.surface.handle_mouse_up(&up(50.0, 50.0, MouseButton::Left)));
    assert_eq!(h.host.cursor().as_deref(), Some("move"));
}

#[test]
fn shift_constrains_zoom_to_the_horizontal_axis() {
    let mut h = harness();
    let (model, log) = fake_model();
    h.surface.set_model(Some(model));

    h.surface.handle_mouse_down(&down(20.0, 40.0, MouseButton::Middle, ModifierKeys::SHIFT));
    assert_eq!(h.host.cursor().as_deref(), Some("col-resize"));
    h.surface.handle_mouse_move(&moved(80.0, 60.0));
    assert_eq!(
        h.surface.zoom_rectangle(),
        Some(ScreenRect::new(20.0, 0.0, 60.0, 150.0))
    );

    h.surface.handle_mouse_up(&up(80.0, 60.0, MouseButton::Middle));
    assert_eq!(log.lock().zoom_rectangles, vec![ScreenRect::new(20.0, 0.0, 60.0, 150.0)]);
}

#[test]
fn alt_constrains_zoom_to_the_vertical_axis() {
    let mut h = harness();
    let (model, _log) = fake_model();
    h.surface.set_model(Some(model));

    h.surface.handle_mouse_down(&down(20.0, 40.0, MouseButton::Middle, ModifierKeys::ALT));
    assert_eq!(h.host.cursor().as_deref(), Some("row-resize"));
    h.surface.handle_mouse_move(&moved(80.0, 60.0));
    assert_eq!(
        h.surface.zoom_rectangle(),
        Some(ScreenRect::new(0.0, 40.0, 200.0, 20.0))
    );
}

#[test]
fn tiny_zoom_rectangle_is_ignored() {
    let mut h = harness();
    let (model, log) = fake_model();
    h.surface.set_model(Some(model));

    h.surface.handle_mouse_down(&down(20.0, 20.0, MouseButton::Middle, ModifierKeys::NONE));
    h.surface.handle_mouse_move(&moved(21.0, 60.0));
    h.surface.handle_mouse_up(&up(21.0, 60.0, MouseButton::Middle));

    assert!(log.lock().zoom_rectangles.is_empty());
    assert_eq!(h.surface.zoom_rectangle(), None);
}

#[test]
fn leaving_the_surface_cancels_the_zoom() {
    let mut h = harness();
    let (model, log) = fake_model();
    h.surface.set_model(Some(model));

    h.surface.handle_mouse_down(&down(20.0, 20.0, MouseButton::Middle, ModifierKeys::NONE));
    h.surface.handle_mouse_move(&moved(90.0, 90.0));
    assert!(h.surface.handle_mouse_leave(&moved(90.0, 90.0)));

    assert_eq!(h.surface.zoom_rectangle(), None);
    assert!(log.lock().zoom_rectangles.is_empty());
    assert_eq!(h.host.cursor().as_deref(), Some("default"));
}

#[test]
fn middle_double_click_resets_axes() {
    let mut h = harness();
    let (model, log) = fake_model();
    h.surface.set_model(Some(model));

    assert!(h.surface.handle_mouse_down(&double_click(30.0, 30.0, MouseButton::Middle)));
    assert_eq!(log.lock().resets, 1);
    assert_eq!(h.surface.zoom_rectangle(), None);
}

#[test]
fn wheel_zooms_around_the_pointer() {
    let mut h = harness();
    let (model, log) = fake_model();
    h.surface.set_model(Some(model));

    assert!(h.surface.handle_mouse_wheel(&wheel(40.0, 50.0, 120)));
    assert!(h.surface.handle_mouse_wheel(&wheel(40.0, 50.0, -240)));
    assert!(!h.surface.handle_mouse_wheel(&wheel(40.0, 50.0, 0)));

    let log = log.lock();
    assert_eq!(log.zooms.len(), 2);
    assert_eq!(log.zooms[0].0, point(40.0, 50.0));
    assert_relative_eq!(log.zooms[0].1, 1.2, epsilon = 1e-12);
    assert_relative_eq!(log.zooms[1].1, 1.0 / 1.44, epsilon = 1e-12);
}

#[test]
fn input_without_a_model_is_not_handled() {
    let mut h = harness();
    assert!(!h.surface.handle_mouse_wheel(&wheel(40.0, 50.0, 120)));
    assert!(!h.surface.handle_key_down(&key(Key::A, ModifierKeys::NONE)));
}

#[test]
fn key_a_resets_axes() {
    let mut h = harness();
    let (model, log) = fake_model();
    h.surface.set_model(Some(model));

    assert!(h.surface.handle_key_down(&key(Key::A, ModifierKeys::NONE)));
    assert!(!h.surface.handle_key_down(&key(Key::A, ModifierKeys::SHIFT)));
    assert_eq!(log.lock().resets, 1);
}

struct SolidExporter;

impl SnapshotExporter for SolidExporter {
    fn export_snapshot(&self, model: &ModelHandle, size: ClientSize) -> PlotResult<RasterImage> {
        model.with(|model| model.update(true))?;
        let stride = size.width as usize * 4;
        RasterImage::new(
            size.width,
            size.height,
            stride,
            96.0,
            vec![0xFF; stride * size.height as usize],
        )
    }
}

#[test]
fn ctrl_c_copies_an_image_of_the_client_area() {
    let h = harness();
    let host = h.host.clone();
    let mut surface = h.surface.with_exporter(Box::new(SolidExporter));
    let (model, log) = fake_model();
    surface.set_model(Some(model));
    surface.paint();

    assert!(surface.handle_key_down(&key(Key::C, ModifierKeys::CONTROL)));

    let image = host.clipboard_image().expect("clipboard image");
    assert_eq!((image.width(), image.height()), (200, 150));
    assert_eq!(log.lock().updates, vec![true, true]);
}

#[test]
fn ctrl_c_without_exporter_is_not_handled() {
    let mut h = harness();
    let (model, _log) = fake_model();
    h.surface.set_model(Some(model));

    assert!(!h.surface.handle_key_down(&key(Key::C, ModifierKeys::CONTROL)));
    assert!(h.host.clipboard_image().is_none());
    assert!(h.surface.copy_image_to_clipboard().is_err());
}

#[test]
fn custom_key_bindings_reach_the_view() {
    let mut h = harness();
    let (model, _log) = fake_model();
    h.surface.set_model(Some(model));

    h.surface.default_controller().lock().bind_key_down(
        Key::T,
        ModifierKeys::CONTROL | ModifierKeys::SHIFT,
        commands::copy_text("hello"),
    );

    assert!(!h.surface.handle_key_down(&key(Key::T, ModifierKeys::CONTROL)));
    assert!(h.surface.handle_key_down(&key(Key::T, ModifierKeys::CONTROL | ModifierKeys::SHIFT)));
    assert_eq!(h.host.clipboard_text().as_deref(), Some("hello"));
}

#[test]
fn default_controller_bindings_keep_registration_order() {
    let mut controller = DefaultPlotController::new();
    controller.bind_key_down(Key::F5, ModifierKeys::NONE, commands::reset_axes());

    let bound: Vec<_> = controller.key_bindings().collect();
    assert_eq!(
        bound,
        vec![(Key::A, ModifierKeys::NONE), (Key::F5, ModifierKeys::NONE)]
    );
    assert!(controller.unbind_key_down(Key::A, ModifierKeys::NONE).is_some());
    assert!(!controller.is_key_bound(Key::A, ModifierKeys::NONE));
    assert_eq!(controller.mode(), InteractionMode::Idle);
}

/// Controller that only counts events.
#[derive(Default)]
struct CountingController {
    events: Arc<parking_lot::Mutex<Vec<&'static str>>>,
}

impl PlotController for CountingController {
    fn handle_mouse_down(&mut self, _view: &mut dyn PlotView, _event: &PlotMouseDownEvent) -> bool {
        self.events.lock().push("down");
        true
    }

    fn handle_mouse_move(&mut self, _view: &mut dyn PlotView, _event: &PlotMouseEvent) -> bool {
        self.events.lock().push("move");
        true
    }

    fn handle_mouse_up(&mut self, _view: &mut dyn PlotView, _event: &PlotMouseEvent) -> bool {
        self.events.lock().push("up");
        true
    }

    fn handle_mouse_enter(&mut self, _view: &mut dyn PlotView, _event: &PlotMouseEvent) -> bool {
        self.events.lock().push("enter");
        true
    }

    fn handle_mouse_leave(&mut self, _view: &mut dyn PlotView, _event: &PlotMouseEvent) -> bool {
        self.events.lock().push("leave");
        true
    }

    fn handle_mouse_wheel(&mut self, _view: &mut dyn PlotView, _event: &PlotWheelEvent) -> bool {
        self.events.lock().push("wheel");
        true
    }

    fn handle_key_down(&mut self, _view: &mut dyn PlotView, _event: &PlotKeyEvent) -> bool {
        self.events.lock().push("key");
        true
    }

    fn bind_key_down(&mut self, _key: Key, _modifiers: ModifierKeys, _command: KeyCommand) {}
}

#[test]
fn explicit_controller_replaces_the_default_one() {
    let mut h = harness();
    let counting = CountingController::default();
    let events = Arc::clone(&counting.events);
    let controller = shared_controller(counting);

    h.surface.set_controller(Some(Arc::clone(&controller)));
    assert!(Arc::ptr_eq(&h.surface.actual_controller(), &controller));

    h.surface.handle_mouse_enter(&moved(1.0, 1.0));
    h.surface.handle_mouse_down(&down(1.0, 1.0, MouseButton::Left, ModifierKeys::NONE));
    h.surface.handle_mouse_move(&moved(2.0, 2.0));
    h.surface.handle_mouse_up(&up(2.0, 2.0, MouseButton::Left));
    h.surface.handle_mouse_wheel(&wheel(2.0, 2.0, 120));
    h.surface.handle_key_down(&key(Key::Z, ModifierKeys::NONE));
    h.surface.handle_mouse_leave(&moved(2.0, 2.0));
    assert_eq!(
        *events.lock(),
        vec!["enter", "down", "move", "up", "wheel", "key", "leave"]
    );

    h.surface.set_controller(None);
    assert!(h.surface.controller().is_none());
    assert!(Arc::ptr_eq(
        &h.surface.actual_controller(),
        &h.surface.default_controller()
    ));
}

#[test]
fn custom_cursor_names_are_applied_immediately() {
    let mut h = harness();
    let (model, _log) = fake_model();
    h.surface.set_model(Some(model));
    h.surface.handle_mouse_down(&down(5.0, 5.0, MouseButton::Right, ModifierKeys::NONE));

    h.surface.set_cursors(PlotCursors {
        pan: "grabbing".to_owned(),
        ..PlotCursors::default()
    });
    assert_eq!(h.host.cursor().as_deref(), Some("grabbing"));
}

#[test]
fn disposed_surface_ignores_input() {
    let mut h = harness();
    let (model, log) = fake_model();
    h.surface.set_model(Some(model));
    h.surface.dispose();

    assert!(!h.surface.handle_mouse_wheel(&wheel(1.0, 1.0, 120)));
    assert!(log.lock().zooms.is_empty());
}
