mod support;

use plotview::core::{ClientSize, ScreenRect};
use plotview::error::PlotError;
use plotview::export::{logical_bounds, render_offscreen};
use plotview::model::ModelHandle;
use plotview::render::{Color, DrawCommand, RecordingRenderContext};

use support::{FakeModel, fake_model, harness};

#[test]
fn offscreen_render_always_refreshes_data() {
    let mut h = harness();
    let (model, log) = fake_model();
    h.surface.set_model(Some(model.clone()));
    h.surface.paint();

    let mut context = RecordingRenderContext::new();
    render_offscreen(&mut context, &model, ClientSize::new(300, 200), 96.0).expect("render");

    let log = log.lock();
    assert_eq!(log.updates, vec![true, true]);
    assert_eq!(
        log.renders.last().copied(),
        Some(ScreenRect::new(0.0, 0.0, 300.0, 200.0))
    );
}

#[test]
fn offscreen_render_does_not_touch_surface_state() {
    let mut h = harness();
    let (model, _log) = fake_model();
    h.surface.set_model(Some(model.clone()));
    h.surface.paint();

    let mut context = RecordingRenderContext::new();
    render_offscreen(&mut context, &model, ClientSize::new(300, 200), 96.0).expect("render");

    assert_eq!(model.attached_view(), Some(h.surface.id()));
    assert!(!h.surface.pending_invalidation().is_pending());
}

#[test]
fn offscreen_render_fills_visible_background_first() {
    let background = Color::rgb(1.0, 1.0, 0.9);
    let (model, _log) = FakeModel::new();
    let model = ModelHandle::new(model.with_background(background));

    let mut context = RecordingRenderContext::new();
    render_offscreen(&mut context, &model, ClientSize::new(120, 80), 96.0).expect("render");

    assert_eq!(
        context.commands().first(),
        Some(&DrawCommand::Rectangle {
            rect: ScreenRect::new(0.0, 0.0, 120.0, 80.0),
            fill: Some(background),
            stroke: None,
        })
    );
}

#[test]
fn transparent_background_is_not_filled() {
    let (model, _log) = FakeModel::new();
    let model = ModelHandle::new(model.with_background(Color::TRANSPARENT));

    let mut context = RecordingRenderContext::new();
    render_offscreen(&mut context, &model, ClientSize::new(120, 80), 96.0).expect("render");

    assert!(context.rectangles().is_empty());
}

#[test]
fn resolution_scales_logical_bounds() {
    let bounds = logical_bounds(ClientSize::new(400, 300), 192.0).expect("bounds");
    assert_eq!(bounds, ScreenRect::new(0.0, 0.0, 200.0, 150.0));
}

#[test]
fn empty_export_size_is_rejected() {
    let (model, log) = fake_model();
    let mut context = RecordingRenderContext::new();

    let err = render_offscreen(&mut context, &model, ClientSize::new(0, 80), 96.0)
        .expect_err("zero width must fail");
    assert!(matches!(err, PlotError::InvalidViewport { width: 0, height: 80 }));
    assert!(log.lock().updates.is_empty());

    let err = logical_bounds(ClientSize::new(10, 10), 0.0).expect_err("zero dpi must fail");
    assert!(matches!(err, PlotError::InvalidData(_)));
}
