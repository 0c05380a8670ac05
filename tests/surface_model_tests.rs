mod support;

use plotview::interaction::PlotView;
use plotview::render::{Color, DrawCommand};
use plotview::surface::{InvalidationState, PaintOutcome, PlotSurfaceConfig};

use support::{fake_model, harness};

#[test]
fn setting_the_same_model_is_a_no_op() {
    let mut h = harness();
    let (model, log) = fake_model();
    h.surface.set_model(Some(model.clone()));
    h.surface.paint();

    h.surface.set_model(Some(model.clone()));
    assert_eq!(h.surface.pending_invalidation(), InvalidationState::Clean);

    h.surface.paint();
    assert_eq!(log.lock().updates, vec![true]);
}

#[test]
fn replacing_the_model_detaches_the_previous_one() {
    let mut h = harness();
    let (first, first_log) = fake_model();
    let (second, second_log) = fake_model();

    h.surface.set_model(Some(first.clone()));
    h.surface.paint();
    h.surface.set_model(Some(second.clone()));

    assert_eq!(first.attached_view(), None);
    assert_eq!(second.attached_view(), Some(h.surface.id()));
    assert!(!first.invalidate_plot(true));

    h.surface.paint();
    assert_eq!(first_log.lock().renders.len(), 1);
    assert_eq!(second_log.lock().updates, vec![true]);
}

#[test]
fn clearing_the_model_stops_rendering_it() {
    let mut h = harness();
    let (model, log) = fake_model();
    h.surface.set_model(Some(model.clone()));
    h.surface.paint();

    h.surface.set_model(None);
    assert!(h.surface.model().is_none());
    assert_eq!(model.attached_view(), None);

    h.surface.render_context_mut().take_commands();
    assert_eq!(h.surface.paint(), PaintOutcome::Cleared);
    assert_eq!(
        h.surface.render_context().commands(),
        &[DrawCommand::Clear(None)]
    );
    assert_eq!(log.lock().renders.len(), 1);
}

#[test]
fn cleared_surface_uses_configured_background() {
    let background = Color::rgb(0.2, 0.2, 0.2);
    let h = harness();
    let mut surface = h
        .surface
        .with_config(PlotSurfaceConfig::default().with_default_background(Some(background)))
        .expect("config");

    surface.paint();
    assert_eq!(
        surface.render_context().commands().last(),
        Some(&DrawCommand::Clear(Some(background)))
    );
}

#[test]
fn model_moved_to_another_surface_is_shown_only_there() {
    let mut a = harness();
    let mut b = harness();
    let (model, log) = fake_model();

    a.surface.set_model(Some(model.clone()));
    b.surface.set_model(Some(model.clone()));

    assert_eq!(model.attached_view(), Some(b.surface.id()));
    assert!(a.surface.model().is_some());
    assert!(a.surface.actual_model().is_none());
    assert!(b.surface.actual_model().is_some());

    assert_eq!(a.surface.paint(), PaintOutcome::Detached);
    assert!(log.lock().renders.is_empty());

    assert!(b.surface.paint().is_rendered());
    assert_eq!(log.lock().renders.len(), 1);

    model.invalidate_plot(false);
    assert_eq!(b.surface.pending_invalidation(), InvalidationState::NeedsRedraw);
}

#[test]
fn abandoned_surface_does_not_steal_the_model_back() {
    let mut a = harness();
    let mut b = harness();
    let (model, _log) = fake_model();

    a.surface.set_model(Some(model.clone()));
    b.surface.set_model(Some(model.clone()));

    a.surface.set_model(Some(model.clone()));
    assert_eq!(model.attached_view(), Some(b.surface.id()));

    a.surface.set_model(None);
    assert_eq!(model.attached_view(), Some(b.surface.id()));

    a.surface.set_model(Some(model.clone()));
    assert_eq!(model.attached_view(), Some(a.surface.id()));
    assert!(b.surface.actual_model().is_none());
}

#[test]
fn dispose_is_idempotent() {
    let mut h = harness();
    let (model, _log) = fake_model();
    h.surface.set_model(Some(model.clone()));

    h.surface.dispose();
    h.surface.dispose();

    assert!(h.surface.is_disposed());
    assert_eq!(h.surface.render_context().release_count(), 1);
    assert_eq!(model.attached_view(), None);
    assert_eq!(h.surface.paint(), PaintOutcome::Disposed);
}

#[test]
fn disposed_surface_refuses_new_models() {
    let mut h = harness();
    h.surface.dispose();

    let (model, _log) = fake_model();
    h.surface.set_model(Some(model.clone()));

    assert!(h.surface.model().is_none());
    assert_eq!(model.attached_view(), None);
}

#[test]
fn dropping_a_surface_detaches_its_model() {
    let (model, _log) = fake_model();
    {
        let mut h = harness();
        h.surface.set_model(Some(model.clone()));
        assert!(model.attached_view().is_some());
    }
    assert_eq!(model.attached_view(), None);
    assert!(!model.invalidate_plot(true));
}
