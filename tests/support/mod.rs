#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use plotview::core::{ScreenPoint, ScreenRect};
use plotview::error::{PlotError, PlotResult};
use plotview::input::{
    Key, ModifierKeys, MouseButton, PlotKeyEvent, PlotMouseDownEvent, PlotMouseEvent,
    PlotWheelEvent,
};
use plotview::model::{ModelHandle, PlotModel, TrackerHitResult};
use plotview::render::{Color, RecordingRenderContext, RenderContext, StrokeStyle};
use plotview::surface::{CountingRedraw, HeadlessHost, PlotSurface, RedrawRequester};

/// Everything the fake model was asked to do.
#[derive(Debug, Default, Clone)]
pub struct ModelLog {
    pub updates: Vec<bool>,
    pub renders: Vec<ScreenRect>,
    pub pans: Vec<ScreenPoint>,
    pub zooms: Vec<(ScreenPoint, f64)>,
    pub zoom_rectangles: Vec<ScreenRect>,
    pub resets: usize,
}

pub type SharedLog = Arc<Mutex<ModelLog>>;

pub struct FakeModel {
    log: SharedLog,
    background: Option<Color>,
    tracker: Option<TrackerHitResult>,
    fail_render: bool,
    failing_updates: usize,
}

impl FakeModel {
    pub fn new() -> (Self, SharedLog) {
        let log = SharedLog::default();
        (
            Self {
                log: Arc::clone(&log),
                background: None,
                tracker: None,
                fail_render: false,
                failing_updates: 0,
            },
            log,
        )
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_tracker_hit(mut self, hit: TrackerHitResult) -> Self {
        self.tracker = Some(hit);
        self
    }

    pub fn failing_render(mut self) -> Self {
        self.fail_render = true;
        self
    }

    /// The next `count` updates are logged, then fail.
    pub fn failing_updates(mut self, count: usize) -> Self {
        self.failing_updates = count;
        self
    }
}

impl PlotModel for FakeModel {
    fn update(&mut self, force_data_refresh: bool) -> PlotResult<()> {
        self.log.lock().updates.push(force_data_refresh);
        if self.failing_updates > 0 {
            self.failing_updates -= 1;
            return Err(PlotError::InvalidData("axis range is empty".to_owned()));
        }
        Ok(())
    }

    fn render(&mut self, context: &mut dyn RenderContext, bounds: ScreenRect) -> PlotResult<()> {
        self.log.lock().renders.push(bounds);
        if self.fail_render {
            return Err(PlotError::Render("series exploded".to_owned()));
        }
        context.draw_line(
            ScreenPoint::new(bounds.left, bounds.bottom()),
            ScreenPoint::new(bounds.right(), bounds.top),
            &StrokeStyle::solid(Color::BLACK, 1.0),
        )
    }

    fn background(&self) -> Option<Color> {
        self.background
    }

    fn tracker_hit(&self, _position: ScreenPoint, _snap: bool) -> Option<TrackerHitResult> {
        self.tracker.clone()
    }

    fn pan_by(&mut self, delta: ScreenPoint) {
        self.log.lock().pans.push(delta);
    }

    fn zoom_at(&mut self, center: ScreenPoint, factor: f64) {
        self.log.lock().zooms.push((center, factor));
    }

    fn zoom_to_rectangle(&mut self, rect: ScreenRect) {
        self.log.lock().zoom_rectangles.push(rect);
    }

    fn reset_axes(&mut self) {
        self.log.lock().resets += 1;
    }
}

pub fn fake_model() -> (ModelHandle, SharedLog) {
    let (model, log) = FakeModel::new();
    (ModelHandle::new(model), log)
}

pub struct Harness {
    pub surface: PlotSurface<RecordingRenderContext>,
    pub host: HeadlessHost,
    pub redraw: Arc<CountingRedraw>,
}

/// Headless 200×150 surface with no model.
pub fn harness() -> Harness {
    let host = HeadlessHost::new();
    let redraw = CountingRedraw::new();
    let mut surface = PlotSurface::new(
        RecordingRenderContext::new(),
        Box::new(host.clone()),
        Arc::clone(&redraw) as Arc<dyn RedrawRequester>,
    );
    surface.resize(200, 150);
    Harness {
        surface,
        host,
        redraw,
    }
}

pub fn point(x: f64, y: f64) -> ScreenPoint {
    ScreenPoint::new(x, y)
}

pub fn down(x: f64, y: f64, button: MouseButton, modifiers: ModifierKeys) -> PlotMouseDownEvent {
    PlotMouseDownEvent {
        position: point(x, y),
        button,
        click_count: 1,
        modifiers,
    }
}

pub fn double_click(x: f64, y: f64, button: MouseButton) -> PlotMouseDownEvent {
    PlotMouseDownEvent {
        click_count: 2,
        ..down(x, y, button, ModifierKeys::NONE)
    }
}

pub fn moved(x: f64, y: f64) -> PlotMouseEvent {
    PlotMouseEvent {
        position: point(x, y),
        button: MouseButton::None,
        modifiers: ModifierKeys::NONE,
    }
}

pub fn up(x: f64, y: f64, button: MouseButton) -> PlotMouseEvent {
    PlotMouseEvent {
        position: point(x, y),
        button,
        modifiers: ModifierKeys::NONE,
    }
}

pub fn wheel(x: f64, y: f64, delta: i32) -> PlotWheelEvent {
    PlotWheelEvent {
        position: point(x, y),
        delta,
        modifiers: ModifierKeys::NONE,
    }
}

pub fn key(key: Key, modifiers: ModifierKeys) -> PlotKeyEvent {
    PlotKeyEvent { key, modifiers }
}
