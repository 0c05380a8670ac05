#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use plotview::core::{ScreenPoint, ScreenRect};
use plotview::error::PlotResult;
use plotview::model::{AxisExtent, PlotModel, TrackerHitResult};
use plotview::render::{Color, FontSpec, RenderContext, StrokeStyle, TextPrimitive};

const SAMPLES: usize = 400;
const DEFAULT_RANGE: (f64, f64) = (0.0, 4.0 * std::f64::consts::PI);
const Y_RANGE: (f64, f64) = (-1.5, 1.5);
const MARGIN: f64 = 32.0;

/// Phase shared between a data producer and the model.
#[derive(Debug, Clone, Default)]
pub struct PhaseSource(Arc<AtomicU64>);

impl PhaseSource {
    pub fn advance(&self, step: f64) {
        let _ = self
            .0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                Some((f64::from_bits(bits) + step).to_bits())
            });
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }
}

/// Scrolling sine wave with pan, zoom and tracker support.
pub struct SineModel {
    title: String,
    source: PhaseSource,
    phase: f64,
    x_range: (f64, f64),
    samples: Vec<(f64, f64)>,
    plot_area: ScreenRect,
}

impl SineModel {
    pub fn new(title: impl Into<String>, source: PhaseSource) -> Self {
        Self {
            title: title.into(),
            source,
            phase: 0.0,
            x_range: DEFAULT_RANGE,
            samples: Vec::new(),
            plot_area: ScreenRect::default(),
        }
    }

    fn to_screen(&self, x: f64, y: f64) -> ScreenPoint {
        let area = self.plot_area;
        let (x0, x1) = self.x_range;
        ScreenPoint::new(
            area.left + (x - x0) / (x1 - x0) * area.width,
            area.bottom() - (y - Y_RANGE.0) / (Y_RANGE.1 - Y_RANGE.0) * area.height,
        )
    }

    fn data_x(&self, screen_x: f64) -> f64 {
        let area = self.plot_area;
        let (x0, x1) = self.x_range;
        if area.width <= 0.0 {
            return x0;
        }
        x0 + (screen_x - area.left) / area.width * (x1 - x0)
    }
}

impl PlotModel for SineModel {
    fn update(&mut self, force_data_refresh: bool) -> PlotResult<()> {
        if force_data_refresh {
            self.phase = self.source.get();
        }
        if force_data_refresh || self.samples.is_empty() {
            let (x0, x1) = self.x_range;
            let step = (x1 - x0) / (SAMPLES - 1) as f64;
            self.samples = (0..SAMPLES)
                .map(|index| {
                    let x = x0 + step * index as f64;
                    (x, (x + self.phase).sin())
                })
                .collect();
        }
        Ok(())
    }

    fn render(&mut self, context: &mut dyn RenderContext, bounds: ScreenRect) -> PlotResult<()> {
        self.plot_area = ScreenRect::new(
            bounds.left + MARGIN,
            bounds.top + MARGIN,
            (bounds.width - 2.0 * MARGIN).max(0.0),
            (bounds.height - 2.0 * MARGIN).max(0.0),
        );

        let frame = StrokeStyle::solid(Color::rgb(0.3, 0.3, 0.3), 1.0);
        context.draw_rectangle(self.plot_area, None, Some(&frame))?;
        context.draw_text(&TextPrimitive::new(
            self.title.clone(),
            ScreenPoint::new(bounds.left + MARGIN, bounds.top + 8.0),
            FontSpec::sans(13.0).bold(),
            Color::BLACK,
        ))?;

        if self.samples.len() < 2 {
            return Ok(());
        }
        let points: Vec<ScreenPoint> = self
            .samples
            .iter()
            .map(|&(x, y)| self.to_screen(x, y))
            .collect();
        if context.set_clip(self.plot_area) {
            let line = StrokeStyle::solid(Color::rgb(0.1, 0.4, 0.8), 1.5);
            let drawn = context.draw_polyline(&points, &line);
            context.reset_clip();
            drawn?;
        }
        Ok(())
    }

    fn background(&self) -> Option<Color> {
        Some(Color::WHITE)
    }

    fn tracker_hit(&self, position: ScreenPoint, _snap: bool) -> Option<TrackerHitResult> {
        if !self.plot_area.contains(position) {
            return None;
        }
        let x = self.data_x(position.x);
        let &(sample_x, sample_y) = self
            .samples
            .iter()
            .min_by(|a, b| (a.0 - x).abs().total_cmp(&(b.0 - x).abs()))?;
        let area = self.plot_area;
        Some(
            TrackerHitResult::new(
                self.to_screen(sample_x, sample_y),
                format!("x = {sample_x:.3}\ny = {sample_y:.3}"),
            )
            .with_axes(
                AxisExtent::new(area.left, area.right()),
                AxisExtent::new(area.top, area.bottom()),
            ),
        )
    }

    fn pan_by(&mut self, delta: ScreenPoint) {
        if self.plot_area.width <= 0.0 {
            return;
        }
        let (x0, x1) = self.x_range;
        let shift = -delta.x / self.plot_area.width * (x1 - x0);
        self.x_range = (x0 + shift, x1 + shift);
        self.samples.clear();
    }

    fn zoom_at(&mut self, center: ScreenPoint, factor: f64) {
        if factor <= 0.0 {
            return;
        }
        let anchor = self.data_x(center.x);
        let (x0, x1) = self.x_range;
        self.x_range = (anchor - (anchor - x0) / factor, anchor + (x1 - anchor) / factor);
        self.samples.clear();
    }

    fn zoom_to_rectangle(&mut self, rect: ScreenRect) {
        let left = self.data_x(rect.left);
        let right = self.data_x(rect.right());
        if right > left {
            self.x_range = (left, right);
            self.samples.clear();
        }
    }

    fn reset_axes(&mut self) {
        self.x_range = DEFAULT_RANGE;
        self.samples.clear();
    }
}
