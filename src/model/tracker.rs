use crate::core::ScreenPoint;

/// Screen-space span of one axis along its own orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisExtent {
    pub screen_min: f64,
    pub screen_max: f64,
}

impl AxisExtent {
    #[must_use]
    pub const fn new(screen_min: f64, screen_max: f64) -> Self {
        Self {
            screen_min,
            screen_max,
        }
    }

    /// Extent with `screen_min <= screen_max`.
    #[must_use]
    pub fn ordered(self) -> Self {
        if self.screen_min <= self.screen_max {
            self
        } else {
            Self::new(self.screen_max, self.screen_min)
        }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.screen_min.is_finite() && self.screen_max.is_finite()
    }
}

/// Snapshot of a tracker hit-test against a model.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerHitResult {
    pub x_axis: Option<AxisExtent>,
    pub y_axis: Option<AxisExtent>,
    pub position: ScreenPoint,
    /// Pre-formatted label; lines are separated by `\n`.
    pub text: String,
}

impl TrackerHitResult {
    #[must_use]
    pub fn new(position: ScreenPoint, text: impl Into<String>) -> Self {
        Self {
            x_axis: None,
            y_axis: None,
            position,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn with_axes(mut self, x_axis: AxisExtent, y_axis: AxisExtent) -> Self {
        self.x_axis = Some(x_axis);
        self.y_axis = Some(y_axis);
        self
    }
}
