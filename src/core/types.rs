use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Process-unique identity of one plot surface instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

impl SurfaceId {
    pub(crate) fn next() -> Self {
        static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Size of the widget client area in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientSize {
    pub width: u32,
    pub height: u32,
}

impl ClientSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Full client rectangle anchored at the origin.
    #[must_use]
    pub fn bounds(self) -> ScreenRect {
        ScreenRect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    #[must_use]
    pub fn center(self) -> ScreenPoint {
        ScreenPoint::new(f64::from(self.width) * 0.5, f64::from(self.height) * 0.5)
    }
}

/// Point in widget-local pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[must_use]
    pub fn offset_from(self, origin: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(self.x - origin.x, self.y - origin.y)
    }
}

/// Axis-aligned rectangle in widget-local pixel space.
///
/// `width` and `height` may be negative while a drag gesture is in progress;
/// call [`ScreenRect::normalized`] before drawing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rectangle spanning two arbitrary corners.
    #[must_use]
    pub fn from_corners(a: ScreenPoint, b: ScreenPoint) -> Self {
        Self::new(a.x, a.y, b.x - a.x, b.y - a.y).normalized()
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn center(self) -> ScreenPoint {
        ScreenPoint::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    #[must_use]
    pub fn normalized(self) -> Self {
        let (left, width) = if self.width < 0.0 {
            (self.left + self.width, -self.width)
        } else {
            (self.left, self.width)
        };
        let (top, height) = if self.height < 0.0 {
            (self.top + self.height, -self.height)
        } else {
            (self.top, self.height)
        };
        Self::new(left, top, width, height)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    #[must_use]
    pub fn contains(self, point: ScreenPoint) -> bool {
        let rect = self.normalized();
        point.x >= rect.left
            && point.x <= rect.right()
            && point.y >= rect.top
            && point.y <= rect.bottom()
    }

    /// Normalized copy truncated to whole device pixels.
    #[must_use]
    pub fn snapped_to_pixels(self) -> Self {
        let rect = self.normalized();
        Self::new(
            rect.left.trunc(),
            rect.top.trunc(),
            rect.width.trunc(),
            rect.height.trunc(),
        )
    }
}
