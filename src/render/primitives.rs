use serde::{Deserialize, Serialize};

use crate::core::ScreenPoint;
use crate::error::{PlotError, PlotResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels.
    #[must_use]
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            f64::from(alpha) / 255.0,
        )
    }

    #[must_use]
    pub fn is_visible(self) -> bool {
        self.alpha > 0.0
    }

    pub fn validate(self) -> PlotResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(PlotError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Stroke parameters shared by lines and shape outlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    /// Alternating on/off lengths in pixels; empty means solid.
    #[serde(default)]
    pub dash: Vec<f64>,
    #[serde(default)]
    pub line_join: LineJoin,
}

impl StrokeStyle {
    #[must_use]
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: Vec::new(),
            line_join: LineJoin::Miter,
        }
    }

    #[must_use]
    pub fn dashed(color: Color, width: f64, dash: Vec<f64>) -> Self {
        Self {
            dash,
            ..Self::solid(color, width)
        }
    }

    #[must_use]
    pub fn with_line_join(mut self, line_join: LineJoin) -> Self {
        self.line_join = line_join;
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(PlotError::InvalidData(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        if self
            .dash
            .iter()
            .any(|segment| !segment.is_finite() || *segment < 0.0)
        {
            return Err(PlotError::InvalidData(
                "dash segments must be finite and >= 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size_px: f64,
    #[serde(default)]
    pub weight: FontWeight,
}

impl FontSpec {
    #[must_use]
    pub fn new(family: impl Into<String>, size_px: f64) -> Self {
        Self {
            family: family.into(),
            size_px,
            weight: FontWeight::Normal,
        }
    }

    #[must_use]
    pub fn sans(size_px: f64) -> Self {
        Self::new("Sans", size_px)
    }

    #[must_use]
    pub fn monospace(size_px: f64) -> Self {
        Self::new("Monospace", size_px)
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(PlotError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::sans(12.0)
    }
}

/// Horizontal text alignment relative to the text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextHAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to the text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextVAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Draw command for one (possibly multi-line) label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub anchor: ScreenPoint,
    pub font: FontSpec,
    pub color: Color,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(text: impl Into<String>, anchor: ScreenPoint, font: FontSpec, color: Color) -> Self {
        Self {
            text: text.into(),
            anchor,
            font,
            color,
            h_align: TextHAlign::Left,
            v_align: TextVAlign::Top,
        }
    }

    #[must_use]
    pub fn aligned(mut self, h_align: TextHAlign, v_align: TextVAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        if self.text.is_empty() {
            return Err(PlotError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.anchor.is_finite() {
            return Err(PlotError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        self.font.validate()?;
        self.color.validate()
    }

    /// Top-left corner of the text box once alignment is applied.
    #[must_use]
    pub fn origin_for(&self, extent: TextExtent) -> ScreenPoint {
        let x = match self.h_align {
            TextHAlign::Left => self.anchor.x,
            TextHAlign::Center => self.anchor.x - extent.width / 2.0,
            TextHAlign::Right => self.anchor.x - extent.width,
        };
        let y = match self.v_align {
            TextVAlign::Top => self.anchor.y,
            TextVAlign::Middle => self.anchor.y - extent.height / 2.0,
            TextVAlign::Bottom => self.anchor.y - extent.height,
        };
        ScreenPoint::new(x, y)
    }
}

/// Measured size of a text block in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

impl TextExtent {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

pub(crate) fn validate_points(points: &[ScreenPoint]) -> PlotResult<()> {
    if points.iter().any(|point| !point.is_finite()) {
        return Err(PlotError::InvalidData(
            "path coordinates must be finite".to_owned(),
        ));
    }
    Ok(())
}
