use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};
use crate::interaction::CursorKind;
use crate::render::{Color, FontSpec, StrokeStyle};

/// Cursor names (CSS/freedesktop naming) for each interaction cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotCursors {
    #[serde(default = "default_arrow_cursor")]
    pub default: String,
    #[serde(default = "default_pan_cursor")]
    pub pan: String,
    #[serde(default = "default_zoom_rectangle_cursor")]
    pub zoom_rectangle: String,
    #[serde(default = "default_zoom_horizontal_cursor")]
    pub zoom_horizontal: String,
    #[serde(default = "default_zoom_vertical_cursor")]
    pub zoom_vertical: String,
}

impl PlotCursors {
    #[must_use]
    pub fn name_for(&self, kind: CursorKind) -> &str {
        match kind {
            CursorKind::Default => &self.default,
            CursorKind::Pan => &self.pan,
            CursorKind::ZoomRectangle => &self.zoom_rectangle,
            CursorKind::ZoomHorizontal => &self.zoom_horizontal,
            CursorKind::ZoomVertical => &self.zoom_vertical,
        }
    }
}

impl Default for PlotCursors {
    fn default() -> Self {
        Self {
            default: default_arrow_cursor(),
            pan: default_pan_cursor(),
            zoom_rectangle: default_zoom_rectangle_cursor(),
            zoom_horizontal: default_zoom_horizontal_cursor(),
            zoom_vertical: default_zoom_vertical_cursor(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomRectangleStyle {
    pub fill: Color,
    pub outline: StrokeStyle,
}

impl Default for ZoomRectangleStyle {
    fn default() -> Self {
        Self {
            fill: Color::from_rgba8(0xFF, 0xFF, 0x00, 0x40),
            outline: StrokeStyle::dashed(Color::BLACK, 1.0, vec![5.0, 2.0]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerStyle {
    pub guide_line: StrokeStyle,
    pub box_fill: Color,
    pub box_border: StrokeStyle,
    pub text_color: Color,
    pub font: FontSpec,
    /// Inner spacing between the callout border and its text.
    pub padding_px: f64,
    /// Distance between the tracked point and the callout corner.
    pub offset_px: f64,
}

impl Default for TrackerStyle {
    fn default() -> Self {
        Self {
            guide_line: StrokeStyle::solid(Color::rgba(0.0, 0.0, 0.0, 0.6), 1.0),
            box_fill: Color::from_rgba8(0xFF, 0xFF, 0xE1, 0xF0),
            box_border: StrokeStyle::solid(Color::BLACK, 1.0),
            text_color: Color::BLACK,
            font: FontSpec::sans(12.0),
            padding_px: 4.0,
            offset_px: 8.0,
        }
    }
}

/// Style of the message drawn when a paint pass fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintErrorStyle {
    pub color: Color,
    pub font: FontSpec,
    pub prefix: String,
}

impl Default for PaintErrorStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(1.0, 0.0, 0.0),
            font: FontSpec::monospace(10.0),
            prefix: "plot paint failed: ".to_owned(),
        }
    }
}

/// Presentation settings of a plot surface.
///
/// Serializable so hosts can persist look-and-feel alongside other settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSurfaceConfig {
    #[serde(default)]
    pub cursors: PlotCursors,
    #[serde(default)]
    pub zoom_rectangle: ZoomRectangleStyle,
    #[serde(default)]
    pub tracker: TrackerStyle,
    #[serde(default)]
    pub paint_error: PaintErrorStyle,
    /// Surface fill used when the model's background is undefined, and when
    /// no model is attached. `None` clears to transparent.
    #[serde(default)]
    pub default_background: Option<Color>,
}

impl Default for PlotSurfaceConfig {
    fn default() -> Self {
        Self {
            cursors: PlotCursors::default(),
            zoom_rectangle: ZoomRectangleStyle::default(),
            tracker: TrackerStyle::default(),
            paint_error: PaintErrorStyle::default(),
            default_background: None,
        }
    }
}

impl PlotSurfaceConfig {
    #[must_use]
    pub fn with_cursors(mut self, cursors: PlotCursors) -> Self {
        self.cursors = cursors;
        self
    }

    #[must_use]
    pub fn with_default_background(mut self, color: Option<Color>) -> Self {
        self.default_background = color;
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        let tracker = &self.tracker;
        if !tracker.padding_px.is_finite()
            || tracker.padding_px < 0.0
            || !tracker.offset_px.is_finite()
            || tracker.offset_px < 0.0
        {
            return Err(PlotError::InvalidConfig(
                "tracker padding and offset must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(background) = self.default_background {
            background.validate().map_err(config_error)?;
        }
        self.zoom_rectangle.fill.validate().map_err(config_error)?;
        self.zoom_rectangle.outline.validate().map_err(config_error)?;
        tracker.guide_line.validate().map_err(config_error)?;
        tracker.box_fill.validate().map_err(config_error)?;
        tracker.box_border.validate().map_err(config_error)?;
        tracker.text_color.validate().map_err(config_error)?;
        tracker.font.validate().map_err(config_error)?;
        self.paint_error.color.validate().map_err(config_error)?;
        self.paint_error.font.validate().map_err(config_error)?;
        Ok(())
    }

    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|err| PlotError::InvalidConfig(format!("failed to parse config: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| PlotError::InvalidConfig(format!("failed to serialize config: {err}")))
    }
}

fn config_error(err: PlotError) -> PlotError {
    PlotError::InvalidConfig(err.to_string())
}

fn default_arrow_cursor() -> String {
    "default".to_owned()
}

fn default_pan_cursor() -> String {
    "move".to_owned()
}

fn default_zoom_rectangle_cursor() -> String {
    "nwse-resize".to_owned()
}

fn default_zoom_horizontal_cursor() -> String {
    "col-resize".to_owned()
}

fn default_zoom_vertical_cursor() -> String {
    "row-resize".to_owned()
}
