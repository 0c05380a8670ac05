use crate::core::{ScreenPoint, ScreenRect};
use crate::error::{PlotError, PlotResult};
use crate::render::{
    Color, FontSpec, RenderContext, StrokeStyle, TextExtent, TextPrimitive, validate_points,
};

/// One call recorded by [`RecordingRenderContext`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Option<Color>),
    Polyline {
        points: Vec<ScreenPoint>,
        stroke: StrokeStyle,
    },
    Polygon {
        points: Vec<ScreenPoint>,
        fill: Option<Color>,
        stroke: Option<StrokeStyle>,
    },
    Rectangle {
        rect: ScreenRect,
        fill: Option<Color>,
        stroke: Option<StrokeStyle>,
    },
    Ellipse {
        rect: ScreenRect,
        fill: Option<Color>,
        stroke: Option<StrokeStyle>,
    },
    Text(TextPrimitive),
    SetClip(ScreenRect),
    ResetClip,
}

/// Headless render context used by tests and off-screen consumers.
///
/// Every call is validated and appended to a command list. Text metrics are
/// deterministic (fixed advance per character) so layout code can be asserted
/// exactly.
#[derive(Debug, Default)]
pub struct RecordingRenderContext {
    commands: Vec<DrawCommand>,
    clip: Option<ScreenRect>,
    release_count: usize,
}

impl RecordingRenderContext {
    /// Horizontal advance per character relative to the font size.
    pub const CHAR_ADVANCE: f64 = 0.6;
    /// Line height relative to the font size.
    pub const LINE_HEIGHT: f64 = 1.2;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    #[must_use]
    pub fn active_clip(&self) -> Option<ScreenRect> {
        self.clip
    }

    #[must_use]
    pub fn release_count(&self) -> usize {
        self.release_count
    }

    #[must_use]
    pub fn texts(&self) -> Vec<&TextPrimitive> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn rectangles(&self) -> Vec<(ScreenRect, Option<Color>, Option<&StrokeStyle>)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Rectangle { rect, fill, stroke } => {
                    Some((*rect, *fill, stroke.as_ref()))
                }
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn polylines(&self) -> Vec<&[ScreenPoint]> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Polyline { points, .. } => Some(points.as_slice()),
                _ => None,
            })
            .collect()
    }
}

fn validate_rect(rect: ScreenRect) -> PlotResult<()> {
    if !rect.is_finite() {
        return Err(PlotError::InvalidData(
            "rectangle coordinates must be finite".to_owned(),
        ));
    }
    Ok(())
}

fn validate_shape(fill: Option<Color>, stroke: Option<&StrokeStyle>) -> PlotResult<()> {
    if let Some(fill) = fill {
        fill.validate()?;
    }
    if let Some(stroke) = stroke {
        stroke.validate()?;
    }
    Ok(())
}

impl RenderContext for RecordingRenderContext {
    fn backend_name(&self) -> &'static str {
        "recording"
    }

    fn clear(&mut self, color: Option<Color>) -> PlotResult<()> {
        if let Some(color) = color {
            color.validate()?;
        }
        self.commands.push(DrawCommand::Clear(color));
        Ok(())
    }

    fn draw_polyline(&mut self, points: &[ScreenPoint], stroke: &StrokeStyle) -> PlotResult<()> {
        validate_points(points)?;
        stroke.validate()?;
        if points.len() < 2 {
            return Ok(());
        }
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            stroke: stroke.clone(),
        });
        Ok(())
    }

    fn draw_polygon(
        &mut self,
        points: &[ScreenPoint],
        fill: Option<Color>,
        stroke: Option<&StrokeStyle>,
    ) -> PlotResult<()> {
        validate_points(points)?;
        validate_shape(fill, stroke)?;
        if points.len() < 3 {
            return Ok(());
        }
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            fill,
            stroke: stroke.cloned(),
        });
        Ok(())
    }

    fn draw_rectangle(
        &mut self,
        rect: ScreenRect,
        fill: Option<Color>,
        stroke: Option<&StrokeStyle>,
    ) -> PlotResult<()> {
        validate_rect(rect)?;
        validate_shape(fill, stroke)?;
        self.commands.push(DrawCommand::Rectangle {
            rect,
            fill,
            stroke: stroke.cloned(),
        });
        Ok(())
    }

    fn draw_ellipse(
        &mut self,
        rect: ScreenRect,
        fill: Option<Color>,
        stroke: Option<&StrokeStyle>,
    ) -> PlotResult<()> {
        validate_rect(rect)?;
        validate_shape(fill, stroke)?;
        self.commands.push(DrawCommand::Ellipse {
            rect,
            fill,
            stroke: stroke.cloned(),
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &TextPrimitive) -> PlotResult<()> {
        text.validate()?;
        self.commands.push(DrawCommand::Text(text.clone()));
        Ok(())
    }

    fn measure_text(&mut self, text: &str, font: &FontSpec) -> TextExtent {
        if text.is_empty() {
            return TextExtent::default();
        }
        let (lines, longest) = text.lines().fold((0usize, 0usize), |(lines, longest), line| {
            (lines + 1, longest.max(line.chars().count()))
        });
        TextExtent::new(
            longest as f64 * font.size_px * Self::CHAR_ADVANCE,
            lines as f64 * font.size_px * Self::LINE_HEIGHT,
        )
    }

    fn set_clip(&mut self, rect: ScreenRect) -> bool {
        let rect = rect.normalized();
        self.clip = Some(rect);
        self.commands.push(DrawCommand::SetClip(rect));
        true
    }

    fn reset_clip(&mut self) {
        self.clip = None;
        self.commands.push(DrawCommand::ResetClip);
    }

    fn release(&mut self) {
        self.commands.clear();
        self.clip = None;
        self.release_count += 1;
    }
}
