//! Interactive overlays drawn on top of the rendered model.

use crate::core::{ClientSize, ScreenPoint, ScreenRect};
use crate::error::PlotResult;
use crate::model::TrackerHitResult;
use crate::render::{RenderContext, TextExtent, TextHAlign, TextPrimitive, TextVAlign};
use crate::surface::config::{PaintErrorStyle, TrackerStyle, ZoomRectangleStyle};

pub(crate) fn draw_zoom_rectangle(
    context: &mut dyn RenderContext,
    rect: ScreenRect,
    style: &ZoomRectangleStyle,
) -> PlotResult<()> {
    context.draw_rectangle(rect, Some(style.fill), None)?;
    context.draw_rectangle(rect, None, Some(&style.outline))
}

/// Places the tracker callout next to `anchor`.
///
/// The box opens to the right of and below the anchor, flips left when the
/// anchor is past the horizontal midpoint and up when it is past the vertical
/// midpoint, then is clamped inside the client area.
#[must_use]
pub fn tracker_label_rect(
    anchor: ScreenPoint,
    label: TextExtent,
    client: ClientSize,
    style: &TrackerStyle,
) -> ScreenRect {
    let width = label.width + 2.0 * style.padding_px;
    let height = label.height + 2.0 * style.padding_px;
    let client_width = f64::from(client.width);
    let client_height = f64::from(client.height);

    let left = if anchor.x > client_width / 2.0 {
        anchor.x - style.offset_px - width
    } else {
        anchor.x + style.offset_px
    };
    let top = if anchor.y > client_height / 2.0 {
        anchor.y - style.offset_px - height
    } else {
        anchor.y + style.offset_px
    };

    ScreenRect::new(
        left.min(client_width - width).max(0.0),
        top.min(client_height - height).max(0.0),
        width,
        height,
    )
}

pub(crate) fn draw_tracker(
    context: &mut dyn RenderContext,
    hit: &TrackerHitResult,
    client: ClientSize,
    style: &TrackerStyle,
) -> PlotResult<()> {
    let position = hit.position;

    if let Some(x_axis) = hit.x_axis.filter(|axis| axis.is_finite()) {
        let x_axis = x_axis.ordered();
        context.draw_line(
            ScreenPoint::new(x_axis.screen_min, position.y),
            ScreenPoint::new(x_axis.screen_max, position.y),
            &style.guide_line,
        )?;
    }
    if let Some(y_axis) = hit.y_axis.filter(|axis| axis.is_finite()) {
        let y_axis = y_axis.ordered();
        context.draw_line(
            ScreenPoint::new(position.x, y_axis.screen_min),
            ScreenPoint::new(position.x, y_axis.screen_max),
            &style.guide_line,
        )?;
    }

    if hit.text.is_empty() {
        return Ok(());
    }
    let extent = context.measure_text(&hit.text, &style.font);
    let rect = tracker_label_rect(position, extent, client, style);
    context.draw_rectangle(rect, Some(style.box_fill), Some(&style.box_border))?;
    context.draw_text(&TextPrimitive::new(
        hit.text.clone(),
        ScreenPoint::new(rect.left + style.padding_px, rect.top + style.padding_px),
        style.font.clone(),
        style.text_color,
    ))
}

pub(crate) fn draw_paint_error(
    context: &mut dyn RenderContext,
    message: &str,
    client: ClientSize,
    style: &PaintErrorStyle,
) -> PlotResult<()> {
    let text = format!("{}{message}", style.prefix);
    context.draw_text(
        &TextPrimitive::new(text, client.center(), style.font.clone(), style.color)
            .aligned(TextHAlign::Center, TextVAlign::Middle),
    )
}

#[cfg(test)]
mod tests {
    use super::tracker_label_rect;
    use crate::core::{ClientSize, ScreenPoint};
    use crate::render::TextExtent;
    use crate::surface::config::TrackerStyle;

    fn style() -> TrackerStyle {
        TrackerStyle {
            padding_px: 4.0,
            offset_px: 8.0,
            ..TrackerStyle::default()
        }
    }

    #[test]
    fn callout_opens_right_and_down_in_top_left_quadrant() {
        let rect = tracker_label_rect(
            ScreenPoint::new(20.0, 30.0),
            TextExtent::new(40.0, 12.0),
            ClientSize::new(200, 150),
            &style(),
        );
        assert_eq!((rect.left, rect.top), (28.0, 38.0));
        assert_eq!((rect.width, rect.height), (48.0, 20.0));
    }

    #[test]
    fn callout_flips_past_midpoints() {
        let rect = tracker_label_rect(
            ScreenPoint::new(150.0, 120.0),
            TextExtent::new(40.0, 12.0),
            ClientSize::new(200, 150),
            &style(),
        );
        assert_eq!(rect.right(), 142.0);
        assert_eq!(rect.bottom(), 112.0);
    }

    #[test]
    fn callout_is_clamped_inside_client_area() {
        let rect = tracker_label_rect(
            ScreenPoint::new(90.0, 5.0),
            TextExtent::new(150.0, 12.0),
            ClientSize::new(200, 150),
            &style(),
        );
        assert_eq!(rect.left, 200.0 - 158.0);
        assert!(rect.top >= 0.0);
    }
}
