use std::collections::HashMap;
use std::f64::consts::PI;

use cairo::{Antialias, Context, Format, ImageSurface, Operator};
use pango::FontDescription;
use tracing::trace;

use crate::core::{ScreenPoint, ScreenRect};
use crate::error::{PlotError, PlotResult};
use crate::render::{
    Color, FontSpec, FontWeight, LineJoin, RenderContext, StrokeStyle, TextExtent, TextPrimitive,
    validate_points,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub clears: usize,
    pub paths_drawn: usize,
    pub shapes_drawn: usize,
    pub texts_drawn: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FontKey {
    family: String,
    size_bits: u64,
    bold: bool,
}

impl FontKey {
    fn of(font: &FontSpec) -> Self {
        Self {
            family: font.family.clone(),
            size_bits: font.size_px.to_bits(),
            bold: font.weight == FontWeight::Bold,
        }
    }
}

/// Cairo + Pango render context.
///
/// The drawing target is redirectable: GTK draw callbacks hand in their
/// context for one paint pass, while exports build a context on an image
/// surface. Both paths go through [`CairoRenderContext::set_target`], so
/// antialiasing and stroke settings are identical on screen and on disk.
#[derive(Debug, Default)]
pub struct CairoRenderContext {
    target: Option<Context>,
    scratch: Option<Context>,
    fonts: HashMap<FontKey, FontDescription>,
    last_stats: CairoRenderStats,
}

impl CairoRenderContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn for_context(context: Context) -> Self {
        let mut render_context = Self::new();
        render_context.set_target(Some(context));
        render_context
    }

    /// Redirects drawing to another Cairo context, or detaches with `None`.
    pub fn set_target(&mut self, target: Option<Context>) {
        if let Some(context) = &target {
            context.set_antialias(Antialias::Good);
        }
        self.target = target;
        self.last_stats = CairoRenderStats::default();
    }

    #[must_use]
    pub fn target(&self) -> Option<&Context> {
        self.target.as_ref()
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    #[must_use]
    pub fn cached_font_count(&self) -> usize {
        self.fonts.len()
    }

    fn context(&self) -> PlotResult<Context> {
        self.target
            .clone()
            .ok_or_else(|| PlotError::Render("cairo render context has no target".to_owned()))
    }

    fn measuring_context(&mut self) -> PlotResult<Context> {
        if let Some(context) = &self.target {
            return Ok(context.clone());
        }
        if let Some(context) = &self.scratch {
            return Ok(context.clone());
        }
        let surface = ImageSurface::create(Format::ARgb32, 1, 1)
            .map_err(|err| map_backend_error("failed to create measuring surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create measuring context", err))?;
        context.set_antialias(Antialias::Good);
        self.scratch = Some(context.clone());
        Ok(context)
    }

    fn font_description(&mut self, font: &FontSpec) -> FontDescription {
        self.fonts
            .entry(FontKey::of(font))
            .or_insert_with(|| {
                let mut description = FontDescription::new();
                description.set_family(&font.family);
                description.set_absolute_size(font.size_px * f64::from(pango::SCALE));
                if font.weight == FontWeight::Bold {
                    description.set_weight(pango::Weight::Bold);
                }
                description
            })
            .clone()
    }

    fn layout_for(&mut self, context: &Context, text: &str, font: &FontSpec) -> pango::Layout {
        let description = self.font_description(font);
        let layout = pangocairo::functions::create_layout(context);
        layout.set_font_description(Some(&description));
        layout.set_text(text);
        layout
    }
}

impl RenderContext for CairoRenderContext {
    fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    fn clear(&mut self, color: Option<Color>) -> PlotResult<()> {
        let context = self.context()?;
        let color = color.unwrap_or(Color::TRANSPARENT);
        color.validate()?;

        context
            .save()
            .map_err(|err| map_backend_error("failed to save cairo state", err))?;
        context.set_operator(Operator::Source);
        apply_color(&context, color);
        let painted = context.paint();
        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore cairo state", err))?;
        painted.map_err(|err| map_backend_error("failed to clear surface", err))?;

        self.last_stats.clears += 1;
        Ok(())
    }

    fn draw_polyline(&mut self, points: &[ScreenPoint], stroke: &StrokeStyle) -> PlotResult<()> {
        validate_points(points)?;
        stroke.validate()?;
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };
        if rest.is_empty() {
            return Ok(());
        }

        let context = self.context()?;
        context.new_path();
        context.move_to(first.x, first.y);
        for point in rest {
            context.line_to(point.x, point.y);
        }
        apply_stroke(&context, stroke);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
        self.last_stats.paths_drawn += 1;
        Ok(())
    }

    fn draw_polygon(
        &mut self,
        points: &[ScreenPoint],
        fill: Option<Color>,
        stroke: Option<&StrokeStyle>,
    ) -> PlotResult<()> {
        validate_points(points)?;
        if points.len() < 3 {
            return Ok(());
        }

        let context = self.context()?;
        context.new_path();
        context.move_to(points[0].x, points[0].y);
        for point in &points[1..] {
            context.line_to(point.x, point.y);
        }
        context.close_path();
        fill_and_stroke(&context, fill, stroke)?;
        self.last_stats.shapes_drawn += 1;
        Ok(())
    }

    fn draw_rectangle(
        &mut self,
        rect: ScreenRect,
        fill: Option<Color>,
        stroke: Option<&StrokeStyle>,
    ) -> PlotResult<()> {
        validate_rect(rect)?;
        let rect = rect.normalized();

        let context = self.context()?;
        context.new_path();
        context.rectangle(rect.left, rect.top, rect.width, rect.height);
        fill_and_stroke(&context, fill, stroke)?;
        self.last_stats.shapes_drawn += 1;
        Ok(())
    }

    fn draw_ellipse(
        &mut self,
        rect: ScreenRect,
        fill: Option<Color>,
        stroke: Option<&StrokeStyle>,
    ) -> PlotResult<()> {
        validate_rect(rect)?;
        let rect = rect.normalized();
        if rect.is_empty() {
            return Ok(());
        }

        let context = self.context()?;
        let center = rect.center();
        context.new_path();
        context
            .save()
            .map_err(|err| map_backend_error("failed to save cairo state", err))?;
        context.translate(center.x, center.y);
        context.scale(rect.width / 2.0, rect.height / 2.0);
        context.arc(0.0, 0.0, 1.0, 0.0, 2.0 * PI);
        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore cairo state", err))?;
        fill_and_stroke(&context, fill, stroke)?;
        self.last_stats.shapes_drawn += 1;
        Ok(())
    }

    fn draw_text(&mut self, text: &TextPrimitive) -> PlotResult<()> {
        text.validate()?;
        let context = self.context()?;
        let layout = self.layout_for(&context, &text.text, &text.font);

        let (width, height) = layout.pixel_size();
        let origin = text.origin_for(TextExtent::new(f64::from(width), f64::from(height)));

        apply_color(&context, text.color);
        context.move_to(origin.x, origin.y);
        pangocairo::functions::show_layout(&context, &layout);
        self.last_stats.texts_drawn += 1;
        Ok(())
    }

    fn measure_text(&mut self, text: &str, font: &FontSpec) -> TextExtent {
        if text.is_empty() {
            return TextExtent::default();
        }
        match self.measuring_context() {
            Ok(context) => {
                let layout = self.layout_for(&context, text, font);
                let (width, height) = layout.pixel_size();
                TextExtent::new(f64::from(width), f64::from(height))
            }
            Err(err) => {
                trace!(error = %err, "falling back to estimated text metrics");
                let lines = text.lines().count().max(1) as f64;
                let longest = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
                TextExtent::new(
                    longest as f64 * font.size_px * 0.6,
                    lines * font.size_px * 1.2,
                )
            }
        }
    }

    fn set_clip(&mut self, rect: ScreenRect) -> bool {
        let Some(context) = &self.target else {
            return false;
        };
        let rect = rect.normalized();
        context.reset_clip();
        context.new_path();
        context.rectangle(rect.left, rect.top, rect.width, rect.height);
        context.clip();
        true
    }

    fn reset_clip(&mut self) {
        if let Some(context) = &self.target {
            context.reset_clip();
        }
    }

    fn release(&mut self) {
        trace!(fonts = self.fonts.len(), "releasing cairo render context resources");
        self.fonts.clear();
        self.scratch = None;
        self.target = None;
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn apply_stroke(context: &Context, stroke: &StrokeStyle) {
    apply_color(context, stroke.color);
    context.set_line_width(stroke.width);
    context.set_dash(&stroke.dash, 0.0);
    context.set_line_join(match stroke.line_join {
        LineJoin::Miter => cairo::LineJoin::Miter,
        LineJoin::Round => cairo::LineJoin::Round,
        LineJoin::Bevel => cairo::LineJoin::Bevel,
    });
}

fn fill_and_stroke(
    context: &Context,
    fill: Option<Color>,
    stroke: Option<&StrokeStyle>,
) -> PlotResult<()> {
    if let Some(fill) = fill {
        fill.validate()?;
        apply_color(context, fill);
        let filled = if stroke.is_some() {
            context.fill_preserve()
        } else {
            context.fill()
        };
        filled.map_err(|err| map_backend_error("failed to fill shape", err))?;
    }

    match stroke {
        Some(stroke) => {
            stroke.validate()?;
            apply_stroke(context, stroke);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke shape outline", err))
        }
        None => {
            context.new_path();
            Ok(())
        }
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

fn map_backend_error(prefix: &str, err: cairo::Error) -> PlotError {
    PlotError::Render(format!("{prefix}: {err}"))
}
