use cairo::{Context, Format, ImageSurface, LinearGradient, RadialGradient};
use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, PathPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub paths_drawn: usize,
    pub circles_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
    pub magnifier_drawn: bool,
}

/// Cairo image-surface renderer backend.
///
/// Draws the frame's primitive lists in the documented z-order; the
/// magnifier overlay is realized by replaying the data layers into an
/// offscreen surface and compositing it behind a radial-gradient circular
/// mask.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, frame.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        draw_data_layers(context, frame, &mut stats)?;

        for circle in &frame.circles {
            apply_color(context, circle.color);
            context.arc(circle.cx, circle.cy, circle.radius, 0.0, 2.0 * PI);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill circle", err))?;
            stats.circles_drawn += 1;
        }

        for rect in &frame.rects {
            append_rect_path(context, *rect);
            apply_color(context, rect.fill_color);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            stats.rects_drawn += 1;
        }

        for text in &frame.texts {
            draw_text(context, text)?;
            stats.texts_drawn += 1;
        }

        if let Some(magnifier) = frame.magnifier {
            let half = magnifier.size_px / 2.0;
            let lens_side = magnifier.size_px.ceil() as i32;
            let lens_surface = ImageSurface::create(Format::ARgb32, lens_side, lens_side)
                .map_err(|err| map_backend_error("failed to create lens surface", err))?;
            let lens_context = Context::new(&lens_surface)
                .map_err(|err| map_backend_error("failed to create lens context", err))?;

            // Map the magnified source point to the lens center.
            lens_context.scale(magnifier.scale, magnifier.scale);
            lens_context.translate(
                -magnifier.source_x + half / magnifier.scale,
                -magnifier.source_y + half / magnifier.scale,
            );
            let mut lens_stats = CairoRenderStats::default();
            draw_data_layers(&lens_context, frame, &mut lens_stats)?;

            // Cross-hair marks through the magnified point.
            apply_color(&lens_context, magnifier.crosshair_color);
            lens_context.set_line_width(1.0);
            lens_context.move_to(magnifier.source_x - 5.0, magnifier.source_y);
            lens_context.line_to(magnifier.source_x + 5.0, magnifier.source_y);
            lens_context.move_to(magnifier.source_x, magnifier.source_y - 5.0);
            lens_context.line_to(magnifier.source_x, magnifier.source_y + 5.0);
            lens_context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke lens cross-hair", err))?;

            let center_x = magnifier.anchor_x + half;
            let center_y = magnifier.anchor_y + half;
            context.save().map_err(|err| map_backend_error("failed to save context", err))?;
            context.arc(center_x, center_y, half, 0.0, 2.0 * PI);
            context.clip();

            let mask = RadialGradient::new(center_x, center_y, 0.0, center_x, center_y, half);
            let inner = magnifier.mask_inner;
            let outer = magnifier.mask_outer;
            mask.add_color_stop_rgba(0.0, inner.red, inner.green, inner.blue, inner.alpha);
            mask.add_color_stop_rgba(1.0, outer.red, outer.green, outer.blue, outer.alpha);
            context
                .set_source(&mask)
                .map_err(|err| map_backend_error("failed to set lens mask source", err))?;
            context
                .paint()
                .map_err(|err| map_backend_error("failed to paint lens mask", err))?;

            context
                .set_source_surface(&lens_surface, magnifier.anchor_x, magnifier.anchor_y)
                .map_err(|err| map_backend_error("failed to set lens source", err))?;
            context
                .paint()
                .map_err(|err| map_backend_error("failed to composite lens", err))?;
            context
                .restore()
                .map_err(|err| map_backend_error("failed to restore context", err))?;
            stats.magnifier_drawn = true;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

/// Grid/axis lines and series paths; shared by the main pass and the
/// magnifier lens replay.
fn draw_data_layers(
    context: &Context,
    frame: &RenderFrame,
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    for line in &frame.lines {
        apply_color(context, line.color);
        context.set_line_width(line.stroke_width);
        context.move_to(line.x1, line.y1);
        context.line_to(line.x2, line.y2);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))?;
        stats.lines_drawn += 1;
    }

    for path in &frame.paths {
        draw_path(context, path)?;
        stats.paths_drawn += 1;
    }

    Ok(())
}

fn draw_path(context: &Context, path: &PathPrimitive) -> ChartResult<()> {
    let Some(((first_x, first_y), rest)) = path.points.split_first() else {
        return Ok(());
    };

    if let Some(fill) = path.fill {
        context.move_to(*first_x, *first_y);
        for (x, y) in rest {
            context.line_to(*x, *y);
        }
        if let (Some((last_x, _)), Some((head_x, _))) = (path.points.last(), path.points.first()) {
            context.line_to(*last_x, fill.baseline_y);
            context.line_to(*head_x, fill.baseline_y);
        }
        context.close_path();

        let top_y = path
            .points
            .iter()
            .map(|(_, y)| *y)
            .fold(fill.baseline_y, f64::min);
        let gradient = LinearGradient::new(*first_x, top_y, *first_x, fill.baseline_y);
        let top = fill.top_color;
        let bottom = fill.bottom_color;
        gradient.add_color_stop_rgba(0.0, top.red, top.green, top.blue, top.alpha);
        gradient.add_color_stop_rgba(1.0, bottom.red, bottom.green, bottom.blue, bottom.alpha);
        context
            .set_source(&gradient)
            .map_err(|err| map_backend_error("failed to set gradient source", err))?;
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill path", err))?;
    }

    context.move_to(*first_x, *first_y);
    for (x, y) in rest {
        context.line_to(*x, *y);
    }
    apply_color(context, path.color);
    context.set_line_width(path.stroke_width);
    context.set_line_cap(cairo::LineCap::Round);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke path", err))?;
    Ok(())
}

fn draw_text(context: &Context, text: &TextPrimitive) -> ChartResult<()> {
    context.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    context.set_font_size(text.font_size_px);

    let extents = context
        .text_extents(&text.text)
        .map_err(|err| map_backend_error("failed to measure text", err))?;
    let offset_x = match text.h_align {
        TextHAlign::Left => 0.0,
        TextHAlign::Center => -extents.width() / 2.0,
        TextHAlign::Right => -extents.width(),
    };

    apply_color(context, text.color);
    context
        .save()
        .map_err(|err| map_backend_error("failed to save context", err))?;
    context.translate(text.x, text.y);
    if text.rotation_degrees != 0.0 {
        context.rotate(text.rotation_degrees.to_radians());
    }
    context.move_to(offset_x, 0.0);
    context
        .show_text(&text.text)
        .map_err(|err| map_backend_error("failed to draw text", err))?;
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore context", err))?;
    Ok(())
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_rect_path(context: &Context, rect: crate::render::RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
