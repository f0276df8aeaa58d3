use crate::core::{DomainExtents, PlotMapper, PlotRect, lerp};
use crate::error::ChartResult;
use crate::render::{
    BaselineGradientFill, CirclePrimitive, LinePrimitive, MagnifierPrimitive, PathPrimitive,
    RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::engine::ChartEngine;
use super::label_format::{estimate_text_width_px, format_value_label, uses_day_format};
use super::theme::{Palette, Theme};

const SELECTION_MARKER_RADIUS_PX: f64 = 6.0;
const TOOLTIP_CORNER_RADIUS_PX: f64 = 5.0;

impl<R: Renderer> ChartEngine<R> {
    /// Materializes backend-agnostic primitives for one draw pass.
    ///
    /// Data-shaped conditions (no series, no points, degenerate extents)
    /// degrade to placeholder frames; this method only fails on programmer
    /// errors such as an impossible margin/viewport combination. A frame is
    /// always completed — nothing here aborts the draw.
    pub fn build_render_frame(&mut self, theme: Theme, now_ms: f64) -> ChartResult<RenderFrame> {
        let palette = Palette::for_theme(theme);
        let viewport = self.config.viewport;
        let font = self.config.label_font_size_px;
        let mut frame = RenderFrame::new(viewport, palette.background);

        // Single exclusive read of the series collection for this frame.
        let snapshots = self.store.snapshot();
        let live_labels: Vec<&str> = snapshots.iter().map(|s| s.label.as_str()).collect();
        self.animation.retain_labels(&live_labels);

        let center_x = f64::from(viewport.width) / 2.0;
        let center_y = f64::from(viewport.height) / 2.0;

        let Some(extents) = DomainExtents::fit(snapshots.iter().map(|s| s.points.as_slice()))
        else {
            frame = frame.with_text(TextPrimitive::new(
                "No data to display",
                center_x,
                center_y,
                font,
                palette.axis_label,
                TextHAlign::Center,
            ));
            return Ok(frame);
        };

        if !extents.is_renderable() {
            frame = frame.with_text(TextPrimitive::new(
                "Invalid data range",
                center_x,
                center_y,
                font,
                palette.axis_label,
                TextHAlign::Center,
            ));
            return Ok(frame);
        }

        let plot = PlotRect::inset(viewport, self.config.margin_px)?;
        let shifted = self.interaction.pan().apply(extents, plot);
        let mapper = PlotMapper::new(shifted, plot)?;

        // Horizontal grid lines at the configured tick count.
        let grid_ticks = self.config.grid_tick_count;
        for i in 0..=grid_ticks {
            let y = plot.top + plot.height - f64::from(i) / f64::from(grid_ticks) * plot.height;
            frame = frame.with_line(LinePrimitive::new(
                plot.left,
                y,
                plot.right(),
                y,
                1.0,
                palette.grid,
            ));
        }

        // Axis base lines.
        frame = frame
            .with_line(LinePrimitive::new(
                plot.left,
                plot.bottom(),
                plot.right(),
                plot.bottom(),
                1.0,
                palette.axis_label,
            ))
            .with_line(LinePrimitive::new(
                plot.left,
                plot.top,
                plot.left,
                plot.bottom(),
                1.0,
                palette.axis_label,
            ));

        // X-axis tick labels: windows longer than a day use fewer ticks and
        // a rotated day-of-week format.
        let span = shifted.x_range();
        let day_format = uses_day_format(span);
        let x_ticks: u32 = if day_format { 4 } else { 5 };
        for i in 0..=x_ticks {
            let value = shifted.x_min + span * f64::from(i) / f64::from(x_ticks);
            let px = plot.left + f64::from(i) / f64::from(x_ticks) * plot.width;
            let text = self.label_cache.time_label(value, day_format);
            let label = if day_format {
                TextPrimitive::new(
                    text,
                    px,
                    plot.bottom() + 10.0,
                    font,
                    palette.axis_label,
                    TextHAlign::Left,
                )
                .with_rotation(45.0)
            } else {
                TextPrimitive::new(
                    text,
                    px,
                    plot.bottom() + 30.0,
                    font,
                    palette.axis_label,
                    TextHAlign::Center,
                )
            };
            frame = frame.with_text(label);
        }

        // Y-axis tick labels, one decimal with unit suffix.
        for i in 0..=grid_ticks {
            let value =
                shifted.y_min + shifted.y_range() * f64::from(i) / f64::from(grid_ticks);
            let y = plot.top + plot.height - f64::from(i) / f64::from(grid_ticks) * plot.height;
            let text = self.label_cache.value_label(value, &self.config.unit_suffix);
            frame = frame.with_text(TextPrimitive::new(
                text,
                plot.left - 6.0,
                y + 5.0,
                font,
                palette.axis_label,
                TextHAlign::Right,
            ));
        }

        // Series paths through animated positions, plus legend labels.
        let mut legend_x = plot.left + 10.0;
        for snapshot in &snapshots {
            if snapshot.points.is_empty() {
                continue;
            }

            self.animation.observe(&snapshot.label, &snapshot.points, now_ms);
            let progress = self.animation.progress_at(&snapshot.label, now_ms);
            let previous = self.animation.previous_points(&snapshot.label);

            let mut pixels = Vec::with_capacity(snapshot.points.len());
            for (index, point) in snapshot.points.iter().enumerate() {
                let (mut px, mut py) = mapper.to_pixel(point.x, point.y)?;
                if progress < 1.0 {
                    // Indices present in both snapshots interpolate; new
                    // indices render directly at their full position.
                    if let Some(prev) = previous.get(index) {
                        let (prev_px, prev_py) = mapper.to_pixel(prev.x, prev.y)?;
                        px = lerp(prev_px, px, progress);
                        py = lerp(prev_py, py, progress);
                    }
                }
                pixels.push((px, py));
            }

            let stroke = snapshot.color.with_alpha(snapshot.color.alpha * progress);
            let fill = BaselineGradientFill {
                baseline_y: plot.bottom(),
                top_color: snapshot.color,
                bottom_color: snapshot.color.with_alpha(0.392),
            };
            frame = frame.with_path(
                PathPrimitive::new(pixels, self.config.series_stroke_width, stroke)
                    .with_baseline_fill(fill),
            );

            frame = frame.with_text(TextPrimitive::new(
                snapshot.label.clone(),
                legend_x,
                plot.top - 20.0,
                font,
                palette.series_label,
                TextHAlign::Left,
            ));
            legend_x += estimate_text_width_px(&snapshot.label, font) + 16.0;
        }

        // Selection overlay: magnifier lens while the gesture is down,
        // otherwise marker plus tooltip.
        if let Some(selection) = self.interaction.selection() {
            let (sx, sy) = mapper.to_pixel(selection.point.x, selection.point.y)?;

            if self.interaction.is_magnifying() && self.config.magnifier.enabled {
                let size = self.config.magnifier.size_px;
                frame = frame.with_magnifier(MagnifierPrimitive {
                    source_x: sx,
                    source_y: sy,
                    anchor_x: sx - size / 2.0,
                    anchor_y: sy - size / 2.0 - 20.0,
                    size_px: size,
                    scale: self.config.magnifier.scale,
                    mask_inner: palette.magnifier_inner,
                    mask_outer: palette.magnifier_outer,
                    crosshair_color: palette.marker,
                });
            } else {
                frame = frame.with_circle(CirclePrimitive::new(
                    sx,
                    sy,
                    SELECTION_MARKER_RADIUS_PX,
                    palette.marker,
                ));

                let value_line = format!(
                    "{}: {}",
                    selection.series_label,
                    format_value_label(selection.point.y, &self.config.unit_suffix)
                );
                let time_line = self.label_cache.time_label(selection.point.x, false);
                let text_width = estimate_text_width_px(&value_line, font)
                    .max(estimate_text_width_px(&time_line, font));
                let line_height = font + 4.0;
                let text_height = 2.0 * line_height;

                frame = frame
                    .with_rect(
                        RectPrimitive::new(
                            sx + 10.0,
                            sy - text_height - 10.0,
                            text_width + 10.0,
                            text_height + 20.0,
                            palette.tooltip_fill,
                        )
                        .with_corner_radius(TOOLTIP_CORNER_RADIUS_PX),
                    )
                    .with_text(TextPrimitive::new(
                        value_line,
                        sx + 15.0,
                        sy - line_height - 5.0,
                        font,
                        palette.tooltip_text,
                        TextHAlign::Left,
                    ))
                    .with_text(TextPrimitive::new(
                        time_line,
                        sx + 15.0,
                        sy - 5.0,
                        font,
                        palette.tooltip_text,
                        TextHAlign::Left,
                    ));
            }
        }

        frame.validate()?;
        Ok(frame)
    }
}
