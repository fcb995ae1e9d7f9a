//! Plotters-powered area chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + tick label rendering
//! - an actual filled area series, which is how the indicator charts read
//! - easy to extend later (annotations, exportable PNG/SVG backends, etc.)
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`.

use plotters::prelude::*;
// Bring the Plotters `Color` trait into scope for its `.mix()` method. It is
// imported anonymously to avoid colliding with `ratatui::style::Color` below
// (the explicit import otherwise shadows the glob-imported trait).
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// Data and bounds are computed outside the render call, so `render()` stays
/// focused on drawing and the data prep is testable on its own.
pub struct AreaChart<'a> {
    /// (x, y) samples, ascending x. X is days since the common era so dates
    /// stay monotonic along the axis.
    pub points: &'a [(f64, f64)],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// Tick label formatting.
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl Widget for AreaChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a
        // chart. Render a small hint rather than panicking.
        if area.width < 20 || area.height < 6 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
            || x1 <= x0
            || y1 <= y0
        {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Axes + tick labels; mesh lines off to reduce clutter in
            // low-resolution terminal rendering.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(4)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .draw()?;

            let line = RGBColor(0, 255, 255); // cyan
            let fill = line.mix(0.25);
            chart.draw_series(
                AreaSeries::new(self.points.iter().copied(), y0, fill).border_style(&line),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Axis bounds with vertical headroom so the fill doesn't hug the frame.
pub fn bounds(points: &[(f64, f64)]) -> ([f64; 2], [f64; 2]) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    // Degenerate spans (single observation, flat series) still need a
    // nonzero axis range.
    if x_max <= x_min {
        x_max = x_min + 1.0;
    }
    let pad = ((y_max - y_min) * 0.08)
        .max(y_max.abs() * 0.01)
        .max(1e-9);

    ([x_min, x_max], [y_min - pad, y_max + pad])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_pad_the_y_axis() {
        let points = [(1.0, 10.0), (2.0, 20.0)];
        let ([x0, x1], [y0, y1]) = bounds(&points);
        assert_eq!([x0, x1], [1.0, 2.0]);
        assert!(y0 < 10.0);
        assert!(y1 > 20.0);
    }

    #[test]
    fn bounds_handle_a_single_flat_point() {
        let points = [(5.0, 3.0)];
        let ([x0, x1], [y0, y1]) = bounds(&points);
        assert!(x1 > x0);
        assert!(y1 > y0);
        assert!(y0 < 3.0 && 3.0 < y1);
    }
}
