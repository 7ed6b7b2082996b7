//! Plotters-powered salary band chart widget for Ratatui.
//!
//! Shows predicted min/avg/max salary across the selected level's experience
//! range. We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::app::predictor::Predictor;
use crate::domain::{Level, PredictionResult};

/// A render-only chart description; series and bounds are computed up front.
pub struct SalaryBandChart<'a> {
    pub min: &'a [(f64, f64)],
    pub avg: &'a [(f64, f64)],
    pub max: &'a [(f64, f64)],
    /// Highlighted point (current slider value, avg salary).
    pub marker: Option<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

/// Series for the chart, split out of rendering so it can be tested.
#[derive(Debug, Clone, PartialEq)]
pub struct BandSeries {
    pub min: Vec<(f64, f64)>,
    pub avg: Vec<(f64, f64)>,
    pub max: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

type Curve = Result<Vec<(u32, PredictionResult)>, String>;

/// Last salary curve drawn, keyed by the inputs it was computed from.
///
/// The curve only depends on level and role, so moving the slider or
/// redrawing reuses it.
#[derive(Debug, Default)]
pub struct CurveCache {
    entry: Option<(Level, &'static str, Curve)>,
}

impl CurveCache {
    /// Recompute the curve if level or role changed. Returns `true` when a new
    /// curve was computed.
    pub fn refresh(&mut self, predictor: &Predictor, level: Level, role: &'static str) -> bool {
        if matches!(&self.entry, Some((l, r, _)) if *l == level && *r == role) {
            return false;
        }
        let curve = predictor
            .salary_curve(level.label(), role, level.experience_range())
            .map_err(|e| e.to_string());
        self.entry = Some((level, role, curve));
        true
    }

    pub fn curve(&self) -> Option<&Curve> {
        self.entry.as_ref().map(|(_, _, curve)| curve)
    }
}

impl BandSeries {
    pub fn from_curve(curve: &[(u32, PredictionResult)]) -> Self {
        let mut min = Vec::with_capacity(curve.len());
        let mut avg = Vec::with_capacity(curve.len());
        let mut max = Vec::with_capacity(curve.len());
        for &(year, r) in curve {
            let x = f64::from(year);
            min.push((x, r.min));
            avg.push((x, r.avg));
            max.push((x, r.max));
        }

        let (mut x0, mut x1) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y0, mut y1) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(x, y) in min.iter().chain(&avg).chain(&max) {
            x0 = x0.min(x);
            x1 = x1.max(x);
            y0 = y0.min(y);
            y1 = y1.max(y);
        }

        // A single-year range still needs a non-empty x axis.
        if !(x0.is_finite() && x1.is_finite()) || x1 <= x0 {
            let c = if x0.is_finite() { x0 } else { 0.0 };
            x0 = c - 0.5;
            x1 = c + 0.5;
        }
        if !(y0.is_finite() && y1.is_finite()) || y1 <= y0 {
            let c = if y0.is_finite() { y0 } else { 0.0 };
            y0 = c - 1.0;
            y1 = c + 1.0;
        }
        let pad = ((y1 - y0).abs() * 0.05).max(1e-9);

        Self {
            min,
            avg,
            max,
            x_bounds: [x0, x1],
            y_bounds: [y0 - pad, y1 + pad],
        }
    }
}

impl<'a> Widget for SalaryBandChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to build a chart in a tiny area; show a hint instead.
        if area.width < 20 || area.height < 8 {
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
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let min_color = RGBColor(255, 0, 0);
            let avg_color = RGBColor(0, 255, 255);
            let max_color = RGBColor(0, 255, 0);

            chart.draw_series(LineSeries::new(self.min.iter().copied(), &min_color))?;
            chart.draw_series(LineSeries::new(self.avg.iter().copied(), &avg_color))?;
            chart.draw_series(LineSeries::new(self.max.iter().copied(), &max_color))?;

            // Pixel rather than Circle: the ratatui backend mis-scales circle radii.
            if let Some((x, y)) = self.marker {
                chart.draw_series(std::iter::once(Pixel::new((x, y), WHITE)))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
