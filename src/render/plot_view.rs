use std::ops::Range;

use crate::data::series::DataSeries;
use crate::state::plot_config::PlotConfig;

/// View bounds of the chart in data coordinates.
///
/// Derived each frame from the committed series and the plot config:
/// unset bounds follow the data, set bounds are used as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotView {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PlotView {
    /// `None` for an empty series.
    pub fn compute(series: &DataSeries, config: &PlotConfig) -> Option<Self> {
        let (data_x_min, data_x_max, _, _) = series.bounds()?;

        let (pad_x_min, pad_x_max) = padded(data_x_min, data_x_max);
        let (x_min, x_max) = ordered(
            config.x_range.min.unwrap_or(pad_x_min),
            config.x_range.max.unwrap_or(pad_x_max),
        );

        // Y follows only the points inside the X window, so zooming in on
        // a region rescales Y to that region.
        let (auto_y_min, auto_y_max) = y_extent_within(series, x_min, x_max)
            .map(|(lo, hi)| padded(lo, hi))
            .unwrap_or((0.0, 1.0));
        let (y_min, y_max) = ordered(
            config.y_range.min.unwrap_or(auto_y_min),
            config.y_range.max.unwrap_or(auto_y_max),
        );

        Some(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// Map a screen position inside `rect` to data coordinates.
    pub fn screen_to_data(&self, pos: egui::Pos2, rect: egui::Rect) -> (f64, f64) {
        let fx = f64::from((pos.x - rect.left()) / rect.width());
        let fy = f64::from((rect.bottom() - pos.y) / rect.height());
        (
            self.x_min + fx * self.x_span(),
            self.y_min + fy * self.y_span(),
        )
    }

    /// Map data coordinates to a screen position inside `rect`. Y grows
    /// upwards in data space and downwards on screen.
    pub fn data_to_screen(&self, x: f64, y: f64, rect: egui::Rect) -> egui::Pos2 {
        let fx = ((x - self.x_min) / self.x_span()) as f32;
        let fy = ((y - self.y_min) / self.y_span()) as f32;
        egui::pos2(
            rect.left() + fx * rect.width(),
            rect.bottom() - fy * rect.height(),
        )
    }

    fn x_span(&self) -> f64 {
        self.x_max - self.x_min
    }

    fn y_span(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// 5% padding on each side; a zero-width extent gets +/-0.5.
fn padded(min: f64, max: f64) -> (f64, f64) {
    let pad = (max - min) * 0.05;
    let pad = if pad.abs() < 1e-15 { 0.5 } else { pad };
    (min - pad, max + pad)
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a < b {
        (a, b)
    } else if a > b {
        (b, a)
    } else {
        (a - 0.5, b + 0.5)
    }
}

fn y_extent_within(series: &DataSeries, x_min: f64, x_max: f64) -> Option<(f64, f64)> {
    series
        .iter()
        .filter(|p| p.x() >= x_min && p.x() <= x_max)
        .fold(None, |acc, p| match acc {
            None => Some((p.y(), p.y())),
            Some((lo, hi)) => Some((p.y().min(lo), p.y().max(hi))),
        })
}

/// Index range of the points worth drawing for an X window.
///
/// Sorted series are binary-searched and keep one extra point on each side
/// so the line runs to the plot edge. Unsorted series draw everything.
pub fn visible_range(series: &DataSeries, x_min: f64, x_max: f64, sorted: bool) -> Range<usize> {
    let points = series.points();
    if !sorted {
        return 0..points.len();
    }
    let start = points.partition_point(|p| p.x() < x_min).saturating_sub(1);
    let end = (points.partition_point(|p| p.x() <= x_max) + 1).min(points.len());
    start..end.max(start)
}

/// Index of the point horizontally closest to `data_x` among the points in
/// `range` that lie inside the view.
pub fn nearest_by_x(
    series: &DataSeries,
    view: &PlotView,
    range: Range<usize>,
    data_x: f64,
) -> Option<usize> {
    let points = series.points();
    range
        .filter(|&i| {
            let p = points[i];
            p.x() >= view.x_min && p.x() <= view.x_max
        })
        .min_by(|&a, &b| {
            let da = (points[a].x() - data_x).abs();
            let db = (points[b].x() - data_x).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Tick positions on a 1/2/5 x 10^k step giving roughly eight intervals
/// across `[min, max]`. Empty for an empty or non-finite span.
pub fn grid_ticks(min: f64, max: f64) -> Vec<f64> {
    let span = max - min;
    if !(span > 0.0 && span.is_finite()) {
        return Vec::new();
    }

    let rough = span / 8.0;
    let magnitude = 10f64.powf(rough.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|&step| step >= rough)
        .unwrap_or(10.0 * magnitude);

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Axis tick label: scientific notation for very large or small
/// magnitudes, otherwise up to six decimals with trailing zeros removed.
pub fn format_tick_value(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 {
        return "0".to_string();
    }
    if !(1e-3..1e6).contains(&magnitude) {
        return format!("{value:.2e}");
    }
    let fixed = format!("{value:.6}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}
