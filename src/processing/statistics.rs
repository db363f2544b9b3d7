use serde::{Deserialize, Serialize};

use crate::data::series::DataSeries;

/// Summary statistics for a data series.
///
/// An empty series produces all-zero stats rather than an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DataStats {
    pub count: usize,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub mean_y: f64,
    /// Population standard deviation (divides by `count`, not `count - 1`).
    pub std_y: f64,
}

impl DataStats {
    pub fn compute(series: &DataSeries) -> Self {
        let Some((min_x, max_x, min_y, max_y)) = series.bounds() else {
            return Self::default();
        };

        let count = series.len();
        let mean_y = mean(series, count).clamp(min_y, max_y);
        let std_y = if min_y == max_y {
            0.0
        } else {
            population_std(series, count, mean_y, min_y.abs().max(max_y.abs()))
        };

        DataStats {
            count,
            min_x,
            max_x,
            min_y,
            max_y,
            mean_y,
            std_y,
        }
    }

    /// Format as a multi-line report string.
    pub fn report(&self, x_label: &str, y_label: &str) -> String {
        format!(
            "Count: {}\n{x_label} Range: {:.4} to {:.4}\n{y_label} Range: {:.4} to {:.4}\nMean {y_label}: {:.4}\nStd Dev {y_label}: {:.4}\n",
            self.count, self.min_x, self.max_x, self.min_y, self.max_y, self.mean_y, self.std_y
        )
    }
}

/// Mean of y. Falls back to summing `y / n` when the plain sum overflows.
fn mean(series: &DataSeries, count: usize) -> f64 {
    let n = count as f64;
    let sum = series.ys().sum::<f64>();
    if sum.is_finite() {
        sum / n
    } else {
        series.ys().map(|v| v / n).sum()
    }
}

/// Population standard deviation around `mean_y`. Squared deviations that
/// overflow are recomputed on values scaled by `scale` (the largest |y|).
fn population_std(series: &DataSeries, count: usize, mean_y: f64, scale: f64) -> f64 {
    let n = count as f64;
    let variance = series.ys().map(|v| (v - mean_y).powi(2)).sum::<f64>() / n;
    if variance.is_finite() {
        return variance.sqrt();
    }
    let scaled = series
        .ys()
        .map(|v| (v / scale - mean_y / scale).powi(2))
        .sum::<f64>()
        / n;
    scale * scaled.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_series_is_all_zero() {
        let stats = DataStats::compute(&DataSeries::default());
        assert_eq!(
            stats,
            DataStats {
                count: 0,
                min_x: 0.0,
                max_x: 0.0,
                min_y: 0.0,
                max_y: 0.0,
                mean_y: 0.0,
                std_y: 0.0,
            }
        );
    }

    #[test]
    fn test_single_point_has_zero_deviation() {
        let stats = DataStats::compute(&DataSeries::from_pairs([(0.0, 5.0)]));
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean_y, 5.0);
        assert_eq!(stats.std_y, 0.0);
    }

    #[test]
    fn test_population_std_dev() {
        let series = DataSeries::from_pairs(
            [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]
                .into_iter()
                .enumerate()
                .map(|(i, y)| (i as f64, y)),
        );
        let stats = DataStats::compute(&series);
        assert_eq!(stats.count, 8);
        assert_relative_eq!(stats.mean_y, 5.0);
        assert_relative_eq!(stats.std_y, 2.0);
        assert_eq!((stats.min_x, stats.max_x), (0.0, 7.0));
        assert_eq!((stats.min_y, stats.max_y), (2.0, 9.0));
    }

    #[test]
    fn test_extrema_ignore_order() {
        let series = DataSeries::from_pairs([(3.0, -1.0), (-2.0, 8.0), (10.0, 0.0)]);
        let stats = DataStats::compute(&series);
        assert_eq!((stats.min_x, stats.max_x), (-2.0, 10.0));
        assert_eq!((stats.min_y, stats.max_y), (-1.0, 8.0));
        assert!(stats.min_y <= stats.mean_y && stats.mean_y <= stats.max_y);
    }

    #[test]
    fn test_constant_series_mean_stays_in_range() {
        let stats = DataStats::compute(&DataSeries::from_pairs([(0.0, 0.1), (1.0, 0.1), (2.0, 0.1)]));
        assert_eq!(stats.mean_y, 0.1);
        assert_eq!(stats.std_y, 0.0);
    }

    #[test]
    fn test_huge_values_do_not_overflow() {
        let stats = DataStats::compute(&DataSeries::from_pairs([(0.0, 1e308), (1.0, 1e308)]));
        assert_eq!(stats.mean_y, 1e308);
        assert_eq!(stats.std_y, 0.0);

        let stats = DataStats::compute(&DataSeries::from_pairs([(0.0, 1.5e308), (1.0, -1.5e308)]));
        assert_eq!(stats.mean_y, 0.0);
        assert!(stats.std_y.is_finite());
        assert_relative_eq!(stats.std_y, 1.5e308);
    }

    #[test]
    fn test_report_lists_labels() {
        let stats = DataStats::compute(&DataSeries::from_pairs([(0.0, 1.0), (1.0, 3.0)]));
        let report = stats.report("Time", "Signal");
        assert!(report.contains("Count: 2"));
        assert!(report.contains("Time Range: 0.0000 to 1.0000"));
        assert!(report.contains("Mean Signal: 2.0000"));
    }
}
