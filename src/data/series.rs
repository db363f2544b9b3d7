use serde::{Deserialize, Serialize};

/// A single `(x, y)` sample. Both coordinates are always finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    x: f64,
    y: f64,
}

impl DataPoint {
    /// Returns `None` if either coordinate is NaN or infinite.
    pub fn new(x: f64, y: f64) -> Option<Self> {
        if x.is_finite() && y.is_finite() {
            Some(Self { x, y })
        } else {
            None
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

/// Ordered sequence of points, in the order the lines appeared in the input.
///
/// A series is never edited in place: parsing produces a new one and the
/// application swaps it in wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSeries {
    points: Vec<DataPoint>,
}

impl DataSeries {
    pub fn new(points: Vec<DataPoint>) -> Self {
        Self { points }
    }

    /// Build a series from raw pairs, dropping any pair with a non-finite value.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        pairs
            .into_iter()
            .filter_map(|(x, y)| DataPoint::new(x, y))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&DataPoint> {
        self.points.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.points.iter()
    }

    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(DataPoint::x)
    }

    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(DataPoint::y)
    }

    /// Whether the x values never decrease. Lets the chart binary-search
    /// the visible window instead of scanning every point.
    pub fn is_sorted_by_x(&self) -> bool {
        self.points.windows(2).all(|w| w[0].x <= w[1].x)
    }

    /// Bounding box `(min_x, max_x, min_y, max_y)`, or `None` when empty.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let first = self.points.first()?;
        Some(self.points.iter().fold(
            (first.x, first.x, first.y, first.y),
            |(x0, x1, y0, y1), p| (x0.min(p.x), x1.max(p.x), y0.min(p.y), y1.max(p.y)),
        ))
    }
}

impl FromIterator<DataPoint> for DataSeries {
    fn from_iter<I: IntoIterator<Item = DataPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DataSeries {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_rejects_non_finite() {
        assert!(DataPoint::new(1.0, 2.0).is_some());
        assert!(DataPoint::new(f64::NAN, 2.0).is_none());
        assert!(DataPoint::new(1.0, f64::INFINITY).is_none());
        assert!(DataPoint::new(f64::NEG_INFINITY, 0.0).is_none());
    }

    #[test]
    fn test_from_pairs_drops_invalid() {
        let series = DataSeries::from_pairs([(0.0, 1.0), (f64::NAN, 2.0), (3.0, 4.0)]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[1].x(), 3.0);
    }

    #[test]
    fn test_bounds() {
        let series = DataSeries::from_pairs([(2.0, -1.0), (-3.0, 5.0), (1.0, 0.5)]);
        assert_eq!(series.bounds(), Some((-3.0, 2.0, -1.0, 5.0)));
        assert_eq!(DataSeries::default().bounds(), None);
    }

    #[test]
    fn test_sorted_by_x() {
        assert!(DataSeries::from_pairs([(0.0, 0.0), (0.0, 1.0), (2.0, 1.0)]).is_sorted_by_x());
        assert!(!DataSeries::from_pairs([(1.0, 0.0), (0.0, 1.0)]).is_sorted_by_x());
    }
}
