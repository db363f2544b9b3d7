use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One axis' manual bounds. `None` means the bound follows the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AxisRange {
    pub const AUTO: AxisRange = AxisRange { min: None, max: None };

    pub fn is_auto(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Copy with one bound replaced.
    pub fn with(self, bound: Bound, value: Option<f64>) -> Self {
        match bound {
            Bound::Min => AxisRange { min: value, ..self },
            Bound::Max => AxisRange { max: value, ..self },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bound {
    Min,
    Max,
}

impl Bound {
    pub fn label(&self) -> &'static str {
        match self {
            Bound::Min => "Min",
            Bound::Max => "Max",
        }
    }
}

/// Display configuration handed to the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            title: "Data Visualization".to_string(),
            x_label: "X-Axis".to_string(),
            y_label: "Y-Axis".to_string(),
            x_range: AxisRange::AUTO,
            y_range: AxisRange::AUTO,
        }
    }
}

impl PlotConfig {
    pub fn range(&self, axis: Axis) -> AxisRange {
        match axis {
            Axis::X => self.x_range,
            Axis::Y => self.y_range,
        }
    }

    pub fn with_range(self, axis: Axis, range: AxisRange) -> Self {
        match axis {
            Axis::X => PlotConfig { x_range: range, ..self },
            Axis::Y => PlotConfig { y_range: range, ..self },
        }
    }

    /// Both axes back to automatic bounds; labels and title are kept.
    pub fn with_auto_ranges(self) -> Self {
        PlotConfig {
            x_range: AxisRange::AUTO,
            y_range: AxisRange::AUTO,
            ..self
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{0}' is not a finite number")]
pub struct BoundError(pub String);

/// Parse the text of an axis-bound field. Blank text clears the bound.
pub fn parse_bound(text: &str) -> Result<Option<f64>, BoundError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(BoundError(trimmed.to_string())),
    }
}

/// Text shown in an axis-bound field.
pub fn format_bound(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
