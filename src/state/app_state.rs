use serde::{Deserialize, Serialize};

use crate::data::series::DataSeries;
use crate::processing::statistics::DataStats;
use crate::state::plot_config::{Axis, AxisRange, Bound, PlotConfig};
use crate::state::theme::Theme;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NO_VALID_DATA_MESSAGE: &str =
    "No valid data points found. Ensure file is CSV or space/tab separated.";
pub const PARSE_ERROR_MESSAGE: &str = "Error parsing file. Please check the format.";

/// A parsed file waiting for the user to press "Plot Data".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingData {
    pub name: String,
    pub series: DataSeries,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum AnalysisStatus {
    #[default]
    Idle,
    /// A request is in flight for the given data generation.
    Running { generation: u64 },
    Ready(String),
}

/// Everything that can change the application state.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    FileParsed { name: String, series: DataSeries },
    FileFailed { name: String, reason: String },
    Commit,
    SetTitle(String),
    SetXLabel(String),
    SetYLabel(String),
    SetRange { axis: Axis, bound: Bound, value: Option<f64> },
    /// Drag-selection on the chart; the ends may arrive in either order.
    ZoomX { from: f64, to: f64 },
    ResetZoom,
    AnalysisStarted,
    AnalysisFinished { generation: u64, text: String },
    ToggleTheme,
    ToggleTable,
    /// An image or CSV export failed; the reason is shown to the user.
    ExportFailed(String),
    DismissError,
}

/// Application state. Only [`AppState::reduce`] produces a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub series: DataSeries,
    pub series_name: Option<String>,
    pub stats: DataStats,
    pub pending: Option<PendingData>,
    pub config: PlotConfig,
    pub error: Option<String>,
    pub analysis: AnalysisStatus,
    /// Bumped on every commit so late analysis results for replaced data
    /// are dropped.
    pub generation: u64,
    pub theme: Theme,
    pub show_table: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            series: DataSeries::default(),
            series_name: None,
            stats: DataStats::default(),
            pending: None,
            config: PlotConfig::default(),
            error: None,
            analysis: AnalysisStatus::Idle,
            generation: 0,
            theme: Theme::default(),
            show_table: false,
        }
    }

    pub fn has_data(&self) -> bool {
        !self.series.is_empty()
    }

    pub fn can_plot(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| !p.series.is_empty())
    }

    pub fn is_zoomed(&self) -> bool {
        !self.config.x_range.is_auto()
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.analysis, AnalysisStatus::Running { .. })
    }

    pub fn reduce(self, event: Event) -> Self {
        match event {
            Event::FileParsed { name, series } => {
                if series.is_empty() {
                    tracing::warn!("No valid data points in {name}");
                    AppState {
                        pending: None,
                        error: Some(NO_VALID_DATA_MESSAGE.to_string()),
                        ..self
                    }
                } else {
                    tracing::info!("Loaded {} points from {name}", series.len());
                    AppState {
                        pending: Some(PendingData { name, series }),
                        error: None,
                        ..self
                    }
                }
            }
            Event::FileFailed { name, reason } => {
                tracing::error!("Failed to load {name}: {reason}");
                AppState {
                    pending: None,
                    error: Some(PARSE_ERROR_MESSAGE.to_string()),
                    ..self
                }
            }
            Event::Commit => match self.pending.clone() {
                Some(PendingData { name, series }) if !series.is_empty() => {
                    let stats = DataStats::compute(&series);
                    AppState {
                        stats,
                        series,
                        series_name: Some(name),
                        config: self.config.clone().with_auto_ranges(),
                        analysis: AnalysisStatus::Idle,
                        generation: self.generation + 1,
                        ..self
                    }
                }
                _ => self,
            },
            Event::SetTitle(title) => AppState {
                config: PlotConfig { title, ..self.config.clone() },
                ..self
            },
            Event::SetXLabel(x_label) => AppState {
                config: PlotConfig { x_label, ..self.config.clone() },
                ..self
            },
            Event::SetYLabel(y_label) => AppState {
                config: PlotConfig { y_label, ..self.config.clone() },
                ..self
            },
            Event::SetRange { axis, bound, value } => {
                let value = value.filter(|v| v.is_finite());
                let range = self.config.range(axis).with(bound, value);
                AppState {
                    config: self.config.clone().with_range(axis, range),
                    ..self
                }
            }
            Event::ZoomX { from, to } => {
                if !from.is_finite() || !to.is_finite() || from == to {
                    return self;
                }
                let range = AxisRange {
                    min: Some(from.min(to)),
                    max: Some(from.max(to)),
                };
                AppState {
                    config: self.config.clone().with_range(Axis::X, range),
                    ..self
                }
            }
            Event::ResetZoom => AppState {
                config: self.config.clone().with_auto_ranges(),
                ..self
            },
            Event::AnalysisStarted => {
                if !self.has_data() || self.is_analyzing() {
                    return self;
                }
                AppState {
                    analysis: AnalysisStatus::Running {
                        generation: self.generation,
                    },
                    ..self
                }
            }
            Event::AnalysisFinished { generation, text } => match self.analysis {
                AnalysisStatus::Running { generation: current } if current == generation => {
                    AppState {
                        analysis: AnalysisStatus::Ready(text),
                        ..self
                    }
                }
                _ => {
                    tracing::debug!("Dropping analysis result for generation {generation}");
                    self
                }
            },
            Event::ToggleTheme => AppState {
                theme: self.theme.toggle(),
                ..self
            },
            Event::ToggleTable => AppState {
                show_table: !self.show_table,
                ..self
            },
            Event::ExportFailed(reason) => {
                tracing::error!("Export failed: {reason}");
                AppState {
                    error: Some(format!("Export failed: {reason}")),
                    ..self
                }
            }
            Event::DismissError => AppState { error: None, ..self },
        }
    }
}
