pub mod app_state;
pub mod plot_config;
pub mod theme;

pub use app_state::{AnalysisStatus, AppState, Event, PendingData};
pub use plot_config::{parse_bound, Axis, AxisRange, Bound, PlotConfig};
pub use theme::Theme;
