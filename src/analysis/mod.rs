//! Natural-language interpretation of a dataset by an external LLM service.
//!
//! The service only ever sees a downsampled sample of the series together
//! with the statistics of the full series.

pub mod client;
pub mod config;
pub mod error;
pub mod prompt;

pub use client::GeminiClient;
pub use config::AnalysisConfig;
pub use error::AnalysisError;

use crate::data::series::DataSeries;
use crate::processing::statistics::DataStats;

pub const MISSING_KEY_MESSAGE: &str = "API Key not found in environment. Analysis unavailable.";
pub const FAILURE_MESSAGE: &str =
    "An error occurred while analyzing the data. Please check your connection or API key quota.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "No analysis could be generated.";

/// Request an interpretation of `series`.
pub fn analyze(
    config: &AnalysisConfig,
    series: &DataSeries,
    stats: &DataStats,
    x_label: &str,
    y_label: &str,
) -> Result<String, AnalysisError> {
    let client = GeminiClient::new(config)?;
    let prompt = prompt::build_prompt(series, stats, x_label, y_label, config.sample_points)?;
    let response = client.generate(&prompt)?;
    Ok(response
        .text()
        .unwrap_or_else(|| EMPTY_RESPONSE_MESSAGE.to_string()))
}

/// Like [`analyze`] but always returns text fit for display; failures are
/// logged and replaced by a fixed message.
pub fn run_analysis(
    config: &AnalysisConfig,
    series: &DataSeries,
    stats: &DataStats,
    x_label: &str,
    y_label: &str,
) -> String {
    match analyze(config, series, stats, x_label, y_label) {
        Ok(text) => {
            tracing::info!("Analysis finished ({} chars)", text.len());
            text
        }
        Err(AnalysisError::MissingApiKey) => {
            tracing::warn!("Analysis requested without an API key");
            MISSING_KEY_MESSAGE.to_string()
        }
        Err(e) => {
            tracing::error!("Analysis failed: {e}");
            FAILURE_MESSAGE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_message() {
        let series = DataSeries::from_pairs([(0.0, 1.0)]);
        let stats = DataStats::compute(&series);
        let text = run_analysis(&AnalysisConfig::default(), &series, &stats, "x", "y");
        assert_eq!(text, MISSING_KEY_MESSAGE);
    }

    #[test]
    fn test_unreachable_service_message() {
        let config = AnalysisConfig {
            api_key: Some("test".into()),
            // Port 9 (discard) on loopback is expected to refuse connections.
            api_base: "http://127.0.0.1:9".into(),
            timeout: std::time::Duration::from_secs(2),
            ..AnalysisConfig::default()
        };
        let series = DataSeries::from_pairs([(0.0, 1.0), (1.0, 2.0)]);
        let stats = DataStats::compute(&series);
        assert_eq!(run_analysis(&config, &series, &stats, "x", "y"), FAILURE_MESSAGE);
    }
}
