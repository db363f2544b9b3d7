use thiserror::Error;

use crate::processing::downsampling::DownsampleError;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("API key not found (set GEMINI_API_KEY or API_KEY)")]
    MissingApiKey,
    #[error("Reqwest: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Downsample: {0}")]
    Downsample(#[from] DownsampleError),
}
