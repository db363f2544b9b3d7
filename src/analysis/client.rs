use serde::{Deserialize, Serialize};

use crate::analysis::config::AnalysisConfig;
use crate::analysis::error::AnalysisError;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, or `None` if it is blank.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

/// Blocking client for the Gemini `generateContent` endpoint.
///
/// One request per call; there is no retry.
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        let api_key = config.api_key.clone().ok_or(AnalysisError::MissingApiKey)?;
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint(),
            api_key,
        })
    }

    pub fn generate(&self, prompt: &str) -> Result<GenerateResponse, AnalysisError> {
        let request = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };

        tracing::debug!("POST {} ({} prompt bytes)", self.endpoint, prompt.len());
        let response = self
            .http
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

fn api_error(status: u16, body: &str) -> AnalysisError {
    let message = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody { error }) if !error.status.is_empty() => {
            format!("{}: {}", error.status, error.message)
        }
        Ok(ApiErrorBody { error }) => error.message,
        Err(_) => body.chars().take(200).collect(),
    };
    AnalysisError::Api { status, message }
}
