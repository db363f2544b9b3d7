use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_SAMPLE_POINTS: usize = 30;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings for the analysis service, read from the environment.
///
/// | Variable                | Default                 |
/// |-------------------------|-------------------------|
/// | `GEMINI_API_KEY`        | falls back to `API_KEY` |
/// | `SCIPLOT_MODEL`         | `gemini-2.5-flash`      |
/// | `SCIPLOT_API_BASE`      | Google v1beta endpoint  |
/// | `SCIPLOT_SAMPLE_POINTS` | 30                      |
/// | `SCIPLOT_TIMEOUT_SECS`  | 60                      |
#[derive(Clone, PartialEq)]
pub struct AnalysisConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    /// Upper bound on sample points included in the prompt.
    pub sample_points: usize,
    pub timeout: Duration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            sample_points: DEFAULT_SAMPLE_POINTS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// Keeps the key out of logs.
impl std::fmt::Debug for AnalysisConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("sample_points", &self.sample_points)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AnalysisConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let sample_points = match get("SCIPLOT_SAMPLE_POINTS").map(|v| v.parse::<usize>()) {
            Some(Ok(n)) if n > 0 => n,
            Some(_) => {
                tracing::warn!(
                    "Ignoring invalid SCIPLOT_SAMPLE_POINTS, using {}",
                    DEFAULT_SAMPLE_POINTS
                );
                DEFAULT_SAMPLE_POINTS
            }
            None => DEFAULT_SAMPLE_POINTS,
        };

        let timeout = match get("SCIPLOT_TIMEOUT_SECS").map(|v| v.parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => Duration::from_secs(secs),
            Some(_) => {
                tracing::warn!(
                    "Ignoring invalid SCIPLOT_TIMEOUT_SECS, using {}",
                    DEFAULT_TIMEOUT_SECS
                );
                defaults.timeout
            }
            None => defaults.timeout,
        };

        Self {
            api_key: get("GEMINI_API_KEY").or_else(|| get("API_KEY")),
            model: get("SCIPLOT_MODEL").unwrap_or(defaults.model),
            api_base: get("SCIPLOT_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            sample_points,
            timeout,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AnalysisConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AnalysisConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config, AnalysisConfig::default());
        assert!(!config.has_api_key());
        assert_eq!(
            config.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_key_fallback_order() {
        assert_eq!(config(&[("API_KEY", "b")]).api_key.as_deref(), Some("b"));
        assert_eq!(
            config(&[("GEMINI_API_KEY", "a"), ("API_KEY", "b")]).api_key.as_deref(),
            Some("a")
        );
        assert_eq!(
            config(&[("GEMINI_API_KEY", "  "), ("API_KEY", "b")]).api_key.as_deref(),
            Some("b")
        );
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("SCIPLOT_MODEL", "gemini-pro"),
            ("SCIPLOT_API_BASE", "http://localhost:9000/v1/"),
            ("SCIPLOT_SAMPLE_POINTS", "12"),
            ("SCIPLOT_TIMEOUT_SECS", "5"),
        ]);
        assert_eq!(config.endpoint(), "http://localhost:9000/v1/models/gemini-pro:generateContent");
        assert_eq!(config.sample_points, 12);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = config(&[("SCIPLOT_SAMPLE_POINTS", "0"), ("SCIPLOT_TIMEOUT_SECS", "soon")]);
        assert_eq!(config.sample_points, DEFAULT_SAMPLE_POINTS);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_debug_hides_key() {
        let config = config(&[("GEMINI_API_KEY", "secret-value")]);
        assert!(!format!("{config:?}").contains("secret-value"));
    }
}
