use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Default Gemini model used for image edits
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Gemini upstream configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key; falls back to `GEMINI_API_KEY` when absent
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override (defaults to the public Generative Language API)
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Image-capable model name
    #[serde(default = "default_model")]
    pub model: String,
    /// Upstream request timeout (e.g. "90s"); unset means wait indefinitely
    #[serde(default)]
    pub timeout: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: default_model(),
            timeout: None,
        }
    }
}

impl GeminiConfig {
    /// Parse the configured timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is not a valid duration string
    pub fn timeout_duration(&self) -> anyhow::Result<Option<Duration>> {
        self.timeout
            .as_deref()
            .map(|s| duration_str::parse(s).map_err(|e| anyhow::anyhow!("invalid gemini.timeout '{s}': {e}")))
            .transpose()
    }

    /// Resolve the API key from configuration or the process environment
    pub fn resolve_api_key(&self) -> Option<SecretString> {
        self.api_key.clone().or_else(|| {
            std::env::var(API_KEY_ENV)
                .ok()
                .filter(|key| !key.is_empty())
                .map(SecretString::from)
        })
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
