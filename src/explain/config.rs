//! Explanation pipeline configuration
//!
//! Credentials are optional here so a server can boot without them; the
//! pipeline refuses to build until all three are present.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::errors::{ExplainError, ExplainResult};

/// Message returned when request fields or credentials are absent
pub const MISSING_CONFIGURATION: &str = "Missing data or API key configuration.";

/// Environment variable for the search API key
pub const SEARCH_API_KEY_ENV: &str = "CUSTOM_SEARCH_API_KEY";
/// Environment variable for the search engine identifier
pub const SEARCH_ENGINE_ID_ENV: &str = "CUSTOM_SEARCH_ENGINE_ID";
/// Environment variable for the generative model API key
pub const MODEL_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Explanation pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainConfig {
    #[serde(default)]
    pub search_api_key: Option<String>,

    #[serde(default)]
    pub search_engine_id: Option<String>,

    #[serde(default)]
    pub model_api_key: Option<String>,

    /// Custom search endpoint (default: Google Custom Search v1)
    #[serde(default = "default_search_endpoint")]
    pub search_endpoint: String,

    /// Generative language API base URL
    #[serde(default = "default_model_endpoint")]
    pub model_endpoint: String,

    /// Model name (default: "gemini-1.5-flash-latest")
    #[serde(default = "default_model")]
    pub model: String,

    /// Results requested per context query (default: 3)
    #[serde(default = "default_context_results")]
    pub context_results: u8,

    /// Image candidates requested (default: 5)
    #[serde(default = "default_image_candidates")]
    pub image_candidates: u8,

    /// Liveness probe timeout in milliseconds (default: 2000)
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Timeout for search and model requests in milliseconds (default: 20000)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_search_endpoint() -> String {
    "https://www.googleapis.com/customsearch/v1".to_string()
}

fn default_model_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}

fn default_context_results() -> u8 {
    3
}

fn default_image_candidates() -> u8 {
    5
}

fn default_probe_timeout_ms() -> u64 {
    2000
}

fn default_request_timeout_ms() -> u64 {
    20000
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            search_api_key: None,
            search_engine_id: None,
            model_api_key: None,
            search_endpoint: default_search_endpoint(),
            model_endpoint: default_model_endpoint(),
            model: default_model(),
            context_results: default_context_results(),
            image_candidates: default_image_candidates(),
            probe_timeout_ms: default_probe_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// Credentials that passed the presence check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub search_api_key: String,
    pub search_engine_id: String,
    pub model_api_key: String,
}

impl ExplainConfig {
    /// Fill empty credentials from a lookup (normally `std::env::var`)
    pub fn overlay<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        fill(&mut self.search_api_key, lookup(SEARCH_API_KEY_ENV));
        fill(&mut self.search_engine_id, lookup(SEARCH_ENGINE_ID_ENV));
        fill(&mut self.model_api_key, lookup(MODEL_API_KEY_ENV));
    }

    /// Check the tunables. Credentials are checked by [`Self::credentials`].
    pub fn validate(&self) -> Result<(), String> {
        if self.context_results == 0 {
            return Err("explain.context_results must be > 0".to_string());
        }
        if self.image_candidates == 0 {
            return Err("explain.image_candidates must be > 0".to_string());
        }
        if self.probe_timeout_ms == 0 {
            return Err("explain.probe_timeout_ms must be > 0".to_string());
        }
        if self.request_timeout_ms == 0 {
            return Err("explain.request_timeout_ms must be > 0".to_string());
        }
        Ok(())
    }

    /// All three credentials, or MissingInput
    pub fn credentials(&self) -> ExplainResult<Credentials> {
        match (
            present(&self.search_api_key),
            present(&self.search_engine_id),
            present(&self.model_api_key),
        ) {
            (Some(search_api_key), Some(search_engine_id), Some(model_api_key)) => {
                Ok(Credentials {
                    search_api_key,
                    search_engine_id,
                    model_api_key,
                })
            }
            _ => Err(ExplainError::MissingInput(MISSING_CONFIGURATION.to_string())),
        }
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn fill(slot: &mut Option<String>, value: Option<String>) {
    if present(slot).is_none() {
        if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
            *slot = Some(v);
        }
    }
}
