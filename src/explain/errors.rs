//! # Explain Errors
//!
//! Error types for the explanation pipeline.

use thiserror::Error;

/// Result type for explanation operations
pub type ExplainResult<T> = Result<T, ExplainError>;

/// Explanation pipeline errors
#[derive(Debug, Clone, Error)]
pub enum ExplainError {
    /// Request field or credential absent; the pipeline never runs
    #[error("{0}")]
    MissingInput(String),

    /// One search attempt failed. Absorbed by the retriever and resolver.
    #[error("Search unavailable: {reason}")]
    SearchUnavailable {
        reason: String,
        /// Retrying with another query cannot help (bad key, bad engine id)
        permanent: bool,
    },

    /// Model call failed or produced nothing usable
    #[error("Failed to process AI explanation: {0}")]
    GenerationFailure(String),

    /// An outbound HTTP client could not be built
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}

impl ExplainError {
    /// Transient search failure
    pub fn search_transient(reason: impl Into<String>) -> Self {
        ExplainError::SearchUnavailable {
            reason: reason.into(),
            permanent: false,
        }
    }

    /// Search failure that will repeat for every query
    pub fn search_permanent(reason: impl Into<String>) -> Self {
        ExplainError::SearchUnavailable {
            reason: reason.into(),
            permanent: true,
        }
    }

    /// Whether further search attempts are pointless
    pub fn is_permanent(&self) -> bool {
        matches!(self, ExplainError::SearchUnavailable { permanent: true, .. })
    }

    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ExplainError::MissingInput(_) => 400,
            ExplainError::SearchUnavailable { .. } => 502,
            ExplainError::GenerationFailure(_) => 500,
            ExplainError::ClientInit(_) => 500,
        }
    }
}

/// Describe a transport error without its URL. Request URLs carry API keys.
pub(crate) fn transport_reason(context: &str, err: reqwest::Error) -> String {
    format!("{}: {}", context, err.without_url())
}
