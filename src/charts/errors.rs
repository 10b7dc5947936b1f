//! # Chart Errors

use thiserror::Error;

/// Result type for catalogue operations
pub type ChartResult<T> = Result<T, ChartError>;

/// Catalogue errors
#[derive(Debug, Clone, Error)]
pub enum ChartError {
    #[error("Chart not found: {0}")]
    ChartNotFound(String),

    #[error("Layer not found: {0}")]
    LayerNotFound(i64),

    #[error("Entry not found: {0}")]
    EntryNotFound(i64),

    #[error("Chart already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ChartError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ChartError::ChartNotFound(_) => 404,
            ChartError::LayerNotFound(_) => 404,
            ChartError::EntryNotFound(_) => 404,
            ChartError::AlreadyExists(_) => 409,
            ChartError::InvalidInput(_) => 400,
            ChartError::Storage(_) => 500,
        }
    }
}
