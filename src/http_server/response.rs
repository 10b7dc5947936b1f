//! Shared error body for all routes

use axum::extract::rejection::JsonRejection;
use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::charts::ChartError;
use crate::explain::ExplainError;

/// JSON error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// Handler error: status plus JSON body
pub type ApiError = (StatusCode, Json<ErrorResponse>);

impl ErrorResponse {
    pub fn new(code: u16, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }

    /// Pair the body with its status
    pub fn into_reply(self) -> ApiError {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self))
    }
}

impl From<ExplainError> for ErrorResponse {
    fn from(err: ExplainError) -> Self {
        Self::new(err.status_code(), err.to_string())
    }
}

impl From<ChartError> for ErrorResponse {
    fn from(err: ChartError) -> Self {
        Self::new(err.status_code(), err.to_string())
    }
}

impl From<JsonRejection> for ErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status().as_u16(), rejection.body_text())
    }
}

/// Map any convertible error to a handler error
pub fn reply<E: Into<ErrorResponse>>(err: E) -> ApiError {
    err.into().into_reply()
}
