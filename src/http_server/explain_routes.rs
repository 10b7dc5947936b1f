//! Explain HTTP Routes
//!
//! `POST /api/explain` runs the explanation pipeline for one entry.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tracing::warn;

use super::response::{reply, ApiError};
use crate::explain::{
    ExplainConfig, ExplainError, ExplanationPipeline, ExplanationRequest, ExplanationResult,
    MISSING_CONFIGURATION,
};
use crate::observability::Event;

/// Shared explain state. `None` when credentials are missing.
pub struct ExplainState {
    pub pipeline: Option<ExplanationPipeline>,
}

impl ExplainState {
    pub fn new(pipeline: Option<ExplanationPipeline>) -> Self {
        Self { pipeline }
    }

    /// Build from configuration; missing credentials disable the endpoint
    /// rather than failing boot.
    pub fn from_config(config: &ExplainConfig) -> Self {
        match ExplanationPipeline::from_config(config) {
            Ok(pipeline) => Self::new(Some(pipeline)),
            Err(e) => {
                warn!(event = %Event::ExplainDisabled, reason = %e);
                Self::new(None)
            }
        }
    }
}

/// Explain routes with shared state
pub fn explain_routes(state: Arc<ExplainState>) -> Router {
    Router::new()
        .route("/api/explain", post(explain_handler))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ExplainBody {
    #[serde(default)]
    pub chart_name: Option<String>,
    #[serde(default)]
    pub entry_text: Option<String>,
}

/// Explain handler
async fn explain_handler(
    State(state): State<Arc<ExplainState>>,
    body: Result<Json<ExplainBody>, JsonRejection>,
) -> Result<Json<ExplanationResult>, ApiError> {
    let pipeline = state
        .pipeline
        .as_ref()
        .ok_or_else(|| reply(ExplainError::MissingInput(MISSING_CONFIGURATION.to_string())))?;
    let Json(body) = body.map_err(reply)?;

    let request =
        ExplanationRequest::from_fields(body.chart_name.as_deref(), body.entry_text.as_deref())
            .map_err(reply)?;

    pipeline.explain(&request).await.map(Json).map_err(reply)
}
