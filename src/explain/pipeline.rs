//! # Explanation Pipeline
//!
//! Entry point for the explain feature. Collaborators are passed in
//! explicitly; nothing here reads the environment.
//!
//! ```text
//! request ─┬─ plan queries ─ retrieve context ─┬─ synthesize ─ sanitize ─ result
//!          └─ resolve image ────────────────────┘
//! ```
//!
//! Context retrieval and image resolution are independent and run
//! concurrently. Both degrade instead of failing (sentinel context, no
//! image); only the synthesis stage can fail the request.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::config::{ExplainConfig, MISSING_CONFIGURATION};
use super::context::ContextRetriever;
use super::errors::{ExplainError, ExplainResult};
use super::image::{HttpLinkProbe, ImageResolver, LinkProbe};
use super::model::{GeminiModel, TextModel};
use super::planner::plan_context_queries;
use super::search::{CustomSearchClient, SearchClient};
use super::synthesizer::Synthesizer;
use crate::observability::Event;

const USER_AGENT: &str = concat!("iceberg-explorer/", env!("CARGO_PKG_VERSION"));

/// A validated explain request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanationRequest {
    chart_name: String,
    entry_text: String,
}

impl ExplanationRequest {
    /// Both fields must be non-blank
    pub fn new(chart_name: &str, entry_text: &str) -> ExplainResult<Self> {
        Self::from_fields(Some(chart_name), Some(entry_text))
    }

    /// Validate optional fields as they arrive from a request body
    pub fn from_fields(chart_name: Option<&str>, entry_text: Option<&str>) -> ExplainResult<Self> {
        let chart_name = non_blank(chart_name)?;
        let entry_text = non_blank(entry_text)?;
        Ok(Self {
            chart_name,
            entry_text,
        })
    }

    pub fn chart_name(&self) -> &str {
        &self.chart_name
    }

    pub fn entry_text(&self) -> &str {
        &self.entry_text
    }
}

fn non_blank(value: Option<&str>) -> ExplainResult<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ExplainError::MissingInput(MISSING_CONFIGURATION.to_string()))
}

/// Explanation plus an optional verified image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationResult {
    /// Sanitized HTML fragment
    #[serde(rename = "explanation")]
    pub explanation_html: String,
    /// Null, or a URL that passed its liveness probe
    pub image_url: Option<String>,
}

/// Search-grounded explanation pipeline
#[derive(Clone)]
pub struct ExplanationPipeline {
    retriever: ContextRetriever,
    images: ImageResolver,
    synthesizer: Synthesizer,
}

impl ExplanationPipeline {
    /// Assemble from explicit collaborators
    pub fn new(
        search: Arc<dyn SearchClient>,
        probe: Arc<dyn LinkProbe>,
        model: Arc<dyn TextModel>,
        config: &ExplainConfig,
    ) -> Self {
        Self {
            retriever: ContextRetriever::new(search.clone(), config.context_results),
            images: ImageResolver::new(search, probe, config.image_candidates),
            synthesizer: Synthesizer::new(model),
        }
    }

    /// Assemble HTTP-backed collaborators. Fails with MissingInput when any
    /// credential is absent.
    pub fn from_config(config: &ExplainConfig) -> ExplainResult<Self> {
        let credentials = config.credentials()?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ExplainError::ClientInit(e.to_string()))?;

        let search = Arc::new(CustomSearchClient::new(
            http.clone(),
            config.search_endpoint.clone(),
            credentials.search_api_key,
            credentials.search_engine_id,
        ));
        let probe = Arc::new(HttpLinkProbe::new(http.clone(), config.probe_timeout()));
        let model = Arc::new(GeminiModel::new(
            http,
            config.model_endpoint.clone(),
            config.model.clone(),
            credentials.model_api_key,
        ));

        Ok(Self::new(search, probe, model, config))
    }

    /// Run all stages for one request
    pub async fn explain(&self, request: &ExplanationRequest) -> ExplainResult<ExplanationResult> {
        let queries = plan_context_queries(request.chart_name(), request.entry_text());

        let (context, image_url) = tokio::join!(
            self.retriever.retrieve(&queries),
            self.images.resolve(request.entry_text()),
        );

        let explanation_html = self.synthesizer.synthesize(request, &context).await?;

        info!(
            event = %Event::ExplanationComplete,
            chart = request.chart_name(),
            entry = request.entry_text(),
            context_found = context.is_found(),
            image = image_url.is_some(),
        );

        Ok(ExplanationResult {
            explanation_html,
            image_url,
        })
    }
}
