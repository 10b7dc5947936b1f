//! # Explanation Synthesizer
//!
//! Builds one prompt from the entry, its chart, and the retrieved context,
//! calls the model once, and sanitizes the answer into embeddable HTML.

use std::sync::Arc;

use tracing::warn;

use super::context::SearchContext;
use super::errors::{ExplainError, ExplainResult};
use super::model::TextModel;
use super::sanitize::sanitize;
use super::ExplanationRequest;
use crate::observability::Event;

/// Prompt for one entry. Restricts the answer to `<p>` and `<b>` markup.
pub fn build_prompt(request: &ExplanationRequest, context: &SearchContext) -> String {
    format!(
        "You are an expert explainer of internet culture. Provide a clear, concise explanation \
         for the iceberg entry: '{entry}' from the '{chart}' iceberg chart. \
         Use this web search context: '{context}'. \
         Format your response in simple HTML using only paragraphs (<p>) and bold tags (<b>).",
        entry = request.entry_text(),
        chart = request.chart_name(),
        context = context.as_prompt_text(),
    )
}

/// One-shot model call plus output cleanup
#[derive(Clone)]
pub struct Synthesizer {
    model: Arc<dyn TextModel>,
}

impl Synthesizer {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    /// Explanation HTML for the request, or GenerationFailure
    pub async fn synthesize(
        &self,
        request: &ExplanationRequest,
        context: &SearchContext,
    ) -> ExplainResult<String> {
        let prompt = build_prompt(request, context);

        let raw = self.model.generate(&prompt).await.map_err(|e| {
            warn!(event = %Event::GenerationFailed, entry = request.entry_text(), error = %e);
            match e {
                ExplainError::GenerationFailure(_) => e,
                other => ExplainError::GenerationFailure(other.to_string()),
            }
        })?;

        let html = sanitize(&raw);
        if html.trim().is_empty() {
            warn!(event = %Event::GenerationFailed, entry = request.entry_text(), "empty output");
            return Err(ExplainError::GenerationFailure(
                "model output was empty after cleanup".to_string(),
            ));
        }

        Ok(html)
    }
}
