//! # Explanation Module
//!
//! AI-assisted explanations for iceberg entries, grounded in web search.
//!
//! # Stages
//!
//! - [`planner`] - ordered context queries, most specific first
//! - [`context`] - first query with snippets wins; sentinel otherwise
//! - [`image`] - first image candidate that passes a liveness probe
//! - [`synthesizer`] - single model call
//! - [`sanitize`] - strips code-fence wrappers from model output
//!
//! Search and probe failures are absorbed. Only a model failure reaches the
//! caller, as [`ExplainError::GenerationFailure`].

pub mod config;
pub mod context;
pub mod errors;
pub mod image;
pub mod model;
pub mod pipeline;
pub mod planner;
pub mod sanitize;
pub mod search;
pub mod synthesizer;

#[cfg(test)]
pub(crate) mod fakes;

pub use config::{Credentials, ExplainConfig, MISSING_CONFIGURATION};
pub use context::{ContextRetriever, SearchContext, NO_CONTEXT};
pub use errors::{ExplainError, ExplainResult};
pub use image::{HttpLinkProbe, ImageResolver, LinkProbe};
pub use model::{GeminiModel, TextModel};
pub use pipeline::{ExplanationPipeline, ExplanationRequest, ExplanationResult};
pub use planner::{plan_context_queries, plan_image_query, SearchQuery, Specificity};
pub use sanitize::sanitize;
pub use search::{CustomSearchClient, SearchClient, SearchItem, SearchMode};
pub use synthesizer::{build_prompt, Synthesizer};
