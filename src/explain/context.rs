//! # Context Retriever
//!
//! Walks the planned query chain in order and keeps the snippets of the first
//! query that yields any. Snippets are never mixed across queries.

use std::sync::Arc;

use tracing::{info, warn};

use super::planner::SearchQuery;
use super::search::{SearchClient, SearchItem, SearchMode};
use crate::observability::Event;

/// Context handed to the model when search found nothing
pub const NO_CONTEXT: &str = "Web search failed or returned no results.";

/// Aggregated snippet text, or the no-context sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchContext {
    Found {
        /// Query whose results were kept
        query: String,
        /// Snippets joined with a single space
        text: String,
    },
    NotFound,
}

impl SearchContext {
    /// Text to embed in the prompt
    pub fn as_prompt_text(&self) -> &str {
        match self {
            SearchContext::Found { text, .. } => text,
            SearchContext::NotFound => NO_CONTEXT,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchContext::Found { .. })
    }
}

/// Ordered-fallback text search
#[derive(Clone)]
pub struct ContextRetriever {
    search: Arc<dyn SearchClient>,
    results_per_query: u8,
}

impl ContextRetriever {
    pub fn new(search: Arc<dyn SearchClient>, results_per_query: u8) -> Self {
        Self {
            search,
            results_per_query,
        }
    }

    /// Try each query in order; failures count as zero snippets.
    ///
    /// A permanent failure (rejected key, bad engine id) ends the chain early
    /// since every remaining query would fail the same way.
    pub async fn retrieve(&self, queries: &[SearchQuery]) -> SearchContext {
        for query in queries {
            info!(
                event = %Event::SearchAttempt,
                query = %query,
                specificity = query.specificity.as_str(),
            );

            match self
                .search
                .search(query.as_str(), SearchMode::Text, self.results_per_query)
                .await
            {
                Ok(items) => {
                    let snippets = collect_snippets(&items);
                    if snippets.is_empty() {
                        info!(event = %Event::SearchMiss, query = %query);
                        continue;
                    }

                    info!(
                        event = %Event::SearchHit,
                        query = %query,
                        snippets = snippets.len(),
                    );
                    return SearchContext::Found {
                        query: query.text.clone(),
                        text: snippets.join(" "),
                    };
                }
                Err(e) => {
                    warn!(event = %Event::SearchFailed, query = %query, error = %e);
                    if e.is_permanent() {
                        break;
                    }
                }
            }
        }

        info!(event = %Event::ContextExhausted, queries = queries.len());
        SearchContext::NotFound
    }
}

fn collect_snippets(items: &[SearchItem]) -> Vec<&str> {
    items
        .iter()
        .filter_map(|item| item.snippet.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
