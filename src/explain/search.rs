//! # Web Search Client
//!
//! The pipeline talks to search through [`SearchClient`] so stages can be
//! tested without the network. [`CustomSearchClient`] speaks the Google
//! Custom Search JSON API.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use super::errors::{transport_reason, ExplainError, ExplainResult};

/// Text results or image results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Text,
    Image,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Text => "text",
            SearchMode::Image => "image",
        }
    }
}

/// One ranked search result
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl SearchItem {
    pub fn with_snippet(snippet: impl Into<String>) -> Self {
        Self {
            snippet: Some(snippet.into()),
            link: None,
        }
    }

    pub fn with_link(link: impl Into<String>) -> Self {
        Self {
            snippet: None,
            link: Some(link.into()),
        }
    }
}

/// Web search service
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Run one query, returning at most `limit` items in rank order.
    ///
    /// Every failure is reported as `ExplainError::SearchUnavailable`.
    async fn search(
        &self,
        query: &str,
        mode: SearchMode,
        limit: u8,
    ) -> ExplainResult<Vec<SearchItem>>;
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

/// Google Custom Search JSON API client
#[derive(Debug, Clone)]
pub struct CustomSearchClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    engine_id: String,
}

impl CustomSearchClient {
    pub fn new(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            engine_id: engine_id.into(),
        }
    }

    fn params<'a>(
        &'a self,
        query: &'a str,
        mode: SearchMode,
        num: &'a str,
    ) -> Vec<(&'a str, &'a str)> {
        let mut params = vec![
            ("key", self.api_key.as_str()),
            ("cx", self.engine_id.as_str()),
            ("q", query),
            ("num", num),
        ];
        if mode == SearchMode::Image {
            params.push(("searchType", "image"));
        }
        params
    }
}

#[async_trait]
impl SearchClient for CustomSearchClient {
    async fn search(
        &self,
        query: &str,
        mode: SearchMode,
        limit: u8,
    ) -> ExplainResult<Vec<SearchItem>> {
        // The API caps `num` at 10
        let num = limit.clamp(1, 10).to_string();

        let response = self
            .http
            .get(&self.endpoint)
            .query(&self.params(query, mode, &num))
            .send()
            .await
            .map_err(|e| ExplainError::search_transient(transport_reason("HTTP error", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| {
                ExplainError::search_transient(transport_reason("JSON parse error", e))
            })?;

        let mut items = body.items;
        items.truncate(limit as usize);
        Ok(items)
    }
}

/// Rejected requests and keys fail the same way for every remaining query
fn status_error(status: StatusCode) -> ExplainError {
    let reason = format!("search API returned {}", status);
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ExplainError::search_permanent(reason)
        }
        _ => ExplainError::search_transient(reason),
    }
}
