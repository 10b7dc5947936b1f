//! # Image Resolver
//!
//! Image search results are often stale or hot-link blocked. Each candidate
//! is probed in rank order and the first one that answers 2xx wins.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::planner::plan_image_query;
use super::search::{SearchClient, SearchMode};
use crate::observability::Event;

/// Lightweight existence check for a URL
#[async_trait]
pub trait LinkProbe: Send + Sync {
    /// True when the URL currently answers with a 2xx status
    async fn is_live(&self, url: &str) -> bool;
}

/// HEAD-request probe bounded by a short timeout
#[derive(Debug, Clone)]
pub struct HttpLinkProbe {
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpLinkProbe {
    pub fn new(http: reqwest::Client, timeout: Duration) -> Self {
        Self { http, timeout }
    }
}

#[async_trait]
impl LinkProbe for HttpLinkProbe {
    async fn is_live(&self, url: &str) -> bool {
        match self.http.head(url).timeout(self.timeout).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                debug!(url, status = %response.status(), "probe rejected");
                false
            }
            Err(e) => {
                debug!(url, error = %e, "probe failed");
                false
            }
        }
    }
}

/// Finds a live image for an entry
#[derive(Clone)]
pub struct ImageResolver {
    search: Arc<dyn SearchClient>,
    probe: Arc<dyn LinkProbe>,
    candidates: u8,
}

impl ImageResolver {
    pub fn new(search: Arc<dyn SearchClient>, probe: Arc<dyn LinkProbe>, candidates: u8) -> Self {
        Self {
            search,
            probe,
            candidates,
        }
    }

    /// Highest-ranked candidate that passes its probe, or None
    pub async fn resolve(&self, entry_text: &str) -> Option<String> {
        let query = plan_image_query(entry_text);

        let items = match self
            .search
            .search(&query, SearchMode::Image, self.candidates)
            .await
        {
            Ok(items) => items,
            Err(e) => {
                warn!(event = %Event::ImageSearchFailed, query = %query, error = %e);
                return None;
            }
        };

        for (rank, link) in items
            .iter()
            .filter_map(|item| item.link.as_deref())
            .enumerate()
        {
            if self.probe.is_live(link).await {
                info!(event = %Event::ImageResolved, rank, url = link);
                return Some(link.to_string());
            }
            info!(event = %Event::ImageProbeFailed, rank, url = link);
        }

        info!(event = %Event::ImageUnresolved, query = %query, candidates = items.len());
        None
    }
}
