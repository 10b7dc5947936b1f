//! Shared collaborators for integration tests
//!
//! Text and image searches are scripted separately because the pipeline
//! runs them concurrently.

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use iceberg_explorer::explain::{
    ExplainConfig, ExplainError, ExplainResult, ExplanationPipeline, LinkProbe, SearchClient,
    SearchItem, SearchMode, TextModel,
};

pub type Reply = ExplainResult<Vec<SearchItem>>;

pub fn snippets(texts: &[&str]) -> Reply {
    Ok(texts.iter().map(|t| SearchItem::with_snippet(*t)).collect())
}

pub fn links(urls: &[&str]) -> Reply {
    Ok(urls.iter().map(|u| SearchItem::with_link(*u)).collect())
}

/// Search fake with one reply queue per mode. Exhausted queues answer empty.
#[derive(Default)]
pub struct SplitSearch {
    text: Mutex<VecDeque<Reply>>,
    image: Mutex<VecDeque<Reply>>,
    text_queries: Mutex<Vec<String>>,
    image_queries: Mutex<Vec<String>>,
}

impl SplitSearch {
    pub fn new(text: Vec<Reply>, image: Vec<Reply>) -> Self {
        Self {
            text: Mutex::new(text.into()),
            image: Mutex::new(image.into()),
            ..Default::default()
        }
    }

    pub fn text_queries(&self) -> Vec<String> {
        self.text_queries.lock().unwrap().clone()
    }

    pub fn image_queries(&self) -> Vec<String> {
        self.image_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchClient for SplitSearch {
    async fn search(&self, query: &str, mode: SearchMode, _limit: u8) -> Reply {
        let (queue, log) = match mode {
            SearchMode::Text => (&self.text, &self.text_queries),
            SearchMode::Image => (&self.image, &self.image_queries),
        };
        log.lock().unwrap().push(query.to_string());
        queue.lock().unwrap().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Probe fake: live only for the listed URLs
#[derive(Default)]
pub struct ListProbe {
    live: HashSet<String>,
    probed: Mutex<Vec<String>>,
}

impl ListProbe {
    pub fn live(urls: &[&str]) -> Self {
        Self {
            live: urls.iter().map(|u| u.to_string()).collect(),
            probed: Mutex::new(Vec::new()),
        }
    }

    pub fn probed(&self) -> Vec<String> {
        self.probed.lock().unwrap().clone()
    }
}

#[async_trait]
impl LinkProbe for ListProbe {
    async fn is_live(&self, url: &str) -> bool {
        self.probed.lock().unwrap().push(url.to_string());
        self.live.contains(url)
    }
}

/// Model fake that records prompts
pub struct CannedModel {
    reply: ExplainResult<String>,
    prompts: Mutex<Vec<String>>,
}

impl CannedModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            reply: Err(ExplainError::GenerationFailure(reason.to_string())),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextModel for CannedModel {
    async fn generate(&self, prompt: &str) -> ExplainResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}

pub fn pipeline(
    search: &Arc<SplitSearch>,
    probe: &Arc<ListProbe>,
    model: &Arc<CannedModel>,
) -> ExplanationPipeline {
    ExplanationPipeline::new(
        search.clone(),
        probe.clone(),
        model.clone(),
        &ExplainConfig::default(),
    )
}
