//! Scripted collaborators and a loopback HTTP server for explain tests

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::Router;
use tokio::net::TcpListener;

use super::errors::{ExplainError, ExplainResult};
use super::image::LinkProbe;
use super::model::TextModel;
use super::search::{SearchClient, SearchItem, SearchMode};

/// Reply for one search call
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Items(Vec<SearchItem>),
    Fail(ExplainError),
}

impl SearchOutcome {
    pub fn snippets(snippets: &[&str]) -> Self {
        SearchOutcome::Items(snippets.iter().map(|s| SearchItem::with_snippet(*s)).collect())
    }

    pub fn links(links: &[&str]) -> Self {
        SearchOutcome::Items(links.iter().map(|l| SearchItem::with_link(*l)).collect())
    }
}

/// Replays outcomes in call order; empty results once exhausted
#[derive(Default)]
pub struct ScriptedSearch {
    outcomes: Mutex<VecDeque<SearchOutcome>>,
    calls: Mutex<Vec<(String, SearchMode, u8)>>,
}

impl ScriptedSearch {
    pub fn new(outcomes: Vec<SearchOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, SearchMode, u8)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchClient for ScriptedSearch {
    async fn search(
        &self,
        query: &str,
        mode: SearchMode,
        limit: u8,
    ) -> ExplainResult<Vec<SearchItem>> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), mode, limit));

        match self.outcomes.lock().unwrap().pop_front() {
            Some(SearchOutcome::Items(items)) => Ok(items),
            Some(SearchOutcome::Fail(e)) => Err(e),
            None => Ok(Vec::new()),
        }
    }
}

/// Answers true only for listed URLs
#[derive(Default)]
pub struct ScriptedProbe {
    live: HashSet<String>,
    probed: Mutex<Vec<String>>,
}

impl ScriptedProbe {
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
impl LinkProbe for ScriptedProbe {
    async fn is_live(&self, url: &str) -> bool {
        self.probed.lock().unwrap().push(url.to_string());
        self.live.contains(url)
    }
}

/// Fixed reply or fixed failure
pub struct ScriptedModel {
    reply: ExplainResult<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ExplainError) -> Self {
        Self {
            reply: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextModel for ScriptedModel {
    async fn generate(&self, prompt: &str) -> ExplainResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}

/// Serve `router` on an ephemeral loopback port and return its base URL
pub async fn serve_local(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL of a loopback port with nothing listening
pub async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
