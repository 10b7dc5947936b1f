//! # Model Output Sanitizer
//!
//! Generative models like to wrap their answer in a Markdown code fence even
//! when asked for plain markup. This strips the wrapper:
//!
//! 1. the first ```` ```html ```` block, if any
//! 2. otherwise the first ```` ```json ```` block, if any
//! 3. otherwise the text, untouched
//!
//! The extracted body never contains a triple backtick (the match is
//! non-greedy), so a second pass always falls through to case 3. That makes
//! `sanitize` idempotent.

use std::sync::OnceLock;

use regex::Regex;

/// Fence language tags, in extraction priority order
const FENCE_TAGS: [FenceTag; 2] = [FenceTag::Html, FenceTag::Json];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FenceTag {
    Html,
    Json,
}

impl FenceTag {
    fn pattern(&self) -> &'static Regex {
        static HTML: OnceLock<Regex> = OnceLock::new();
        static JSON: OnceLock<Regex> = OnceLock::new();

        match self {
            FenceTag::Html => HTML.get_or_init(|| compile("html")),
            FenceTag::Json => JSON.get_or_init(|| compile("json")),
        }
    }
}

fn compile(tag: &str) -> Regex {
    Regex::new(&format!(r"(?si)```{}\b\s*(.*?)\s*```", tag)).expect("fence pattern is valid")
}

/// Strip a code-fence wrapper from model output
pub fn sanitize(raw: &str) -> String {
    FENCE_TAGS
        .iter()
        .find_map(|tag| fenced_body(raw, *tag))
        .map(|body| body.trim().to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn fenced_body(raw: &str, tag: FenceTag) -> Option<&str> {
    tag.pattern()
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
