//! # Search Query Planner
//!
//! Context queries are tried from most to least specific. The chain is a
//! fixed list so its order can be inspected and tested on its own.

use std::fmt;

/// How specific a planned query is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Specificity {
    /// Entry scoped to its chart
    InChart,
    /// Entry in any iceberg chart
    Iceberg,
    /// Entry as a piece of lore
    Lore,
}

impl Specificity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Specificity::InChart => "in_chart",
            Specificity::Iceberg => "iceberg",
            Specificity::Lore => "lore",
        }
    }
}

/// A candidate web search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub specificity: Specificity,
    pub text: String,
}

impl SearchQuery {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Context queries for an entry, most specific first
pub fn plan_context_queries(chart_name: &str, entry_text: &str) -> [SearchQuery; 3] {
    [
        SearchQuery {
            specificity: Specificity::InChart,
            text: format!(
                "\"{}\" meaning in \"{}\" iceberg chart",
                entry_text, chart_name
            ),
        },
        SearchQuery {
            specificity: Specificity::Iceberg,
            text: format!("\"{}\" iceberg explanation", entry_text),
        },
        SearchQuery {
            specificity: Specificity::Lore,
            text: format!("\"{}\" lore", entry_text),
        },
    ]
}

/// The single image-mode query for an entry
pub fn plan_image_query(entry_text: &str) -> String {
    format!("\"{}\"", entry_text)
}
