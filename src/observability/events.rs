//! Observable events
//!
//! Every log line carries one of these names in its `event` field so logs can
//! be filtered without parsing messages.

use std::fmt;

/// Observable events in the explorer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Process startup begins
    BootStart,
    /// Configuration loaded
    ConfigLoaded,
    /// Explanation pipeline disabled (credentials missing)
    ExplainDisabled,
    /// HTTP listener bound
    ServerListening,

    // Context retrieval
    /// A context query is about to be sent
    SearchAttempt,
    /// A context query produced snippets
    SearchHit,
    /// A context query produced nothing
    SearchMiss,
    /// A context query failed
    SearchFailed,
    /// All context queries exhausted
    ContextExhausted,

    // Image resolution
    /// Image search failed
    ImageSearchFailed,
    /// A candidate failed its liveness probe
    ImageProbeFailed,
    /// A candidate passed its liveness probe
    ImageResolved,
    /// No candidate passed
    ImageUnresolved,

    // Generation
    /// Model call failed or output unusable
    GenerationFailed,
    /// Explanation produced
    ExplanationComplete,

    // Catalogue
    /// A chart file was imported
    ChartImported,
    /// A chart file was skipped (already present)
    ChartSkipped,
    /// A chart file could not be read or parsed
    ChartImportFailed,
}

impl Event {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ExplainDisabled => "EXPLAIN_DISABLED",
            Event::ServerListening => "SERVER_LISTENING",

            Event::SearchAttempt => "SEARCH_ATTEMPT",
            Event::SearchHit => "SEARCH_HIT",
            Event::SearchMiss => "SEARCH_MISS",
            Event::SearchFailed => "SEARCH_FAILED",
            Event::ContextExhausted => "CONTEXT_EXHAUSTED",

            Event::ImageSearchFailed => "IMAGE_SEARCH_FAILED",
            Event::ImageProbeFailed => "IMAGE_PROBE_FAILED",
            Event::ImageResolved => "IMAGE_RESOLVED",
            Event::ImageUnresolved => "IMAGE_UNRESOLVED",

            Event::GenerationFailed => "GENERATION_FAILED",
            Event::ExplanationComplete => "EXPLANATION_COMPLETE",

            Event::ChartImported => "CHART_IMPORTED",
            Event::ChartSkipped => "CHART_SKIPPED",
            Event::ChartImportFailed => "CHART_IMPORT_FAILED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
