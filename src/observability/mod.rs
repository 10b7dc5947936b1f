//! Observability subsystem
//!
//! Diagnostics go through `tracing`. Each line is tagged with an [`Event`]
//! name plus structured fields:
//!
//! ```ignore
//! use iceberg_explorer::observability::Event;
//!
//! tracing::info!(event = %Event::SearchHit, query = "...", snippets = 3);
//! ```
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. Logging never fails the operation being logged

mod events;
mod subscriber;

pub use events::Event;
pub use subscriber::{init_tracing, LogFormat, DEFAULT_FILTER};
