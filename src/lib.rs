//! iceberg-explorer - browse iceberg charts and explain their entries
//!
//! Explanations are grounded in web search context, paired with a verified
//! image link, and written by a generative text model.

pub mod charts;
pub mod cli;
pub mod explain;
pub mod http_server;
pub mod observability;
