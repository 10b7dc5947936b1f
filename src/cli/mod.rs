//! CLI module for the iceberg explorer
//!
//! Provides command-line interface for:
//! - serve: Boot the HTTP server
//! - explain: One-shot explanation for a single entry
//! - import: Dry-run a chart directory import

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{explain, import, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
