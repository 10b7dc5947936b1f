//! CLI argument definitions using clap
//!
//! Commands:
//! - iceberg-explorer serve --config <path> [--port <n>]
//! - iceberg-explorer explain --chart <name> --entry <text>
//! - iceberg-explorer import --dir <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Iceberg chart explorer with search-grounded explanations
#[derive(Parser, Debug)]
#[command(name = "iceberg-explorer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./iceberg.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Explain one entry and exit
    Explain {
        /// Path to configuration file
        #[arg(long, default_value = "./iceberg.json")]
        config: PathBuf,

        /// Chart the entry belongs to
        #[arg(long)]
        chart: String,

        /// Entry text
        #[arg(long)]
        entry: String,
    },

    /// Validate a directory of chart files and report what would be imported
    Import {
        /// Path to configuration file
        #[arg(long, default_value = "./iceberg.json")]
        config: PathBuf,

        /// Directory of `*.json` chart files
        #[arg(long)]
        dir: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
