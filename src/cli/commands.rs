//! CLI command implementations
//!
//! Every command loads the same configuration file, applies the credential
//! environment overlay, and installs tracing before doing any work.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::charts::{import_dir, ChartStore, InMemoryChartStore};
use crate::explain::{ExplainConfig, ExplanationPipeline, ExplanationRequest};
use crate::http_server::{ChartState, ExplainState, HttpServer, HttpServerConfig};
use crate::observability::{init_tracing, Event, LogFormat};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener and CORS
    #[serde(default)]
    pub http: HttpServerConfig,

    /// Explanation pipeline
    #[serde(default)]
    pub explain: ExplainConfig,

    /// Log line format (default: pretty)
    #[serde(default)]
    pub log_format: LogFormat,

    /// Chart files imported into the catalogue at boot
    #[serde(default)]
    pub charts_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file. A missing file yields the defaults.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }

        self.explain
            .validate()
            .map_err(|e| CliError::config_error(format!("explain: {}", e)))
    }

    /// Fill credentials the file left empty from the process environment
    pub fn apply_env(&mut self) {
        self.explain.overlay(|name| std::env::var(name).ok());
    }
}

fn load_with_env(path: &Path) -> CliResult<Config> {
    let mut config = Config::load(path)?;
    config.apply_env();
    init_tracing(config.log_format);
    info!(event = %Event::ConfigLoaded, path = %path.display());
    Ok(config)
}

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run a specific command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { config, port } => serve(&config, port),
        Command::Explain {
            config,
            chart,
            entry,
        } => explain(&config, &chart, &entry),
        Command::Import { config, dir } => import(&config, &dir),
    }
}

/// Boot the HTTP server and serve until it stops
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = load_with_env(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }
    info!(event = %Event::BootStart, addr = %config.http.socket_addr());

    let store: Arc<dyn ChartStore> = Arc::new(InMemoryChartStore::new());
    if let Some(dir) = &config.charts_dir {
        let report = import_dir(store.as_ref(), dir)
            .map_err(|e| CliError::boot_failed(format!("Chart import failed: {}", e)))?;
        info!(
            imported = report.imported.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "Chart catalogue ready"
        );
    }

    let explain_state = Arc::new(ExplainState::from_config(&config.explain));
    let chart_state = Arc::new(ChartState::new(store));
    let server = HttpServer::new(config.http, explain_state, chart_state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to start runtime: {}", e)))?;

    rt.block_on(server.start())
        .map_err(|e| CliError::boot_failed(format!("Server error: {}", e)))
}

/// Run the pipeline once and print the result as a JSON line
pub fn explain(config_path: &Path, chart: &str, entry: &str) -> CliResult<()> {
    let config = load_with_env(config_path)?;

    match explain_once(&config.explain, chart, entry) {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

fn explain_once(config: &ExplainConfig, chart: &str, entry: &str) -> CliResult<serde_json::Value> {
    let request = ExplanationRequest::new(chart, entry)?;
    let pipeline = ExplanationPipeline::from_config(config)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io_error(format!("Failed to start runtime: {}", e)))?;
    let result = rt.block_on(pipeline.explain(&request))?;

    Ok(serde_json::to_value(result)?)
}

/// Import a chart directory into a scratch catalogue and print the report
pub fn import(config_path: &Path, dir: &Path) -> CliResult<()> {
    let _config = load_with_env(config_path)?;

    let store = InMemoryChartStore::new();
    let report = import_dir(&store, dir)?;

    write_response(serde_json::to_value(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliErrorCode;
    use tempfile::TempDir;

    fn write_config(temp_dir: &TempDir, body: &str) -> PathBuf {
        let path = temp_dir.path().join("iceberg.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(&temp_dir.path().join("absent.json")).unwrap();

        assert_eq!(config.http.port, 5000);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.charts_dir.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            r#"{"http": {"port": 8080}, "log_format": "json", "explain": {"context_results": 5}}"#,
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.explain.context_results, 5);
        assert_eq!(config.explain.image_candidates, 5);
    }

    #[test]
    fn test_invalid_json_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "{ not json");

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_zero_values_rejected() {
        let temp_dir = TempDir::new().unwrap();

        let path = write_config(&temp_dir, r#"{"http": {"port": 0}}"#);
        assert!(Config::load(&path).is_err());

        let path = write_config(&temp_dir, r#"{"explain": {"probe_timeout_ms": 0}}"#);
        let err = Config::load(&path).unwrap_err();
        assert!(err.message().starts_with("explain:"));
    }

    #[test]
    fn test_explain_without_credentials_fails() {
        let err = explain_once(&ExplainConfig::default(), "Chart", "Entry").unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ExplainFailed);
    }

    #[test]
    fn test_explain_blank_entry_fails_before_network() {
        let err = explain_once(&ExplainConfig::default(), "Chart", "   ").unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ExplainFailed);
    }

    #[test]
    fn test_import_reads_directory() {
        let temp_dir = TempDir::new().unwrap();
        let charts = temp_dir.path().join("charts");
        fs::create_dir(&charts).unwrap();
        fs::write(
            charts.join("Internet_Mysteries.json"),
            r#"[{"layer": "Surface", "entries": [{"text": "Cicada 3301"}]}]"#,
        )
        .unwrap();

        let config = write_config(&temp_dir, "{}");
        import(&config, &charts).unwrap();
    }

    #[test]
    fn test_import_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let config = write_config(&temp_dir, "{}");

        let err = import(&config, &temp_dir.path().join("nope")).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ImportFailed);
    }
}
