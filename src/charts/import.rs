//! # Chart Import
//!
//! Loads a directory of chart files into a store. Each `*.json` file is one
//! chart; `Internet_Mysteries.json` becomes "Internet Mysteries". A bad file
//! is reported and skipped, never fatal for the rest of the directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::errors::{ChartError, ChartResult};
use super::models::LayerFile;
use super::store::ChartStore;
use crate::observability::Event;

/// Outcome of one directory import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Charts created
    pub imported: Vec<String>,
    /// Charts already present
    pub skipped: Vec<String>,
    /// Files that could not be read or parsed, with the reason
    pub failed: Vec<ImportFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportFailure {
    pub file: String,
    pub reason: String,
}

/// Chart name derived from a file name
pub fn chart_name_for(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.replace('_', " "))
}

/// Import every `*.json` file in `dir`, in file name order
pub fn import_dir(store: &dyn ChartStore, dir: &Path) -> ChartResult<ImportReport> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| ChartError::Storage(format!("Failed to read {}: {}", dir.display(), e)))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut report = ImportReport::default();
    for path in files {
        let Some(name) = chart_name_for(&path) else {
            continue;
        };

        if store.chart_by_name(&name)?.is_some() {
            info!(event = %Event::ChartSkipped, chart = %name);
            report.skipped.push(name);
            continue;
        }

        match import_file(store, &name, &path) {
            Ok(entries) => {
                info!(event = %Event::ChartImported, chart = %name, entries);
                report.imported.push(name);
            }
            Err(e) => {
                warn!(event = %Event::ChartImportFailed, file = %path.display(), error = %e);
                report.failed.push(ImportFailure {
                    file: path.display().to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

/// Parse before inserting so a bad file leaves no half-built chart.
/// Returns the number of entries inserted.
fn import_file(store: &dyn ChartStore, name: &str, path: &Path) -> ChartResult<usize> {
    let content = fs::read_to_string(path)
        .map_err(|e| ChartError::InvalidInput(format!("could not read file: {}", e)))?;
    let layers: Vec<LayerFile> = serde_json::from_str(&content)
        .map_err(|e| ChartError::InvalidInput(format!("could not parse file: {}", e)))?;

    let chart = store.add_chart(name)?;
    let mut inserted = 0;

    for layer_file in layers {
        let Some(layer_name) = layer_file.layer.filter(|n| !n.trim().is_empty()) else {
            continue;
        };
        let layer = store.add_layer(chart.id, &layer_name)?;

        for entry in layer_file.entries {
            let Some(text) = entry.text.filter(|t| !t.trim().is_empty()) else {
                continue;
            };
            let metadata = entry.metadata.unwrap_or_else(|| Value::Object(Default::default()));
            store.add_entry(layer.id, &text, metadata)?;
            inserted += 1;
        }
    }

    Ok(inserted)
}
