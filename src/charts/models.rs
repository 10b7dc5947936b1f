//! # Chart Models
//!
//! Records mirror the relational layout: charts own layers, layers own
//! entries. The `*View` types are the shapes handed to browse clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named iceberg chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart {
    pub id: i64,
    pub name: String,
}

/// One depth level of a chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub id: i64,
    pub chart_id: i64,
    pub name: String,
    /// 0 is the surface
    pub order: i64,
}

/// A single item within a layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub layer_id: i64,
    pub text: String,
    #[serde(default)]
    pub metadata: Value,
}

/// A layer with its entries, as edited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerWithEntries {
    #[serde(flatten)]
    pub layer: Layer,
    pub entries: Vec<Entry>,
}

/// Browse view of an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryView {
    pub text: String,
}

/// Browse view of a layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerView {
    pub layer: String,
    pub entries: Vec<EntryView>,
}

/// Browse view of a whole chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartView {
    pub name: String,
    pub layers: Vec<LayerView>,
    pub total_entries: usize,
}

impl ChartView {
    pub fn from_layers(name: &str, layers: &[LayerWithEntries]) -> Self {
        let layers: Vec<LayerView> = layers
            .iter()
            .map(|l| LayerView {
                layer: l.layer.name.clone(),
                entries: l
                    .entries
                    .iter()
                    .map(|e| EntryView {
                        text: e.text.clone(),
                    })
                    .collect(),
            })
            .collect();
        let total_entries = layers.iter().map(|l| l.entries.len()).sum();

        Self {
            name: name.to_string(),
            layers,
            total_entries,
        }
    }
}

/// Chart file format: one object per layer, surface first
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayerFile {
    #[serde(default)]
    pub layer: Option<String>,
    #[serde(default)]
    pub entries: Vec<EntryFile>,
}

/// Entry within a chart file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryFile {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
}
