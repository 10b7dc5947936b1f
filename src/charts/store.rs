//! # Chart Store
//!
//! Catalogue persistence behind a trait. The in-memory store keeps the three
//! tables as vectors behind one lock so cascading deletes are atomic.

use std::sync::RwLock;

use serde_json::Value;

use super::errors::{ChartError, ChartResult};
use super::models::{Chart, ChartView, Entry, Layer, LayerWithEntries};

/// Catalogue storage
pub trait ChartStore: Send + Sync {
    /// All charts ordered by name
    fn list_charts(&self) -> ChartResult<Vec<Chart>>;

    fn chart_by_name(&self, name: &str) -> ChartResult<Option<Chart>>;

    fn chart_by_id(&self, id: i64) -> ChartResult<Option<Chart>>;

    /// Rejects blank and duplicate names
    fn add_chart(&self, name: &str) -> ChartResult<Chart>;

    /// Removes the chart with its layers and entries
    fn delete_chart(&self, id: i64) -> ChartResult<()>;

    /// Appends a layer below the current deepest one
    fn add_layer(&self, chart_id: i64, name: &str) -> ChartResult<Layer>;

    /// Removes the layer with its entries; returns the owning chart id
    fn delete_layer(&self, id: i64) -> ChartResult<i64>;

    /// Returns the new entry and the owning chart id
    fn add_entry(&self, layer_id: i64, text: &str, metadata: Value) -> ChartResult<(Entry, i64)>;

    /// Returns the owning chart id
    fn delete_entry(&self, id: i64) -> ChartResult<i64>;

    /// Layers by order, entries in insertion order
    fn layers_with_entries(&self, chart_id: i64) -> ChartResult<Vec<LayerWithEntries>>;

    /// Browse view of a chart by name
    fn chart_view(&self, name: &str) -> ChartResult<ChartView> {
        let chart = self
            .chart_by_name(name)?
            .ok_or_else(|| ChartError::ChartNotFound(name.to_string()))?;
        let layers = self.layers_with_entries(chart.id)?;
        Ok(ChartView::from_layers(&chart.name, &layers))
    }
}

#[derive(Debug, Default)]
struct Tables {
    charts: Vec<Chart>,
    layers: Vec<Layer>,
    entries: Vec<Entry>,
    next_id: i64,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn layer(&self, id: i64) -> ChartResult<&Layer> {
        self.layers
            .iter()
            .find(|l| l.id == id)
            .ok_or(ChartError::LayerNotFound(id))
    }
}

/// In-memory chart store
#[derive(Debug, Default)]
pub struct InMemoryChartStore {
    tables: RwLock<Tables>,
}

impl InMemoryChartStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ChartResult<std::sync::RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| ChartError::Storage("Lock poisoned".to_string()))
    }

    fn write(&self) -> ChartResult<std::sync::RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| ChartError::Storage("Lock poisoned".to_string()))
    }
}

fn required(value: &str, what: &str) -> ChartResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ChartError::InvalidInput(format!("{} must not be empty", what)));
    }
    Ok(trimmed.to_string())
}

impl ChartStore for InMemoryChartStore {
    fn list_charts(&self) -> ChartResult<Vec<Chart>> {
        let tables = self.read()?;
        let mut charts = tables.charts.clone();
        charts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(charts)
    }

    fn chart_by_name(&self, name: &str) -> ChartResult<Option<Chart>> {
        let tables = self.read()?;
        Ok(tables.charts.iter().find(|c| c.name == name).cloned())
    }

    fn chart_by_id(&self, id: i64) -> ChartResult<Option<Chart>> {
        let tables = self.read()?;
        Ok(tables.charts.iter().find(|c| c.id == id).cloned())
    }

    fn add_chart(&self, name: &str) -> ChartResult<Chart> {
        let name = required(name, "chart name")?;
        let mut tables = self.write()?;

        if tables.charts.iter().any(|c| c.name == name) {
            return Err(ChartError::AlreadyExists(name));
        }

        let chart = Chart {
            id: tables.allocate_id(),
            name,
        };
        tables.charts.push(chart.clone());
        Ok(chart)
    }

    fn delete_chart(&self, id: i64) -> ChartResult<()> {
        let mut tables = self.write()?;

        let before = tables.charts.len();
        tables.charts.retain(|c| c.id != id);
        if tables.charts.len() == before {
            return Err(ChartError::ChartNotFound(id.to_string()));
        }

        let layer_ids: Vec<i64> = tables
            .layers
            .iter()
            .filter(|l| l.chart_id == id)
            .map(|l| l.id)
            .collect();
        tables.layers.retain(|l| l.chart_id != id);
        tables.entries.retain(|e| !layer_ids.contains(&e.layer_id));
        Ok(())
    }

    fn add_layer(&self, chart_id: i64, name: &str) -> ChartResult<Layer> {
        let name = required(name, "layer name")?;
        let mut tables = self.write()?;

        if !tables.charts.iter().any(|c| c.id == chart_id) {
            return Err(ChartError::ChartNotFound(chart_id.to_string()));
        }

        let order = tables
            .layers
            .iter()
            .filter(|l| l.chart_id == chart_id)
            .map(|l| l.order)
            .max()
            .map_or(0, |max| max + 1);

        let layer = Layer {
            id: tables.allocate_id(),
            chart_id,
            name,
            order,
        };
        tables.layers.push(layer.clone());
        Ok(layer)
    }

    fn delete_layer(&self, id: i64) -> ChartResult<i64> {
        let mut tables = self.write()?;
        let chart_id = tables.layer(id)?.chart_id;

        tables.layers.retain(|l| l.id != id);
        tables.entries.retain(|e| e.layer_id != id);
        Ok(chart_id)
    }

    fn add_entry(&self, layer_id: i64, text: &str, metadata: Value) -> ChartResult<(Entry, i64)> {
        let text = required(text, "entry text")?;
        let mut tables = self.write()?;
        let chart_id = tables.layer(layer_id)?.chart_id;

        let entry = Entry {
            id: tables.allocate_id(),
            layer_id,
            text,
            metadata,
        };
        tables.entries.push(entry.clone());
        Ok((entry, chart_id))
    }

    fn delete_entry(&self, id: i64) -> ChartResult<i64> {
        let mut tables = self.write()?;

        let layer_id = tables
            .entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.layer_id)
            .ok_or(ChartError::EntryNotFound(id))?;
        let chart_id = tables.layer(layer_id)?.chart_id;

        tables.entries.retain(|e| e.id != id);
        Ok(chart_id)
    }

    fn layers_with_entries(&self, chart_id: i64) -> ChartResult<Vec<LayerWithEntries>> {
        let tables = self.read()?;

        let mut layers: Vec<&Layer> = tables
            .layers
            .iter()
            .filter(|l| l.chart_id == chart_id)
            .collect();
        layers.sort_by_key(|l| l.order);

        Ok(layers
            .into_iter()
            .map(|layer| LayerWithEntries {
                layer: layer.clone(),
                entries: tables
                    .entries
                    .iter()
                    .filter(|e| e.layer_id == layer.id)
                    .cloned()
                    .collect(),
            })
            .collect())
    }
}
