//! # Chart Catalogue
//!
//! Iceberg charts: named, ordered layers of entries.
//!
//! - [`store`] - `ChartStore` trait and the in-memory implementation
//! - [`import`] - bulk load from a directory of chart files

pub mod errors;
pub mod import;
pub mod models;
pub mod store;

pub use errors::{ChartError, ChartResult};
pub use import::{chart_name_for, import_dir, ImportFailure, ImportReport};
pub use models::{Chart, ChartView, Entry, EntryView, Layer, LayerView, LayerWithEntries};
pub use store::{ChartStore, InMemoryChartStore};
