//! Chart HTTP Routes
//!
//! Browse endpoints under `/api/charts` and management endpoints under
//! `/manage`. Both speak JSON.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::response::{reply, ApiError};
use crate::charts::{Chart, ChartError, ChartStore, ChartView, Entry, Layer, LayerWithEntries};

/// Shared catalogue state
pub struct ChartState {
    pub store: Arc<dyn ChartStore>,
}

impl ChartState {
    pub fn new(store: Arc<dyn ChartStore>) -> Self {
        Self { store }
    }
}

/// Chart routes with shared state
pub fn chart_routes(state: Arc<ChartState>) -> Router {
    Router::new()
        .route("/api/charts", get(list_names_handler))
        .route("/api/charts/:name", get(view_handler))
        .route("/manage/charts", get(list_handler).post(add_chart_handler))
        .route(
            "/manage/charts/:id",
            get(edit_handler).delete(delete_chart_handler),
        )
        .route("/manage/charts/:id/layers", post(add_layer_handler))
        .route("/manage/layers/:id", delete(delete_layer_handler))
        .route("/manage/layers/:id/entries", post(add_entry_handler))
        .route("/manage/entries/:id", delete(delete_entry_handler))
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    pub text: String,
    #[serde(default)]
    pub metadata: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub chart: Chart,
    pub layers: Vec<LayerWithEntries>,
}

#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub entry: Entry,
    pub chart_id: i64,
}

/// Owning chart of a deleted layer or entry, for redirecting editors
#[derive(Debug, Serialize)]
pub struct OwnerResponse {
    pub chart_id: i64,
}

// ==================
// Handlers
// ==================

/// Chart names, ordered
async fn list_names_handler(
    State(state): State<Arc<ChartState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let charts = state.store.list_charts().map_err(reply)?;
    Ok(Json(charts.into_iter().map(|c| c.name).collect()))
}

/// Browse view of one chart
async fn view_handler(
    State(state): State<Arc<ChartState>>,
    Path(name): Path<String>,
) -> Result<Json<ChartView>, ApiError> {
    state.store.chart_view(&name).map(Json).map_err(reply)
}

/// Charts with ids
async fn list_handler(
    State(state): State<Arc<ChartState>>,
) -> Result<Json<Vec<Chart>>, ApiError> {
    state.store.list_charts().map(Json).map_err(reply)
}

async fn add_chart_handler(
    State(state): State<Arc<ChartState>>,
    request: Result<Json<NameRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Chart>), ApiError> {
    let Json(request) = request.map_err(reply)?;
    let chart = state.store.add_chart(&request.name).map_err(reply)?;
    Ok((StatusCode::CREATED, Json(chart)))
}

/// Chart with its layers and entries
async fn edit_handler(
    State(state): State<Arc<ChartState>>,
    Path(id): Path<i64>,
) -> Result<Json<EditResponse>, ApiError> {
    let chart = state
        .store
        .chart_by_id(id)
        .map_err(reply)?
        .ok_or_else(|| reply(ChartError::ChartNotFound(id.to_string())))?;
    let layers = state.store.layers_with_entries(id).map_err(reply)?;
    Ok(Json(EditResponse { chart, layers }))
}

async fn delete_chart_handler(
    State(state): State<Arc<ChartState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_chart(id).map_err(reply)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_layer_handler(
    State(state): State<Arc<ChartState>>,
    Path(chart_id): Path<i64>,
    request: Result<Json<NameRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Layer>), ApiError> {
    let Json(request) = request.map_err(reply)?;
    let layer = state
        .store
        .add_layer(chart_id, &request.name)
        .map_err(reply)?;
    Ok((StatusCode::CREATED, Json(layer)))
}

async fn delete_layer_handler(
    State(state): State<Arc<ChartState>>,
    Path(id): Path<i64>,
) -> Result<Json<OwnerResponse>, ApiError> {
    let chart_id = state.store.delete_layer(id).map_err(reply)?;
    Ok(Json(OwnerResponse { chart_id }))
}

async fn add_entry_handler(
    State(state): State<Arc<ChartState>>,
    Path(layer_id): Path<i64>,
    request: Result<Json<EntryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EntryResponse>), ApiError> {
    let Json(request) = request.map_err(reply)?;
    let metadata = request
        .metadata
        .unwrap_or_else(|| Value::Object(Default::default()));
    let (entry, chart_id) = state
        .store
        .add_entry(layer_id, &request.text, metadata)
        .map_err(reply)?;
    Ok((StatusCode::CREATED, Json(EntryResponse { entry, chart_id })))
}

async fn delete_entry_handler(
    State(state): State<Arc<ChartState>>,
    Path(id): Path<i64>,
) -> Result<Json<OwnerResponse>, ApiError> {
    let chart_id = state.store.delete_entry(id).map_err(reply)?;
    Ok(Json(OwnerResponse { chart_id }))
}
