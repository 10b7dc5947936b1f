//! HTTP API Tests
//!
//! Drives the combined router the server binds, with a chart catalogue
//! imported from disk and a scripted explanation pipeline.

mod common;

use std::fs;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use common::{links, pipeline, snippets, CannedModel, ListProbe, SplitSearch};
use iceberg_explorer::charts::{import_dir, ChartStore, InMemoryChartStore};
use iceberg_explorer::http_server::{ChartState, ExplainState, HttpServer, HttpServerConfig};

// =============================================================================
// Helper Functions
// =============================================================================

fn seeded_store() -> (TempDir, Arc<dyn ChartStore>) {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("Internet_Mysteries.json"),
        json!([
            {"layer": "Surface", "entries": [{"text": "Cicada 3301"}, {"text": "Max Headroom"}]},
            {"layer": "Abyss", "entries": [{"text": "Lake City Quiet Pills"}]}
        ])
        .to_string(),
    )
    .unwrap();
    fs::write(tmp.path().join("broken.json"), "{ nope").unwrap();

    let store = InMemoryChartStore::new();
    let report = import_dir(&store, tmp.path()).unwrap();
    assert_eq!(report.imported, vec!["Internet Mysteries".to_string()]);
    assert_eq!(report.failed.len(), 1);

    let store: Arc<dyn ChartStore> = Arc::new(store);
    (tmp, store)
}

fn app(store: Arc<dyn ChartStore>, explain: ExplainState) -> Router {
    HttpServer::new(
        HttpServerConfig::default(),
        Arc::new(explain),
        Arc::new(ChartState::new(store)),
    )
    .router()
}

fn working_explain() -> ExplainState {
    let search = Arc::new(SplitSearch::new(
        vec![snippets(&["An online puzzle series."])],
        vec![links(&["https://img.example/cicada.png"])],
    ));
    let probe = Arc::new(ListProbe::live(&["https://img.example/cicada.png"]));
    let model = Arc::new(CannedModel::replying(
        "```html\n<p><b>Cicada 3301</b> was a puzzle.</p>\n```",
    ));
    ExplainState::new(Some(pipeline(&search, &probe, &model)))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =============================================================================
// Browse
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (_tmp, store) = seeded_store();
    let (status, body) = send(app(store, ExplainState::new(None)), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_imported_chart_is_browsable() {
    let (_tmp, store) = seeded_store();
    let app = app(store, ExplainState::new(None));

    let (status, names) = send(app.clone(), get("/api/charts")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names, json!(["Internet Mysteries"]));

    let (status, view) = send(app, get("/api/charts/Internet%20Mysteries")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["total_entries"], 3);
    assert_eq!(view["layers"][0]["layer"], "Surface");
    assert_eq!(view["layers"][1]["entries"][0]["text"], "Lake City Quiet Pills");
}

#[tokio::test]
async fn test_unknown_chart_is_404() {
    let (_tmp, store) = seeded_store();
    let (status, _) = send(app(store, ExplainState::new(None)), get("/api/charts/Nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Explain
// =============================================================================

#[tokio::test]
async fn test_explain_entry_from_chart() {
    let (_tmp, store) = seeded_store();
    let (status, body) = send(
        app(store, working_explain()),
        post_json(
            "/api/explain",
            json!({"chart_name": "Internet Mysteries", "entry_text": "Cicada 3301"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "explanation": "<p><b>Cicada 3301</b> was a puzzle.</p>",
            "image_url": "https://img.example/cicada.png"
        })
    );
}

#[tokio::test]
async fn test_explain_missing_field_is_400() {
    let (_tmp, store) = seeded_store();
    let (status, body) = send(
        app(store, working_explain()),
        post_json("/api/explain", json!({"chart_name": "Internet Mysteries"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing data or API key configuration.");
}

#[tokio::test]
async fn test_explain_without_credentials_is_400() {
    let (_tmp, store) = seeded_store();
    let (status, body) = send(
        app(store, ExplainState::new(None)),
        post_json(
            "/api/explain",
            json!({"chart_name": "Internet Mysteries", "entry_text": "Cicada 3301"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing data or API key configuration.");
}

#[tokio::test]
async fn test_explain_model_failure_is_500() {
    let (_tmp, store) = seeded_store();
    let search = Arc::new(SplitSearch::default());
    let probe = Arc::new(ListProbe::default());
    let model = Arc::new(CannedModel::failing("quota"));
    let explain = ExplainState::new(Some(pipeline(&search, &probe, &model)));

    let (status, body) = send(
        app(store, explain),
        post_json(
            "/api/explain",
            json!({"chart_name": "Internet Mysteries", "entry_text": "Cicada 3301"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to process AI explanation"));
}

// =============================================================================
// Manage
// =============================================================================

#[tokio::test]
async fn test_manage_flow() {
    let (_tmp, store) = seeded_store();
    let app = app(store, ExplainState::new(None));

    let (status, chart) = send(
        app.clone(),
        post_json("/manage/charts", json!({"name": "Video Games"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let chart_id = chart["id"].as_i64().unwrap();

    let (status, _) = send(
        app.clone(),
        post_json("/manage/charts", json!({"name": "Video Games"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, layer) = send(
        app.clone(),
        post_json(
            &format!("/manage/charts/{}/layers", chart_id),
            json!({"name": "Surface"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let layer_id = layer["id"].as_i64().unwrap();

    let (status, _) = send(
        app.clone(),
        post_json(
            &format!("/manage/layers/{}/entries", layer_id),
            json!({"text": "Polybius"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, view) = send(app.clone(), get("/api/charts/Video%20Games")).await;
    assert_eq!(view["total_entries"], 1);

    let (status, _) = send(
        app.clone(),
        Request::delete(format!("/manage/charts/{}", chart_id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert!(status.is_success());

    let (status, _) = send(app, get("/api/charts/Video%20Games")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
