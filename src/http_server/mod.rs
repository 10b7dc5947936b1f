//! # HTTP Server Module
//!
//! Combines all endpoint routers into a unified Axum server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/explain` - Search-grounded explanation for an entry
//! - `/api/charts/*` - Browse charts
//! - `/manage/*` - Create and delete charts, layers, entries

pub mod chart_routes;
pub mod config;
pub mod explain_routes;
pub mod observability_routes;
pub mod response;
pub mod server;

pub use chart_routes::ChartState;
pub use config::HttpServerConfig;
pub use explain_routes::ExplainState;
pub use response::ErrorResponse;
pub use server::HttpServer;
