//! Vendstock Server - HTTP binding for vending machine stock reconciliation.
//!
//! Machines report their counters over plain GET requests; dashboards read
//! them back per machine, per date range, or as a same-day summary. All logic
//! lives in [`vendstock_engine::Reconciler`]; this crate wires it to axum and
//! to PostgreSQL.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod routes;

use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use vendstock_engine::Reconciler;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub reconciler: Arc<Reconciler>,
}

impl AppState {
    /// Wrap a reconciler for sharing across requests.
    pub fn new(reconciler: Reconciler) -> Self {
        Self {
            reconciler: Arc::new(reconciler),
        }
    }
}

/// Build the application: routes, request tracing and permissive CORS.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes())
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}
