//! Liveness endpoints.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use vendstock_engine::{clock::TIMEZONE, CounterPolicy};

use crate::AppState;

/// Liveness probe body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// How `/addStock` parses counter text
    pub counter_parsing: CounterPolicy,
    /// Zone in which `lastUpdated` stamps are written
    pub timezone: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(banner))
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        counter_parsing: state.reconciler.counter_policy(),
        timezone: TIMEZONE.name().to_string(),
    })
}

async fn banner() -> &'static str {
    "Vendstock Server"
}
