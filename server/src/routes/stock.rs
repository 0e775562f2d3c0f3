//! Stock endpoint routes.
//!
//! Paths and query parameter names match the ones the fleet firmware and
//! dashboards already call.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use vendstock_engine::{InventoryRecord, StockReport, TodaySummary};

use crate::error::Result;
use crate::handlers::{
    handle_delete, handle_get_all, handle_get_by_date_range, handle_get_by_machine,
    handle_get_today, handle_report, DateRangeQuery, DeleteResponse, MachineQuery, ReportResponse,
};
use crate::AppState;

/// Create stock routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/addStock", get(report_handler))
        .route("/getStock", get(get_by_machine_handler))
        .route("/getAllStock", get(get_all_handler))
        .route("/getStockByDate", get(get_by_date_range_handler))
        .route("/getTodayStock", get(get_today_handler))
        .route("/deleteStock", delete(delete_handler))
}

/// GET /addStock - Report a machine's counters.
async fn report_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<StockReport>, QueryRejection>,
) -> Result<(StatusCode, Json<ReportResponse>)> {
    let Query(report) = query?;
    let (status, response) = handle_report(&state.reconciler, report).await?;
    Ok((status, Json(response)))
}

/// GET /getStock - Records of one machine.
async fn get_by_machine_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<MachineQuery>, QueryRejection>,
) -> Result<Json<Vec<InventoryRecord>>> {
    let Query(query) = query?;
    let records = handle_get_by_machine(&state.reconciler, query).await?;
    Ok(Json(records))
}

/// GET /getAllStock - Every record.
async fn get_all_handler(State(state): State<AppState>) -> Result<Json<Vec<InventoryRecord>>> {
    let records = handle_get_all(&state.reconciler).await?;
    Ok(Json(records))
}

/// GET /getStockByDate - Records updated within a range of days.
async fn get_by_date_range_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<DateRangeQuery>, QueryRejection>,
) -> Result<Json<Vec<InventoryRecord>>> {
    let Query(query) = query?;
    let records = handle_get_by_date_range(&state.reconciler, query).await?;
    Ok(Json(records))
}

/// GET /getTodayStock - Summary of today's reports.
async fn get_today_handler(State(state): State<AppState>) -> Result<Json<TodaySummary>> {
    let summary = handle_get_today(&state.reconciler).await?;
    Ok(Json(summary))
}

/// DELETE /deleteStock - Remove a machine's record.
async fn delete_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<MachineQuery>, QueryRejection>,
) -> Result<Json<DeleteResponse>> {
    let Query(query) = query?;
    let response = handle_delete(&state.reconciler, query).await?;
    Ok(Json(response))
}
