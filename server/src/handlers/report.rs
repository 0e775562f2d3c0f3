//! Report handler - upserts a machine's counters.

use crate::error::Result;
use axum::http::StatusCode;
use serde::Serialize;
use vendstock_engine::{Reconciler, ReportOutcome, StockReport};

/// Response for a stock report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    /// Human-readable result
    pub message: String,
    /// `created` or `updated`
    pub outcome: &'static str,
    /// Stamp written by this report
    pub last_updated: String,
}

impl From<&ReportOutcome> for ReportResponse {
    fn from(outcome: &ReportOutcome) -> Self {
        let (message, kind) = match outcome {
            ReportOutcome::Created(_) => ("Stock added successfully", "created"),
            ReportOutcome::Updated(_) => ("Stock updated successfully", "updated"),
        };

        Self {
            message: message.to_string(),
            outcome: kind,
            last_updated: outcome.last_updated().to_string(),
        }
    }
}

/// Process a stock report from a machine.
///
/// Returns `201 Created` for a machine's first report and `200 OK` afterwards.
pub async fn handle_report(
    reconciler: &Reconciler,
    report: StockReport,
) -> Result<(StatusCode, ReportResponse)> {
    let outcome = reconciler.report_stock(report).await?;

    let status = if outcome.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, ReportResponse::from(&outcome)))
}
