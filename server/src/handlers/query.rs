//! Query handlers - read inventory records.

use crate::error::Result;
use serde::Deserialize;
use vendstock_engine::{InventoryRecord, Reconciler, TodaySummary};

/// Query parameters selecting one machine.
#[derive(Debug, Default, Deserialize)]
pub struct MachineQuery {
    pub machine_id: Option<String>,
}

/// Query parameters for a date range; either bound may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    /// First civil day, `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// Last civil day, `YYYY-MM-DD`
    pub end_date: Option<String>,
}

/// Get the records of one machine.
pub async fn handle_get_by_machine(
    reconciler: &Reconciler,
    query: MachineQuery,
) -> Result<Vec<InventoryRecord>> {
    let machine_id = query.machine_id.unwrap_or_default();
    Ok(reconciler.get_by_machine(&machine_id).await?)
}

/// Get every record.
pub async fn handle_get_all(reconciler: &Reconciler) -> Result<Vec<InventoryRecord>> {
    Ok(reconciler.get_all().await?)
}

/// Get the records updated within a range of civil days.
pub async fn handle_get_by_date_range(
    reconciler: &Reconciler,
    query: DateRangeQuery,
) -> Result<Vec<InventoryRecord>> {
    let records = reconciler
        .get_by_date_range(query.start_date.as_deref(), query.end_date.as_deref())
        .await?;

    tracing::debug!(
        start_date = ?query.start_date,
        end_date = ?query.end_date,
        count = records.len(),
        "date range query"
    );
    Ok(records)
}

/// Summarize today's reports.
pub async fn handle_get_today(reconciler: &Reconciler) -> Result<TodaySummary> {
    Ok(reconciler.get_today().await?)
}
