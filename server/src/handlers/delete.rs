//! Delete handler - removes a machine's record.

use crate::error::Result;
use crate::handlers::MachineQuery;
use serde::Serialize;
use vendstock_engine::Reconciler;

/// Response for a delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Delete the record of one machine.
pub async fn handle_delete(reconciler: &Reconciler, query: MachineQuery) -> Result<DeleteResponse> {
    let machine_id = query.machine_id.unwrap_or_default();
    reconciler.delete_by_machine(&machine_id).await?;

    Ok(DeleteResponse {
        message: "Stock deleted successfully".to_string(),
    })
}
