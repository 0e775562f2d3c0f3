//! Same-day aggregate over inventory records.

use crate::{InventoryRecord, MachineId};
use serde::{Deserialize, Serialize};

/// Summary of the records updated on one civil day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySummary {
    /// Number of matching records
    pub count: usize,
    /// Machine with the lowest stock, `null` when nothing qualifies
    pub lowest_stock_machine: Option<MachineId>,
    /// The matching records, in store order
    pub records: Vec<InventoryRecord>,
}

impl TodaySummary {
    /// Aggregate records already selected for the day.
    ///
    /// Ties on the lowest stock go to the first record in iteration order.
    /// Records whose stock is the not-a-number sentinel never qualify.
    pub fn from_records(records: Vec<InventoryRecord>) -> Self {
        let mut lowest: Option<(i64, &InventoryRecord)> = None;
        for record in &records {
            let Some(stock) = record.stock_available else {
                continue;
            };
            if lowest.map_or(true, |(min, _)| stock < min) {
                lowest = Some((stock, record));
            }
        }

        Self {
            count: records.len(),
            lowest_stock_machine: lowest.map(|(_, record)| record.machine_id.clone()),
            records,
        }
    }
}
