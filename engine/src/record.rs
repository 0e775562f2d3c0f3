//! Inventory record types.

use crate::{Counter, MachineId};
use serde::{Deserialize, Serialize};

/// Current inventory state of one vending machine.
///
/// Field names on the wire follow the documents the fleet has always
/// exchanged (`Stock_Available`, `lastUpdated`, ...), so existing consumers
/// can read them unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Unique machine identifier
    pub machine_id: MachineId,
    /// Units currently in the machine
    #[serde(rename = "Stock_Available")]
    pub stock_available: Counter,
    /// Cumulative units sold via UPI
    #[serde(rename = "Upi_Sold")]
    pub upi_sold: Counter,
    /// Cumulative units sold via coins
    #[serde(rename = "Coin_Sold")]
    pub coin_sold: Counter,
    /// Civil timestamp of the last report, `YYYY-MM-DD HH:mm:ss` in Asia/Kolkata
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    /// Free-text location of the machine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl InventoryRecord {
    /// Create a new record.
    pub fn new(
        machine_id: impl Into<MachineId>,
        counters: Counters,
        last_updated: impl Into<String>,
    ) -> Self {
        Self {
            machine_id: machine_id.into(),
            stock_available: counters.stock_available,
            upi_sold: counters.upi_sold,
            coin_sold: counters.coin_sold,
            last_updated: last_updated.into(),
            location: None,
        }
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Replace all three counters and re-stamp the record.
    ///
    /// Counters are absolute values, never deltas.
    pub fn overwrite(&mut self, counters: Counters, last_updated: impl Into<String>) {
        self.stock_available = counters.stock_available;
        self.upi_sold = counters.upi_sold;
        self.coin_sold = counters.coin_sold;
        self.last_updated = last_updated.into();
    }

    /// Current counters.
    pub fn counters(&self) -> Counters {
        Counters {
            stock_available: self.stock_available,
            upi_sold: self.upi_sold,
            coin_sold: self.coin_sold,
        }
    }
}

/// The three counters a machine reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub stock_available: Counter,
    pub upi_sold: Counter,
    pub coin_sold: Counter,
}

impl Counters {
    /// Counters with every value present.
    pub fn new(stock_available: i64, upi_sold: i64, coin_sold: i64) -> Self {
        Self {
            stock_available: Some(stock_available),
            upi_sold: Some(upi_sold),
            coin_sold: Some(coin_sold),
        }
    }
}
