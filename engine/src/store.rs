//! Store - the persistence collaborator of the reconciler.
//!
//! [`InventoryStore`] is the seam between the reconciler and whatever keeps
//! records durable. [`MemoryStore`] is the in-process implementation used by
//! tests and embedders.

use crate::{error::Result, InventoryRecord, MachineId};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Predicate for [`InventoryStore::find`].
///
/// [`RecordFilter::matches`] is the reference semantics; every store must
/// select exactly the records it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFilter {
    /// Exact machine identifier.
    MachineId(MachineId),
    /// `last_updated` within inclusive textual bounds; a missing bound is open.
    UpdatedBetween {
        from: Option<String>,
        to: Option<String>,
    },
    /// `last_updated` starts with a civil date (`YYYY-MM-DD`).
    UpdatedOn(String),
}

impl RecordFilter {
    /// Check whether a record satisfies this filter.
    pub fn matches(&self, record: &InventoryRecord) -> bool {
        match self {
            RecordFilter::MachineId(id) => record.machine_id == *id,
            RecordFilter::UpdatedBetween { from, to } => {
                let stamp = record.last_updated.as_str();
                from.as_deref().map_or(true, |from| stamp >= from)
                    && to.as_deref().map_or(true, |to| stamp <= to)
            }
            RecordFilter::UpdatedOn(date) => record.last_updated.starts_with(date.as_str()),
        }
    }
}

/// Durable keyed collection of inventory records.
///
/// Every method is a single bounded round-trip; failures are returned as
/// [`crate::Error::Store`] and never retried.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Get the record of a machine.
    async fn find_one(&self, machine_id: &str) -> Result<Option<InventoryRecord>>;

    /// Get every record matching `filter`, in store order.
    async fn find(&self, filter: &RecordFilter) -> Result<Vec<InventoryRecord>>;

    /// Get every record, in store order.
    async fn find_all(&self) -> Result<Vec<InventoryRecord>>;

    /// Insert a record, or replace the one with the same machine id.
    async fn save(&self, record: &InventoryRecord) -> Result<()>;

    /// Delete the record of a machine, returning how many were removed.
    async fn delete_one(&self, machine_id: &str) -> Result<u64>;
}

/// In-memory store.
///
/// Store order is insertion order; replacing a record keeps its position.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<MachineId, (u64, InventoryRecord)>,
    next_seq: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn ordered(&self, filter: Option<&RecordFilter>) -> Vec<InventoryRecord> {
        let mut selected: Vec<(u64, InventoryRecord)> = self
            .records
            .iter()
            .filter(|entry| filter.map_or(true, |f| f.matches(&entry.value().1)))
            .map(|entry| entry.value().clone())
            .collect();

        selected.sort_by_key(|(seq, _)| *seq);
        selected.into_iter().map(|(_, record)| record).collect()
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn find_one(&self, machine_id: &str) -> Result<Option<InventoryRecord>> {
        Ok(self
            .records
            .get(machine_id)
            .map(|entry| entry.value().1.clone()))
    }

    async fn find(&self, filter: &RecordFilter) -> Result<Vec<InventoryRecord>> {
        Ok(self.ordered(Some(filter)))
    }

    async fn find_all(&self) -> Result<Vec<InventoryRecord>> {
        Ok(self.ordered(None))
    }

    async fn save(&self, record: &InventoryRecord) -> Result<()> {
        match self.records.entry(record.machine_id.clone()) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().1 = record.clone();
            }
            Entry::Vacant(entry) => {
                let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
                entry.insert((seq, record.clone()));
            }
        }
        Ok(())
    }

    async fn delete_one(&self, machine_id: &str) -> Result<u64> {
        Ok(self.records.remove(machine_id).map_or(0, |_| 1))
    }
}
