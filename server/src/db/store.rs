//! PostgreSQL implementation of the engine's store collaborator.

use async_trait::async_trait;
use vendstock_engine::{error::Result, Error, InventoryRecord, InventoryStore, RecordFilter};

use super::{records, Pool};

/// Inventory store backed by a PostgreSQL pool.
///
/// Opened once at startup and closed explicitly on shutdown.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    /// Wrap an open pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Close every pooled connection, waiting for in-flight queries.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn into_records(stored: Vec<records::StoredRecord>) -> Vec<InventoryRecord> {
    stored.into_iter().map(records::StoredRecord::into_record).collect()
}

#[async_trait]
impl InventoryStore for PgStore {
    async fn find_one(&self, machine_id: &str) -> Result<Option<InventoryRecord>> {
        let stored = records::get_record(&self.pool, machine_id)
            .await
            .map_err(Error::store)?;
        Ok(stored.map(records::StoredRecord::into_record))
    }

    async fn find(&self, filter: &RecordFilter) -> Result<Vec<InventoryRecord>> {
        records::find_records(&self.pool, filter)
            .await
            .map(into_records)
            .map_err(Error::store)
    }

    async fn find_all(&self) -> Result<Vec<InventoryRecord>> {
        records::get_all_records(&self.pool)
            .await
            .map(into_records)
            .map_err(Error::store)
    }

    async fn save(&self, record: &InventoryRecord) -> Result<()> {
        records::upsert_record(&self.pool, record)
            .await
            .map_err(Error::store)
    }

    async fn delete_one(&self, machine_id: &str) -> Result<u64> {
        records::delete_record(&self.pool, machine_id)
            .await
            .map_err(Error::store)
    }
}
