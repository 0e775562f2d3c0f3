//! Database operations for the inventory_records table.

use sqlx::{PgPool, Row};
use vendstock_engine::{InventoryRecord, RecordFilter};

/// A stored inventory row from the database.
#[derive(Debug)]
pub struct StoredRecord {
    pub machine_id: String,
    pub stock_available: Option<i64>,
    pub upi_sold: Option<i64>,
    pub coin_sold: Option<i64>,
    pub location: Option<String>,
    pub last_updated: String,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for StoredRecord {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(StoredRecord {
            machine_id: row.try_get("machine_id")?,
            stock_available: row.try_get("stock_available")?,
            upi_sold: row.try_get("upi_sold")?,
            coin_sold: row.try_get("coin_sold")?,
            location: row.try_get("location")?,
            last_updated: row.try_get("last_updated")?,
        })
    }
}

impl StoredRecord {
    /// Convert database row to an engine record.
    pub fn into_record(self) -> InventoryRecord {
        InventoryRecord {
            machine_id: self.machine_id,
            stock_available: self.stock_available,
            upi_sold: self.upi_sold,
            coin_sold: self.coin_sold,
            last_updated: self.last_updated,
            location: self.location,
        }
    }
}

/// Insert a record, or replace the row of the same machine.
///
/// The row keeps its `id`, so store order is stable across updates.
pub async fn upsert_record(pool: &PgPool, record: &InventoryRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO inventory_records (
            machine_id, stock_available, upi_sold, coin_sold, location, last_updated
        )
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (machine_id) DO UPDATE SET
            stock_available = EXCLUDED.stock_available,
            upi_sold = EXCLUDED.upi_sold,
            coin_sold = EXCLUDED.coin_sold,
            location = EXCLUDED.location,
            last_updated = EXCLUDED.last_updated
        "#,
    )
    .bind(&record.machine_id)
    .bind(record.stock_available)
    .bind(record.upi_sold)
    .bind(record.coin_sold)
    .bind(&record.location)
    .bind(&record.last_updated)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get the record of a machine.
pub async fn get_record(
    pool: &PgPool,
    machine_id: &str,
) -> Result<Option<StoredRecord>, sqlx::Error> {
    sqlx::query_as::<_, StoredRecord>(
        r#"
        SELECT machine_id, stock_available, upi_sold, coin_sold, location, last_updated
        FROM inventory_records
        WHERE machine_id = $1
        "#,
    )
    .bind(machine_id)
    .fetch_optional(pool)
    .await
}

/// Get all records matching a filter, in insertion order.
pub async fn find_records(
    pool: &PgPool,
    filter: &RecordFilter,
) -> Result<Vec<StoredRecord>, sqlx::Error> {
    match filter {
        RecordFilter::MachineId(machine_id) => {
            let record = get_record(pool, machine_id).await?;
            Ok(record.into_iter().collect())
        }
        RecordFilter::UpdatedBetween { from, to } => {
            sqlx::query_as::<_, StoredRecord>(
                r#"
                SELECT machine_id, stock_available, upi_sold, coin_sold, location, last_updated
                FROM inventory_records
                WHERE ($1::TEXT IS NULL OR last_updated >= $1)
                  AND ($2::TEXT IS NULL OR last_updated <= $2)
                ORDER BY id ASC
                "#,
            )
            .bind(from.as_deref())
            .bind(to.as_deref())
            .fetch_all(pool)
            .await
        }
        RecordFilter::UpdatedOn(date) => {
            sqlx::query_as::<_, StoredRecord>(
                r#"
                SELECT machine_id, stock_available, upi_sold, coin_sold, location, last_updated
                FROM inventory_records
                WHERE last_updated LIKE $1
                ORDER BY id ASC
                "#,
            )
            .bind(date_prefix_pattern(date))
            .fetch_all(pool)
            .await
        }
    }
}

/// Get all records, in insertion order.
pub async fn get_all_records(pool: &PgPool) -> Result<Vec<StoredRecord>, sqlx::Error> {
    sqlx::query_as::<_, StoredRecord>(
        r#"
        SELECT machine_id, stock_available, upi_sold, coin_sold, location, last_updated
        FROM inventory_records
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Delete the record of a machine, returning the number of rows removed.
pub async fn delete_record(pool: &PgPool, machine_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM inventory_records WHERE machine_id = $1"#)
        .bind(machine_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// LIKE pattern matching stamps that start with `date`.
fn date_prefix_pattern(date: &str) -> String {
    let mut pattern = String::with_capacity(date.len() + 1);
    for c in date.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_pattern() {
        assert_eq!(date_prefix_pattern("2024-03-10"), "2024-03-10%");
        assert_eq!(date_prefix_pattern("50%_off"), "50\\%\\_off%");
    }

    #[test]
    fn stored_record_conversion() {
        let stored = StoredRecord {
            machine_id: "VM-1".into(),
            stock_available: Some(4),
            upi_sold: None,
            coin_sold: Some(2),
            location: Some("Lobby".into()),
            last_updated: "2024-03-10 10:00:00".into(),
        };

        let record = stored.into_record();
        assert_eq!(record.machine_id, "VM-1");
        assert_eq!(record.stock_available, Some(4));
        assert_eq!(record.upi_sold, None);
        assert_eq!(record.location.as_deref(), Some("Lobby"));
    }
}
