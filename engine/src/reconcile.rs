//! Reconciliation of machine reports with stored inventory.
//!
//! # Algorithm
//!
//! 1. Validate the report (presence, counter parsing) without touching the store
//! 2. Look the machine up by identifier
//! 3. Existing record: overwrite all counters and re-stamp (last write wins)
//! 4. Unknown machine: create a record with the same stamping rule
//!
//! Each report is a full snapshot of the machine, never a delta. Two
//! concurrent reports for one machine may race between lookup and save; the
//! later save wins, which is the intended outcome. Reports for different
//! machines never interact.

use crate::{
    clock::{day_end, day_start, parse_date, CivilClock},
    error::Result,
    CounterPolicy, Error, InventoryRecord, InventoryStore, RecordFilter, StockReport, TodaySummary,
};
use std::sync::Arc;
use tracing::debug;

/// What a report did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// First report of a machine; a record was created
    Created(InventoryRecord),
    /// The machine's record was overwritten
    Updated(InventoryRecord),
}

impl ReportOutcome {
    /// The record as saved.
    pub fn record(&self) -> &InventoryRecord {
        match self {
            ReportOutcome::Created(record) | ReportOutcome::Updated(record) => record,
        }
    }

    /// Stamp written by this report.
    pub fn last_updated(&self) -> &str {
        &self.record().last_updated
    }

    /// Check if the report created the record.
    pub fn is_created(&self) -> bool {
        matches!(self, ReportOutcome::Created(_))
    }
}

/// Upserts machine reports and answers inventory queries.
///
/// The store and clock are injected; the reconciler holds no other state and
/// can be shared freely between tasks.
pub struct Reconciler {
    store: Arc<dyn InventoryStore>,
    clock: Arc<dyn CivilClock>,
    policy: CounterPolicy,
}

impl Reconciler {
    /// Create a reconciler with the default (strict) counter policy.
    pub fn new(store: Arc<dyn InventoryStore>, clock: Arc<dyn CivilClock>) -> Self {
        Self {
            store,
            clock,
            policy: CounterPolicy::default(),
        }
    }

    /// Select how counter text is parsed.
    pub fn with_counter_policy(mut self, policy: CounterPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Counter policy in effect.
    pub fn counter_policy(&self) -> CounterPolicy {
        self.policy
    }

    /// Record a machine's counters, creating its record on first sight.
    pub async fn report_stock(&self, report: StockReport) -> Result<ReportOutcome> {
        let report = report.validate(self.policy)?;
        let now = self.clock.timestamp();

        match self.store.find_one(&report.machine_id).await? {
            Some(mut record) => {
                // A stamp never moves backwards, even if the wall clock does.
                let stamp = now.max(record.last_updated.clone());
                record.overwrite(report.counters, stamp);
                if let Some(location) = report.location {
                    record.location = Some(location);
                }

                self.store.save(&record).await?;
                debug!(
                    machine_id = %record.machine_id,
                    last_updated = %record.last_updated,
                    "stock updated"
                );
                Ok(ReportOutcome::Updated(record))
            }
            None => {
                let mut record = InventoryRecord::new(report.machine_id, report.counters, now);
                record.location = report.location;

                self.store.save(&record).await?;
                debug!(
                    machine_id = %record.machine_id,
                    last_updated = %record.last_updated,
                    "stock record created"
                );
                Ok(ReportOutcome::Created(record))
            }
        }
    }

    /// Get the records of one machine (zero or one in practice).
    pub async fn get_by_machine(&self, machine_id: &str) -> Result<Vec<InventoryRecord>> {
        require_machine_id(machine_id)?;
        self.store
            .find(&RecordFilter::MachineId(machine_id.to_string()))
            .await
    }

    /// Get every record.
    pub async fn get_all(&self) -> Result<Vec<InventoryRecord>> {
        self.store.find_all().await
    }

    /// Get the records updated between two civil days, both inclusive.
    ///
    /// Either bound may be omitted, but not both. Blank text counts as omitted.
    pub async fn get_by_date_range(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<InventoryRecord>> {
        let start_date = start_date.filter(|s| !s.trim().is_empty());
        let end_date = end_date.filter(|s| !s.trim().is_empty());
        if start_date.is_none() && end_date.is_none() {
            return Err(Error::MissingDateRange);
        }

        let filter = RecordFilter::UpdatedBetween {
            from: start_date.map(parse_date).transpose()?.map(day_start),
            to: end_date.map(parse_date).transpose()?.map(day_end),
        };
        self.store.find(&filter).await
    }

    /// Summarize the records updated on the current civil day.
    pub async fn get_today(&self) -> Result<TodaySummary> {
        let today = self.clock.today();
        let records = self.store.find(&RecordFilter::UpdatedOn(today)).await?;
        Ok(TodaySummary::from_records(records))
    }

    /// Delete a machine's record.
    pub async fn delete_by_machine(&self, machine_id: &str) -> Result<()> {
        require_machine_id(machine_id)?;

        if self.store.delete_one(machine_id).await? == 0 {
            return Err(Error::MachineNotFound(machine_id.to_string()));
        }
        debug!(machine_id = %machine_id, "stock record deleted");
        Ok(())
    }
}

fn require_machine_id(machine_id: &str) -> Result<()> {
    if machine_id.is_empty() {
        return Err(Error::MissingField("machine_id"));
    }
    Ok(())
}
