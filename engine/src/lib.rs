//! # Vendstock Engine
//!
//! Stock reconciliation and query logic for a fleet of vending machines.
//!
//! Each machine periodically reports its absolute counters: units in stock,
//! units sold via UPI and units sold via coins. The engine keeps exactly one
//! [`InventoryRecord`] per machine, stamped with the civil time of the last
//! report, and answers per-machine, date-range and same-day queries.
//!
//! ## Core Concepts
//!
//! ### Records
//!
//! An [`InventoryRecord`] holds:
//! - Machine identifier (unique key)
//! - Three counters ([`Counter`])
//! - `last_updated`, a `YYYY-MM-DD HH:mm:ss` stamp in Asia/Kolkata
//! - Optional free-text location
//!
//! ### Store
//!
//! Persistence sits behind the [`InventoryStore`] trait. [`MemoryStore`] is
//! the in-process implementation; servers plug in a database adapter.
//!
//! ### Reconciliation
//!
//! The [`Reconciler`] turns a [`StockReport`] into a create or an update.
//! Reports are full snapshots, so the last write wins. Counter text is parsed
//! according to a [`CounterPolicy`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use vendstock_engine::{FixedClock, MemoryStore, Reconciler, StockReport};
//!
//! # tokio_test();
//! # fn tokio_test() {
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let store = Arc::new(MemoryStore::new());
//! let clock = Arc::new(FixedClock::at_civil("2024-03-10 09:15:00").unwrap());
//! let reconciler = Reconciler::new(store, clock);
//!
//! let outcome = reconciler
//!     .report_stock(StockReport::new("VM-1", 40, 3, 7))
//!     .await
//!     .unwrap();
//! assert!(outcome.is_created());
//! assert_eq!(outcome.last_updated(), "2024-03-10 09:15:00");
//!
//! let summary = reconciler.get_today().await.unwrap();
//! assert_eq!(summary.count, 1);
//! assert_eq!(summary.lowest_stock_machine.as_deref(), Some("VM-1"));
//! # });
//! # }
//! ```

pub mod clock;
pub mod error;
pub mod reconcile;
pub mod record;
pub mod report;
pub mod store;
pub mod summary;

// Re-export main types at crate root
pub use clock::{CivilClock, FixedClock, SystemClock};
pub use error::{Error, ErrorKind};
pub use reconcile::{Reconciler, ReportOutcome};
pub use record::{Counters, InventoryRecord};
pub use report::{CounterPolicy, StockReport, ValidReport};
pub use store::{InventoryStore, MemoryStore, RecordFilter};
pub use summary::TodaySummary;

/// Machine identifier.
pub type MachineId = String;

/// A reported counter. `None` is the not-a-number sentinel that lenient
/// parsing stores for unparseable text; it serializes as `null`.
pub type Counter = Option<i64>;
