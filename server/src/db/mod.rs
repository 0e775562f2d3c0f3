//! Database module for PostgreSQL persistence.

mod pool;
mod records;
mod store;

pub use pool::*;
pub use records::*;
pub use store::*;
