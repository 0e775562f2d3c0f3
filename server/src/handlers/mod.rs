//! Request handlers for stock operations.

mod delete;
mod query;
mod report;

pub use delete::*;
pub use query::*;
pub use report::*;
