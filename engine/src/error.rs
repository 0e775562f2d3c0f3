//! Error types for the vendstock engine.

use crate::MachineId;
use thiserror::Error;

/// Coarse classification of an [`Error`], used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid input; detected before the store is touched.
    Validation,
    /// The targeted record does not exist.
    NotFound,
    /// The persistence layer failed.
    Store,
}

/// All possible errors from the vendstock engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Validation errors
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid number for '{field}': {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("startDate or endDate is required")]
    MissingDateRange,

    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    // Lookup errors
    #[error("no stock record for machine: {0}")]
    MachineNotFound(MachineId),

    // Store errors
    #[error("store failure: {0}")]
    Store(String),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingField(_)
            | Error::InvalidNumber { .. }
            | Error::MissingDateRange
            | Error::InvalidDate(_) => ErrorKind::Validation,
            Error::MachineNotFound(_) => ErrorKind::NotFound,
            Error::Store(_) => ErrorKind::Store,
        }
    }

    /// Wrap any store driver error.
    pub fn store(err: impl std::fmt::Display) -> Self {
        Error::Store(err.to_string())
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
