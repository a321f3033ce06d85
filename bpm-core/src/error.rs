//! Error types for record normalization and list queries

use thiserror::Error;

/// Errors raised while normalizing records or running a list query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Page index below zero
    #[error("page index must not be negative (got {0})")]
    NegativePage(i64),

    /// Page size of zero
    #[error("page size must be greater than 0")]
    ZeroPageSize,

    /// A temporal field is absent or null
    #[error("record is missing timestamp field '{field}'")]
    MissingTimestamp {
        /// Field name
        field: String,
    },

    /// A temporal field could not be parsed
    #[error("invalid timestamp in field '{field}': {value:?}")]
    InvalidTimestamp {
        /// Field name
        field: String,
        /// Raw value as delivered by the backend
        value: String,
    },
}
