//! Persistence error types.

use thiserror::Error;

/// Result type for weight store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading or appending weight entries.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying SQLite database reported an error.
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored timestamp could not be parsed back into a date.
    #[error("invalid stored timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// The connection lock was poisoned by a panicking writer.
    #[error("database connection lock poisoned")]
    Poisoned,

    /// The blocking task running the query failed to complete.
    #[error("storage task failed: {0}")]
    Task(String),
}

impl StoreError {
    /// Create an "invalid timestamp" error.
    pub fn invalid_timestamp(value: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidTimestamp {
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
