//! Storage error types.

use thiserror::Error;

/// Failures of the backing store. All of them are fatal for the request
/// that triggered them.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Pool construction or connection checkout failed
    #[error("Database connection failed: {0}")]
    Connection(String),

    /// Statement execution failed (includes a missing `recipes` table)
    #[error("Query failed: {0}")]
    Query(#[from] diesel::result::Error),

    /// Schema bootstrap failed
    #[error("Schema bootstrap failed: {0}")]
    Migration(String),

    /// Filesystem error while preparing the database location
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored timestamp could not be parsed
    #[error("Corrupt timestamp '{value}' in column {column}")]
    CorruptTimestamp { column: &'static str, value: String },
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
