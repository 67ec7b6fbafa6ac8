//! Storage error types for musicshop-storage.
//!
//! [`StorageError`] covers validation rejected at the store boundary, missing
//! rows, and the failure modes of each backend (SQLite, JSON, filesystem).

use thiserror::Error;

use musicshop_core::CoreError;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The fields handed to the store failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] CoreError),

    /// No row with the given id exists in the named table.
    #[error("{kind} not found: id={id}")]
    NotFound { kind: &'static str, id: i64 },

    /// SQLite reported an error.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored collection could not be parsed, so writing to it would
    /// discard whatever it still holds.
    #[error("refusing to overwrite unreadable collection '{key}': {source}")]
    CorruptCollection {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The id sequence for a collection has no room for another id.
    #[error("id space exhausted for '{key}'")]
    IdsExhausted { key: String },

    /// The local key-value backend could not read or write its files.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// True for the "no such row" case, which callers usually surface as 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}
