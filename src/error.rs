//! Error types for each pipeline stage.
//!
//! Fetch failures are usually absorbed by the fallback record, validation
//! failures stop ingestion before anything is written, and storage failures
//! roll back the whole creature.

use thiserror::Error;

/// Failure to retrieve a raw record from the remote source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("source returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("could not decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The raw record does not have the canonical shape.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("invalid stats count: expected 6, got {0}")]
    StatCount(usize),

    #[error("missing field: {0}")]
    MissingField(String),

    #[error("invalid field {field}: expected {expected}")]
    InvalidField { field: String, expected: &'static str },

    #[error("invalid identifier {0}: must be positive")]
    InvalidId(i64),
}

/// Write failure inside the ingestion transaction.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Unique or foreign-key constraint violation.
    #[error("conflicting write: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// Table name that is not part of the store's schema.
    #[error("unknown table: {0}")]
    UnknownTable(String),
}

impl StorageError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

/// Constraint violations become `Conflict`; everything else is `Database`.
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, msg)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::Conflict(msg.clone().unwrap_or_else(|| e.to_string()))
            }
            _ => Self::Database(err),
        }
    }
}

/// Fatal outcome of one ingestion run.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("storage failed: {0}")]
    Storage(#[from] StorageError),
}
