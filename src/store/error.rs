//! Store error types.

use thiserror::Error;

/// Failure talking to the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored document did not match the expected collection shape.
    #[error("malformed document: {0}")]
    MalformedDocument(#[from] serde_json::Error),

    /// The backend reported itself unavailable. Produced by non-SQL
    /// backends and by test doubles injecting faults.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
