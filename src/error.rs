//! Engine error taxonomy.

use thiserror::Error;

use crate::models::PeriodError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Bad input: self-vote, vote for a non-participant, malformed period.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A uniqueness or concurrency constraint rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The operation is not allowed in the current voting state.
    #[error("Invalid state: {0}")]
    State(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The store was unreachable or a query failed.
    #[error("Store error: {0}")]
    Upstream(#[from] StorageError),
}

impl From<PeriodError> for EngineError {
    fn from(e: PeriodError) -> Self {
        EngineError::Validation(e.to_string())
    }
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
