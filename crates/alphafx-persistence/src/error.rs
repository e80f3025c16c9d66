//! Persistence error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
