//! Broadcast error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("Broadcast hub is no longer running")]
    HubClosed,
}

pub type BroadcastResult<T> = Result<T, BroadcastError>;
