//! Signal error types.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignalError {
    #[error("Window capacity must be non-zero")]
    ZeroCapacity,

    #[error("Short window ({short}) must be smaller than long window ({long})")]
    WindowOrder { short: usize, long: usize },
}

pub type SignalResult<T> = Result<T, SignalError>;
