//! Core error types.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Pair must not be empty")]
    EmptyPair,

    #[error("Pair contains invalid characters: {0}")]
    InvalidPair(String),

    #[error("Price must be positive, got {0}")]
    NonPositivePrice(rust_decimal::Decimal),
}

pub type Result<T> = std::result::Result<T, CoreError>;
