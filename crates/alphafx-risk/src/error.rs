//! Risk error types.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RiskError {
    #[error("Volume cap must be positive, got {0}")]
    NonPositiveCap(rust_decimal::Decimal),

    #[error("Trade size must be positive, got {0}")]
    NonPositiveTradeSize(rust_decimal::Decimal),
}

pub type RiskResult<T> = Result<T, RiskError>;
