//! Core domain types for the AlphaFX streaming trade engine.
//!
//! This crate provides fundamental types used throughout the pipeline:
//! - `Pair`: Validated instrument pair identifier (e.g. "EURUSD")
//! - `Price`, `Volume`: Precision-safe numeric types
//! - `PriceTick`, `TradeRecord`: Immutable pipeline records
//! - `Side`, `PositionState`: Trading enums
//! - `Event`: Wire-compatible outbound event shape

pub mod decimal;
pub mod error;
pub mod event;
pub mod pair;
pub mod types;

pub use decimal::{Price, Volume};
pub use error::{CoreError, Result};
pub use event::Event;
pub use pair::Pair;
pub use types::{PositionState, PriceTick, Side, TradeRecord};
