//! Pipeline record types.
//!
//! `PriceTick` and `TradeRecord` are immutable: created once at the
//! ingestion boundary or on trade admission, never mutated afterwards.

use crate::decimal::{Price, Volume};
use crate::error::{CoreError, Result};
use crate::pair::Pair;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Per-pair position state.
///
/// `Closed` means "flat after closing a long". A SELL signal only ever
/// closes an existing long; no true short exposure is modeled, so the
/// state is reopenable by a later BUY exactly like `Flat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionState {
    #[default]
    Flat,
    Long,
    Closed,
}

impl PositionState {
    /// Whether a long exposure is currently open.
    pub fn is_long(&self) -> bool {
        matches!(self, Self::Long)
    }
}

impl fmt::Display for PositionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "FLAT"),
            Self::Long => write!(f, "LONG"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}

/// One timestamped price observation for a pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTick {
    pub pair: Pair,
    pub price: Price,
    pub observed_at: DateTime<Utc>,
}

impl PriceTick {
    /// Create a validated tick.
    ///
    /// Rejects non-positive prices at the boundary so malformed input
    /// never enters the pipeline.
    pub fn new(pair: Pair, price: Price, observed_at: DateTime<Utc>) -> Result<Self> {
        if !price.is_positive() {
            return Err(CoreError::NonPositivePrice(price.inner()));
        }
        Ok(Self {
            pair,
            price,
            observed_at,
        })
    }
}

/// An executed trade, appended to the append-only trade log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Sequential trade id, unique across the engine.
    pub id: u64,
    pub pair: Pair,
    pub side: Side,
    /// Execution price (the tick price at admission).
    pub price: Price,
    pub volume: Volume,
    /// Position state after this trade was applied.
    pub resulting_position: PositionState,
    /// Realized profit and loss, present only when this trade closed a long.
    pub realized_pnl: Option<rust_decimal::Decimal>,
    pub executed_at: DateTime<Utc>,
}
