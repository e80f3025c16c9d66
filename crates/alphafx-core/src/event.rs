//! Outbound event wire shape.
//!
//! Events carry floats rather than decimals because the downstream
//! consumers are JSON WebSocket clients expecting
//! `{"type":"price_update","pair":...,"price":...,"ts":...}` and
//! `{"type":"trade","id":...,"action":"BUY"|"SELL",...}`.

use crate::types::{Side, TradeRecord};
use crate::{Pair, Price};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event published to all live subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A new price tick was accepted for a pair.
    PriceUpdate {
        pair: String,
        price: f64,
        ts: DateTime<Utc>,
    },
    /// A trade was admitted and recorded.
    Trade {
        id: u64,
        pair: String,
        action: Side,
        price: f64,
        volume: f64,
        ts: DateTime<Utc>,
    },
}

impl Event {
    /// Build a price update event from an accepted tick.
    pub fn price_update(pair: &Pair, price: Price, ts: DateTime<Utc>) -> Self {
        Self::PriceUpdate {
            pair: pair.to_string(),
            price: price.to_f64_lossy(),
            ts,
        }
    }

    /// Build a trade event from a recorded trade.
    pub fn trade(record: &TradeRecord) -> Self {
        Self::Trade {
            id: record.id,
            pair: record.pair.to_string(),
            action: record.side,
            price: record.price.to_f64_lossy(),
            volume: record.volume.to_f64_lossy(),
            ts: record.executed_at,
        }
    }
}
