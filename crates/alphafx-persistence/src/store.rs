//! The store contract consumed by the engine.

use crate::error::StoreResult;
use alphafx_core::{Pair, PriceTick, TradeRecord};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Durable price and trade history, implemented by an external
/// collaborator (relational store, archive service, or the in-memory
/// stand-in used by tests and the standalone binary).
///
/// Writes are best effort from the engine's point of view: a failed
/// insert is logged and dropped, never retried, and never rolls back
/// the in-memory trade log or volume ledger.
pub trait PriceStore: Send + Sync {
    /// Append one accepted tick.
    fn insert_price(&self, tick: &PriceTick) -> StoreResult<()>;

    /// Append one recorded trade.
    fn insert_trade(&self, trade: &TradeRecord) -> StoreResult<()>;

    /// Most recent tick for a pair, if any.
    fn get_latest_price(&self, pair: &Pair) -> StoreResult<Option<PriceTick>>;

    /// Ticks for a pair at or after `since`, oldest first.
    fn get_prices_since(&self, pair: &Pair, since: DateTime<Utc>) -> StoreResult<Vec<PriceTick>>;

    /// Recorded trades across all pairs, newest first, up to `limit`.
    fn get_trade_history(&self, limit: usize) -> StoreResult<Vec<TradeRecord>>;

    /// Total volume traded since UTC midnight, across all pairs.
    ///
    /// Used to seed the engine's volume ledger at startup so the cap
    /// survives process restarts.
    fn get_total_traded_volume_today(&self) -> StoreResult<Decimal>;
}
