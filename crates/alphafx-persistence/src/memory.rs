//! In-memory store implementation.

use crate::error::StoreResult;
use crate::store::PriceStore;
use alphafx_core::{Pair, PriceTick, TradeRecord};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Process-local store backed by vectors.
///
/// Serves the standalone binary and tests. Rows are kept in insertion
/// order, which matches tick arrival order per pair.
#[derive(Debug, Default)]
pub struct MemoryStore {
    prices: RwLock<HashMap<Pair, Vec<PriceTick>>>,
    trades: RwLock<Vec<TradeRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PriceStore for MemoryStore {
    fn insert_price(&self, tick: &PriceTick) -> StoreResult<()> {
        self.prices
            .write()
            .entry(tick.pair.clone())
            .or_default()
            .push(tick.clone());
        Ok(())
    }

    fn insert_trade(&self, trade: &TradeRecord) -> StoreResult<()> {
        self.trades.write().push(trade.clone());
        Ok(())
    }

    fn get_latest_price(&self, pair: &Pair) -> StoreResult<Option<PriceTick>> {
        Ok(self
            .prices
            .read()
            .get(pair)
            .and_then(|rows| rows.last().cloned()))
    }

    fn get_prices_since(&self, pair: &Pair, since: DateTime<Utc>) -> StoreResult<Vec<PriceTick>> {
        Ok(self
            .prices
            .read()
            .get(pair)
            .map(|rows| {
                rows.iter()
                    .filter(|t| t.observed_at >= since)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn get_trade_history(&self, limit: usize) -> StoreResult<Vec<TradeRecord>> {
        let trades = self.trades.read();
        Ok(trades.iter().rev().take(limit).cloned().collect())
    }

    fn get_total_traded_volume_today(&self) -> StoreResult<Decimal> {
        let midnight = Utc::now()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .unwrap_or_else(Utc::now);

        Ok(self
            .trades
            .read()
            .iter()
            .filter(|t| t.executed_at >= midnight)
            .map(|t| t.volume.inner())
            .sum())
    }
}
