//! Read-only per-pair status snapshot.

use alphafx_core::{Pair, PositionState, Price, TradeRecord, Volume};
use rust_decimal::Decimal;
use serde::Serialize;

/// Snapshot of one pair's pipeline state.
///
/// Refreshed by the pair worker after every processed tick and read
/// lock-free of the tick path by status queries.
#[derive(Debug, Clone, Serialize)]
pub struct PairStatus {
    pub pair: Pair,
    /// Latest accepted price, absent before the first tick.
    pub current_price: Option<Price>,
    /// Highest price in the high/low window.
    pub high: Option<Price>,
    /// Lowest price in the high/low window.
    pub low: Option<Price>,
    /// Average volume per recorded trade; zero before any trade.
    pub avg_trade_volume: Decimal,
    pub position: PositionState,
    /// Entry price of the open long, if one is held.
    pub entry_price: Option<Price>,
    /// Unrealized profit and loss of the open long.
    pub open_pnl: Option<Decimal>,
    /// Cumulative admitted volume visible to this pair's cap checks.
    pub cumulative_volume: Volume,
    /// Most recent trades, newest first.
    pub recent_trades: Vec<TradeRecord>,
}

impl PairStatus {
    /// Blank status for a pair that has not seen a tick yet.
    pub fn empty(pair: Pair) -> Self {
        Self {
            pair,
            current_price: None,
            high: None,
            low: None,
            avg_trade_volume: Decimal::ZERO,
            position: PositionState::Flat,
            entry_price: None,
            open_pnl: None,
            cumulative_volume: Volume::ZERO,
            recent_trades: Vec::new(),
        }
    }
}
