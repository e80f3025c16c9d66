//! Per-pair trade recorder.

use crate::ids::TradeIds;
use alphafx_core::{Pair, Price, TradeRecord};
use alphafx_risk::Admitted;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;

/// Records admitted trades for one pair.
///
/// The log is append-only; records are never mutated or deleted. The
/// volume ledger is already debited by the time a trade reaches here
/// (admission debits it under the ledger lock), so the executor only
/// appends.
#[derive(Debug)]
pub struct TradeExecutor {
    pair: Pair,
    ids: TradeIds,
    log: Vec<TradeRecord>,
    total_volume: Decimal,
}

impl TradeExecutor {
    pub fn new(pair: Pair, ids: TradeIds) -> Self {
        Self {
            pair,
            ids,
            log: Vec::new(),
            total_volume: Decimal::ZERO,
        }
    }

    /// Append a trade record for an admitted signal.
    ///
    /// If a later persistence step fails, nothing here is rolled back.
    pub fn record(
        &mut self,
        admitted: &Admitted,
        price: Price,
        executed_at: DateTime<Utc>,
    ) -> TradeRecord {
        let record = TradeRecord {
            id: self.ids.next_id(),
            pair: self.pair.clone(),
            side: admitted.side,
            price,
            volume: admitted.volume,
            resulting_position: admitted.resulting_position,
            realized_pnl: admitted.realized_pnl,
            executed_at,
        };

        self.total_volume += admitted.volume.inner();
        self.log.push(record.clone());

        info!(
            id = record.id,
            pair = %record.pair,
            side = %record.side,
            price = %record.price,
            volume = %record.volume,
            position = %record.resulting_position,
            pnl = ?record.realized_pnl,
            "Trade recorded"
        );

        record
    }

    /// The most recent `limit` trades, newest first.
    pub fn recent_trades(&self, limit: usize) -> Vec<TradeRecord> {
        self.log.iter().rev().take(limit).cloned().collect()
    }

    /// Average volume per trade over the whole log; zero when empty.
    pub fn average_volume(&self) -> Decimal {
        if self.log.is_empty() {
            return Decimal::ZERO;
        }
        self.total_volume / Decimal::from(self.log.len() as u64)
    }

    pub fn trade_count(&self) -> usize {
        self.log.len()
    }

    /// Sum of realized profit and loss across closed positions.
    pub fn realized_pnl(&self) -> Decimal {
        self.log.iter().filter_map(|t| t.realized_pnl).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alphafx_core::{PositionState, Side, Volume};
    use rust_decimal_macros::dec;

    fn executor() -> TradeExecutor {
        TradeExecutor::new(Pair::parse("EURUSD").unwrap(), TradeIds::new())
    }

    fn admitted(side: Side, pnl: Option<Decimal>) -> Admitted {
        Admitted {
            side,
            volume: Volume::new(dec!(100000)),
            resulting_position: match side {
                Side::Buy => PositionState::Long,
                Side::Sell => PositionState::Closed,
            },
            realized_pnl: pnl,
        }
    }

    #[test]
    fn test_record_appends_with_sequential_ids() {
        let mut exec = executor();

        let first = exec.record(&admitted(Side::Buy, None), Price::new(dec!(1.2000)), Utc::now());
        let second = exec.record(
            &admitted(Side::Sell, Some(dec!(0.0050))),
            Price::new(dec!(1.2050)),
            Utc::now(),
        );

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(exec.trade_count(), 2);
    }

    #[test]
    fn test_recent_trades_newest_first() {
        let mut exec = executor();

        exec.record(&admitted(Side::Buy, None), Price::new(dec!(1.2000)), Utc::now());
        exec.record(
            &admitted(Side::Sell, Some(dec!(0.0050))),
            Price::new(dec!(1.2050)),
            Utc::now(),
        );

        let recent = exec.recent_trades(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, 2);
        assert_eq!(recent[0].side, Side::Sell);
        assert_eq!(recent[1].id, 1);

        let capped = exec.recent_trades(1);
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0].id, 2);
    }

    #[test]
    fn test_average_volume() {
        let mut exec = executor();
        assert_eq!(exec.average_volume(), Decimal::ZERO);

        exec.record(&admitted(Side::Buy, None), Price::new(dec!(1.2000)), Utc::now());
        assert_eq!(exec.average_volume(), dec!(100000));
    }

    #[test]
    fn test_realized_pnl_sums_closes_only() {
        let mut exec = executor();

        exec.record(&admitted(Side::Buy, None), Price::new(dec!(1.2000)), Utc::now());
        exec.record(
            &admitted(Side::Sell, Some(dec!(0.0050))),
            Price::new(dec!(1.2050)),
            Utc::now(),
        );

        assert_eq!(exec.realized_pnl(), dec!(0.0050));
    }
}
