//! Per-pair worker task.
//!
//! Each pair gets one single-owner task holding that pair's detector,
//! governor, executor, and ledger handle. Ticks arrive over a bounded
//! mpsc channel and are processed strictly in order, so the window
//! state, `prev_diff`, and the ledger are never read or written
//! concurrently for the same pair.

use std::sync::Arc;

use alphafx_broadcast::BroadcastHub;
use alphafx_core::{Event, Pair, PriceTick};
use alphafx_executor::TradeExecutor;
use alphafx_persistence::PriceStore;
use alphafx_risk::{Decision, LedgerHandle, PositionGovernor, RejectReason};
use alphafx_signal::SignalDetector;
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::status::PairStatus;

pub(crate) struct PairWorker {
    pair: Pair,
    detector: SignalDetector,
    governor: PositionGovernor,
    executor: TradeExecutor,
    ledger: LedgerHandle,
    hub: BroadcastHub,
    store: Arc<dyn PriceStore>,
    status: Arc<RwLock<PairStatus>>,
    recent_trades_limit: usize,
    rx: mpsc::Receiver<PriceTick>,
}

impl PairWorker {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        pair: Pair,
        detector: SignalDetector,
        governor: PositionGovernor,
        executor: TradeExecutor,
        ledger: LedgerHandle,
        hub: BroadcastHub,
        store: Arc<dyn PriceStore>,
        status: Arc<RwLock<PairStatus>>,
        recent_trades_limit: usize,
        rx: mpsc::Receiver<PriceTick>,
    ) -> Self {
        Self {
            pair,
            detector,
            governor,
            executor,
            ledger,
            hub,
            store,
            status,
            recent_trades_limit,
            rx,
        }
    }

    pub(crate) async fn run(mut self) {
        debug!(pair = %self.pair, "Pair worker started");
        while let Some(tick) = self.rx.recv().await {
            self.process_tick(tick);
        }
        debug!(pair = %self.pair, "Pair worker stopped");
    }

    /// Run one tick through the full pipeline.
    ///
    /// Window update, signal, decision, trade, and status refresh are
    /// one synchronous block; only the broadcast hand-off is queued.
    fn process_tick(&mut self, tick: PriceTick) {
        // Durable history is best effort and must not stall the pipeline.
        if let Err(e) = self.store.insert_price(&tick) {
            warn!(pair = %tick.pair, error = %e, "Price insert failed, continuing");
        }

        let signal = self.detector.update(tick.price).map(|c| c.side());
        let decision = self.governor.decide(signal, tick.price, &mut self.ledger);

        let trade = match decision {
            Decision::Admit(admitted) => {
                let record = self
                    .executor
                    .record(&admitted, tick.price, tick.observed_at);
                // The ledger debit at admission is authoritative; a
                // failed insert is logged and not rolled back.
                if let Err(e) = self.store.insert_trade(&record) {
                    warn!(
                        pair = %record.pair,
                        trade_id = record.id,
                        error = %e,
                        "Trade insert failed, in-memory state kept"
                    );
                }
                Some(record)
            }
            Decision::Reject(RejectReason::NoSignal) => None,
            Decision::Reject(RejectReason::CapReached) => {
                info!(
                    pair = %tick.pair,
                    signal = ?signal,
                    cumulative = %self.ledger.cumulative(),
                    "Signal rejected, volume cap reached"
                );
                None
            }
            Decision::Reject(RejectReason::NoOpForCurrentPosition) => {
                debug!(
                    pair = %tick.pair,
                    signal = ?signal,
                    position = %self.governor.position(),
                    "Signal is a no-op for the current position"
                );
                None
            }
        };

        // Refresh before publishing so a consumer that sees the event
        // also sees a status at least as new.
        self.refresh_status(&tick);

        self.hub
            .publish(Event::price_update(&tick.pair, tick.price, tick.observed_at));
        if let Some(record) = &trade {
            self.hub.publish(Event::trade(record));
        }
    }

    fn refresh_status(&self, tick: &PriceTick) {
        let mut status = self.status.write();
        status.current_price = self.detector.last_price();
        status.high = self.detector.high();
        status.low = self.detector.low();
        status.avg_trade_volume = self.executor.average_volume();
        status.position = self.governor.position();
        status.entry_price = self.governor.entry_price();
        status.open_pnl = self.governor.open_pnl(tick.price);
        status.cumulative_volume = self.ledger.cumulative();
        status.recent_trades = self.executor.recent_trades(self.recent_trades_limit);
    }
}
