//! Engine composition root.

use std::sync::Arc;

use alphafx_broadcast::{BroadcastHub, BroadcastResult, Subscription};
use alphafx_core::{Pair, Price, PriceTick};
use alphafx_executor::{TradeExecutor, TradeIds};
use alphafx_persistence::PriceStore;
use alphafx_risk::{LedgerHandle, LedgerScope, PositionGovernor, VolumeLedger};
use alphafx_signal::SignalDetector;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::status::PairStatus;
use crate::worker::PairWorker;

struct PairHandle {
    tx: mpsc::Sender<PriceTick>,
    status: Arc<RwLock<PairStatus>>,
}

/// Owns the per-pair pipeline and the broadcast hub.
///
/// An explicit value constructed with configuration and handed to the
/// ingestion and query entry points; there is no ambient global state.
/// Cheap to clone and share across handlers.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    config: EngineConfig,
    pairs: DashMap<Pair, PairHandle>,
    hub: BroadcastHub,
    store: Arc<dyn PriceStore>,
    trade_ids: TradeIds,
    /// Present only with global ledger scope; shared by all workers.
    global_ledger: Option<Arc<Mutex<VolumeLedger>>>,
}

impl Engine {
    /// Build the engine and spawn its broadcast hub.
    ///
    /// With global ledger scope the cumulative volume is seeded from
    /// the store's traded-volume-today so the cap survives restarts; a
    /// store failure seeds zero and is logged. Must be called from
    /// within a tokio runtime.
    pub fn new(config: EngineConfig, store: Arc<dyn PriceStore>) -> EngineResult<Self> {
        config.validate()?;

        let (hub, _hub_task) = BroadcastHub::spawn(config.broadcast.clone());

        let global_ledger = match config.risk.ledger_scope {
            LedgerScope::Global => {
                let seeded = match store.get_total_traded_volume_today() {
                    Ok(volume) => volume,
                    Err(e) => {
                        warn!(error = %e, "Could not seed ledger from store, starting at zero");
                        Decimal::ZERO
                    }
                };
                info!(seeded = %seeded, cap = %config.risk.volume_cap, "Global volume ledger ready");
                Some(Arc::new(Mutex::new(VolumeLedger::seeded(
                    config.risk.volume_cap.into(),
                    seeded.into(),
                ))))
            }
            LedgerScope::PerPair => None,
        };

        Ok(Self {
            inner: Arc::new(EngineInner {
                config,
                pairs: DashMap::new(),
                hub,
                store,
                trade_ids: TradeIds::new(),
                global_ledger,
            }),
        })
    }

    /// The sole mutation entry point.
    ///
    /// Validates the tick, then queues it to the pair's worker. Ticks
    /// for one pair are processed in the order they are accepted here.
    pub async fn ingest(
        &self,
        pair: &str,
        price: Decimal,
        observed_at: DateTime<Utc>,
    ) -> EngineResult<()> {
        let pair = Pair::parse(pair)?;
        let tick = PriceTick::new(pair.clone(), Price::new(price), observed_at)?;

        let tx = self.pair_sender(&pair);
        tx.send(tick)
            .await
            .map_err(|_| EngineError::PairUnavailable(pair))
    }

    /// Long-lived event stream; yields price updates and trades in
    /// publish order for this subscriber.
    pub async fn subscribe(&self) -> BroadcastResult<Subscription> {
        self.inner.hub.subscribe().await
    }

    /// Read-only status snapshot, safe to call concurrently with
    /// ingestion. `None` for a pair that has never been ingested.
    pub fn get_status(&self, pair: &str) -> EngineResult<Option<PairStatus>> {
        let pair = Pair::parse(pair)?;
        Ok(self
            .inner
            .pairs
            .get(&pair)
            .map(|handle| handle.status.read().clone()))
    }

    /// Pairs with an active worker.
    pub fn active_pairs(&self) -> Vec<Pair> {
        self.inner.pairs.iter().map(|e| e.key().clone()).collect()
    }

    /// The persistence collaborator this engine writes through.
    pub fn store(&self) -> Arc<dyn PriceStore> {
        Arc::clone(&self.inner.store)
    }

    /// Get the pair's tick sender, spawning its worker on first use.
    fn pair_sender(&self, pair: &Pair) -> mpsc::Sender<PriceTick> {
        if let Some(handle) = self.inner.pairs.get(pair) {
            return handle.tx.clone();
        }

        let entry = self.inner.pairs.entry(pair.clone()).or_insert_with(|| {
            let inner = &self.inner;
            let (tx, rx) = mpsc::channel(inner.config.pair_queue_depth);
            let status = Arc::new(RwLock::new(PairStatus::empty(pair.clone())));

            let ledger = match &inner.global_ledger {
                Some(shared) => LedgerHandle::Shared(Arc::clone(shared)),
                None => LedgerHandle::Own(VolumeLedger::new(inner.config.risk.volume_cap.into())),
            };

            let worker = PairWorker::new(
                pair.clone(),
                SignalDetector::new(&inner.config.signal),
                PositionGovernor::new(inner.config.risk.trade_size.into()),
                TradeExecutor::new(pair.clone(), inner.trade_ids.clone()),
                ledger,
                inner.hub.clone(),
                Arc::clone(&inner.store),
                Arc::clone(&status),
                inner.config.recent_trades_limit,
                rx,
            );
            tokio::spawn(worker.run());
            info!(%pair, "Spawned pair worker");

            PairHandle { tx, status }
        });
        entry.tx.clone()
    }
}
