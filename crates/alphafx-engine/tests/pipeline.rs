//! End-to-end pipeline tests: ticks in, trades and events out.

use std::sync::Arc;
use std::time::Duration;

use alphafx_broadcast::Subscription;
use alphafx_core::{Event, PositionState, Side, TradeRecord, Volume};
use alphafx_engine::{Engine, EngineConfig, EngineError};
use alphafx_persistence::{MemoryStore, PriceStore};
use alphafx_risk::RiskConfig;
use alphafx_signal::SignalConfig;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Small windows so crossovers fire within a handful of ticks.
fn test_config() -> EngineConfig {
    EngineConfig {
        signal: SignalConfig {
            short_window: 2,
            long_window: 4,
            high_low_window: 60,
        },
        ..Default::default()
    }
}

fn engine_with(config: EngineConfig) -> (Engine, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let engine = Engine::new(config, store.clone() as Arc<dyn PriceStore>).unwrap();
    (engine, store)
}

async fn feed(engine: &Engine, pair: &str, prices: &[Decimal]) {
    for &price in prices {
        engine.ingest(pair, price, Utc::now()).await.unwrap();
    }
}

async fn next_event(sub: &mut Subscription) -> Event {
    tokio::time::timeout(Duration::from_secs(5), sub.recv())
        .await
        .expect("timed out waiting for event")
        .expect("hub closed")
}

/// Drain events until the expected number of price updates and trades
/// were seen, returning the trade events in arrival order.
async fn collect_trades(
    sub: &mut Subscription,
    price_updates: usize,
    expected_trades: usize,
) -> Vec<Event> {
    let mut trades = Vec::new();
    let mut seen = 0;
    while seen < price_updates || trades.len() < expected_trades {
        match next_event(sub).await {
            Event::PriceUpdate { .. } => seen += 1,
            trade @ Event::Trade { .. } => trades.push(trade),
        }
    }
    trades
}

/// Falling then spiking prices: short mean crosses above the long mean
/// at the spike (BUY at 10), then collapses back below it (SELL at 1).
const ZIGZAG: [Decimal; 7] = [
    dec!(4),
    dec!(3),
    dec!(2),
    dec!(1),
    dec!(10),
    dec!(1),
    dec!(1),
];

#[tokio::test]
async fn test_buy_then_sell_round_trip() {
    let (engine, store) = engine_with(test_config());
    let mut sub = engine.subscribe().await.unwrap();

    feed(&engine, "EURUSD", &ZIGZAG).await;
    let trades = collect_trades(&mut sub, ZIGZAG.len(), 2).await;

    assert_eq!(trades.len(), 2);
    match &trades[0] {
        Event::Trade {
            id, action, price, ..
        } => {
            assert_eq!(*id, 1);
            assert_eq!(*action, Side::Buy);
            assert!((price - 10.0).abs() < 1e-12);
        }
        other => panic!("expected trade, got {other:?}"),
    }
    match &trades[1] {
        Event::Trade { id, action, .. } => {
            assert_eq!(*id, 2);
            assert_eq!(*action, Side::Sell);
        }
        other => panic!("expected trade, got {other:?}"),
    }

    let status = engine.get_status("EURUSD").unwrap().unwrap();
    assert_eq!(status.position, PositionState::Closed);
    assert_eq!(status.entry_price, None);
    assert_eq!(status.open_pnl, None);
    assert_eq!(status.cumulative_volume, Volume::new(dec!(200000)));
    assert_eq!(status.avg_trade_volume, dec!(100000));
    assert_eq!(status.current_price.unwrap().inner(), dec!(1));
    assert_eq!(status.high.unwrap().inner(), dec!(10));
    assert_eq!(status.low.unwrap().inner(), dec!(1));

    // Newest first; the close carries realized PnL of 1 - 10.
    assert_eq!(status.recent_trades.len(), 2);
    assert_eq!(status.recent_trades[0].side, Side::Sell);
    assert_eq!(status.recent_trades[0].realized_pnl, Some(dec!(-9)));
    assert_eq!(status.recent_trades[1].side, Side::Buy);

    // Both trades reached the collaborator store.
    assert_eq!(store.get_trade_history(10).unwrap().len(), 2);
    assert_eq!(store.get_total_traded_volume_today().unwrap(), dec!(200000));
}

#[tokio::test]
async fn test_volume_cap_latches() {
    let mut config = test_config();
    config.risk = RiskConfig {
        volume_cap: dec!(200000),
        trade_size: dec!(100000),
        ..Default::default()
    };
    let (engine, _store) = engine_with(config);
    let mut sub = engine.subscribe().await.unwrap();

    // ZIGZAG yields BUY then SELL (cap exactly filled); the tail forces
    // a third crossover that must be refused.
    let mut prices = ZIGZAG.to_vec();
    prices.extend([dec!(5), dec!(20)]);
    feed(&engine, "EURUSD", &prices).await;

    let trades = collect_trades(&mut sub, prices.len(), 2).await;
    assert_eq!(trades.len(), 2);

    let status = engine.get_status("EURUSD").unwrap().unwrap();
    assert_eq!(status.cumulative_volume, Volume::new(dec!(200000)));
    // The rejected BUY did not reopen the position.
    assert_eq!(status.position, PositionState::Closed);
    assert_eq!(status.recent_trades.len(), 2);
}

#[tokio::test]
async fn test_global_cap_shared_across_pairs() {
    // Global scope (the default): every pair debits the same ledger.
    // Cap 300,000 at trade size 100,000 leaves three admissions for the
    // whole engine; two pairs each produce three admissible crossovers,
    // so whichever interleaving the workers land on, exactly three
    // trades happen and the cumulative volume stops at the cap.
    let mut config = test_config();
    config.risk = RiskConfig {
        volume_cap: dec!(300000),
        trade_size: dec!(100000),
        ..Default::default()
    };
    let (engine, store) = engine_with(config);
    let mut sub = engine.subscribe().await.unwrap();

    let mut prices = ZIGZAG.to_vec();
    prices.extend([dec!(5), dec!(20)]);
    for &price in &prices {
        engine.ingest("EURUSD", price, Utc::now()).await.unwrap();
        engine.ingest("GBPUSD", price, Utc::now()).await.unwrap();
    }

    let trades = collect_trades(&mut sub, prices.len() * 2, 3).await;
    assert_eq!(trades.len(), 3);

    let eur = engine.get_status("EURUSD").unwrap().unwrap();
    let gbp = engine.get_status("GBPUSD").unwrap().unwrap();

    // Both pairs see the one shared ledger, filled exactly to the cap.
    assert_eq!(eur.cumulative_volume, Volume::new(dec!(300000)));
    assert_eq!(gbp.cumulative_volume, Volume::new(dec!(300000)));
    assert_eq!(eur.recent_trades.len() + gbp.recent_trades.len(), 3);

    assert_eq!(store.get_total_traded_volume_today().unwrap(), dec!(300000));
}

#[tokio::test]
async fn test_ledger_seeded_from_store() {
    let store = Arc::new(MemoryStore::new());
    let seed_trade = TradeRecord {
        id: 999,
        pair: alphafx_core::Pair::parse("EURUSD").unwrap(),
        side: Side::Buy,
        price: alphafx_core::Price::new(dec!(1.08)),
        volume: Volume::new(dec!(10000000)),
        resulting_position: PositionState::Long,
        realized_pnl: None,
        executed_at: Utc::now(),
    };
    store.insert_trade(&seed_trade).unwrap();

    // Default cap is 10,000,000: the seed alone exhausts it.
    let engine = Engine::new(test_config(), store as Arc<dyn PriceStore>).unwrap();
    let mut sub = engine.subscribe().await.unwrap();

    feed(&engine, "GBPUSD", &ZIGZAG).await;
    let trades = collect_trades(&mut sub, ZIGZAG.len(), 0).await;

    assert!(trades.is_empty());
    let status = engine.get_status("GBPUSD").unwrap().unwrap();
    assert_eq!(status.cumulative_volume, Volume::new(dec!(10000000)));
    assert_eq!(status.position, PositionState::Flat);
}

#[tokio::test]
async fn test_sell_while_flat_records_nothing() {
    let (engine, store) = engine_with(test_config());
    let mut sub = engine.subscribe().await.unwrap();

    // Rising then collapsing: first crossover is a SELL with no long open.
    let prices = [dec!(1), dec!(2), dec!(3), dec!(4), dec!(0.5)];
    feed(&engine, "EURUSD", &prices).await;

    let trades = collect_trades(&mut sub, prices.len(), 0).await;
    assert!(trades.is_empty());

    let status = engine.get_status("EURUSD").unwrap().unwrap();
    assert_eq!(status.position, PositionState::Flat);
    assert!(status.recent_trades.is_empty());
    assert_eq!(status.avg_trade_volume, Decimal::ZERO);
    assert!(store.get_trade_history(10).unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_ticks_rejected_at_boundary() {
    let (engine, store) = engine_with(test_config());

    let err = engine.ingest("", dec!(1.08), Utc::now()).await.unwrap_err();
    assert!(matches!(err, EngineError::MalformedTick(_)));

    let err = engine
        .ingest("EURUSD", dec!(-1), Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::MalformedTick(_)));

    let err = engine
        .ingest("EURUSD", Decimal::ZERO, Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::MalformedTick(_)));

    // Pipeline state untouched: no workers, nothing stored.
    assert!(engine.active_pairs().is_empty());
    assert!(engine.get_status("EURUSD").unwrap().is_none());
    let pair = alphafx_core::Pair::parse("EURUSD").unwrap();
    assert!(store.get_latest_price(&pair).unwrap().is_none());
}

#[tokio::test]
async fn test_pairs_are_independent() {
    let (engine, _store) = engine_with(test_config());
    let mut sub = engine.subscribe().await.unwrap();

    // Interleave two pairs; each sees its own ZIGZAG and trades twice.
    for &price in ZIGZAG.iter() {
        engine.ingest("EURUSD", price, Utc::now()).await.unwrap();
        engine.ingest("gbpusd", price, Utc::now()).await.unwrap();
    }

    let trades = collect_trades(&mut sub, ZIGZAG.len() * 2, 4).await;
    assert_eq!(trades.len(), 4);

    let eur = engine.get_status("EURUSD").unwrap().unwrap();
    let gbp = engine.get_status("GBPUSD").unwrap().unwrap();
    assert_eq!(eur.recent_trades.len(), 2);
    assert_eq!(gbp.recent_trades.len(), 2);
    assert_eq!(eur.position, PositionState::Closed);
    assert_eq!(gbp.position, PositionState::Closed);

    // Trade ids are unique across the engine.
    let mut ids: Vec<u64> = eur
        .recent_trades
        .iter()
        .chain(gbp.recent_trades.iter())
        .map(|t| t.id)
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    let mut pairs = engine.active_pairs();
    pairs.sort();
    assert_eq!(pairs.len(), 2);
}

#[tokio::test]
async fn test_constant_prices_never_trade() {
    let (engine, _store) = engine_with(test_config());
    let mut sub = engine.subscribe().await.unwrap();

    let prices = vec![dec!(1.0); 30];
    feed(&engine, "USDJPY", &prices).await;

    let trades = collect_trades(&mut sub, prices.len(), 0).await;
    assert!(trades.is_empty());

    let status = engine.get_status("USDJPY").unwrap().unwrap();
    assert_eq!(status.position, PositionState::Flat);
    assert_eq!(status.high.unwrap().inner(), dec!(1.0));
    assert_eq!(status.low.unwrap().inner(), dec!(1.0));
}
