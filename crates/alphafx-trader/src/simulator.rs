//! Random-walk tick source for the standalone binary.

use std::time::Duration;

use alphafx_engine::Engine;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::SimulatorConfig;

fn random_walk(last: f64, scale: f64, rng: &mut impl Rng) -> f64 {
    last * (1.0 + rng.gen_range(-scale..=scale))
}

/// Feed synthetic ticks into the engine forever.
///
/// Each configured pair follows an independent proportional random
/// walk from its starting quote, one tick per pair per interval.
pub async fn run_simulator(engine: Engine, config: SimulatorConfig) {
    info!(
        pairs = config.pairs.len(),
        interval_ms = config.interval_ms,
        "Tick simulator started"
    );

    let mut rng = StdRng::from_entropy();
    let mut last: Vec<(String, f64)> = config
        .pairs
        .iter()
        .map(|p| (p.pair.clone(), p.start_price))
        .collect();

    let mut ticker = tokio::time::interval(Duration::from_millis(config.interval_ms));
    loop {
        ticker.tick().await;
        for (pair, price) in last.iter_mut() {
            *price = random_walk(*price, config.step_scale, &mut rng);

            let Some(quote) = Decimal::from_f64(*price) else {
                warn!(%pair, price = *price, "Walk produced a non-finite price, skipping tick");
                continue;
            };
            let quote = quote.round_dp(6);

            if let Err(e) = engine.ingest(pair, quote, Utc::now()).await {
                warn!(%pair, error = %e, "Simulated tick rejected");
            } else {
                debug!(%pair, price = %quote, "Simulated tick");
            }
        }
    }
}
