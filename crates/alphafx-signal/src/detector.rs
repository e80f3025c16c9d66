//! SMA crossover detection.
//!
//! Tracks a short and a long rolling window per pair and fires a signal
//! only on the tick where the sign of (short mean - long mean) flips.

use crate::config::SignalConfig;
use crate::window::RollingWindow;
use alphafx_core::{Price, Side};
use rust_decimal::Decimal;
use tracing::debug;

/// A detected crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
    /// Short mean crossed above the long mean.
    Buy,
    /// Short mean crossed below the long mean.
    Sell,
}

impl Crossover {
    /// The trade side this crossover requests.
    pub fn side(self) -> Side {
        match self {
            Self::Buy => Side::Buy,
            Self::Sell => Side::Sell,
        }
    }
}

/// Edge-triggered crossover detector for one pair.
///
/// Both windows compute partial means as soon as they hold one value,
/// so signals can fire while the long window is still forming. A signal
/// fires only on a strict sign change of the diff relative to the
/// previous tick; `diff == 0` establishes no sign and never signals.
#[derive(Debug)]
pub struct SignalDetector {
    short: RollingWindow,
    long: RollingWindow,
    high_low: RollingWindow,
    prev_diff: Option<Decimal>,
}

impl SignalDetector {
    pub fn new(config: &SignalConfig) -> Self {
        Self {
            short: RollingWindow::new(config.short_window),
            long: RollingWindow::new(config.long_window),
            high_low: RollingWindow::new(config.high_low_window),
            prev_diff: None,
        }
    }

    /// Feed one tick, returning a crossover if the diff sign flipped.
    ///
    /// `prev_diff` is overwritten whenever a diff was computed, even
    /// when no signal fires, so repeated ticks holding the same sign
    /// emit nothing further.
    pub fn update(&mut self, price: Price) -> Option<Crossover> {
        self.short.push(price);
        self.long.push(price);
        self.high_low.push(price);

        let short_mean = self.short.mean()?;
        let long_mean = self.long.mean()?;
        let diff = short_mean - long_mean;

        let signal = match self.prev_diff {
            Some(prev) if prev < Decimal::ZERO && diff > Decimal::ZERO => Some(Crossover::Buy),
            Some(prev) if prev > Decimal::ZERO && diff < Decimal::ZERO => Some(Crossover::Sell),
            _ => None,
        };

        if let Some(cross) = signal {
            debug!(
                ?cross,
                %short_mean,
                %long_mean,
                prev_diff = %self.prev_diff.unwrap_or_default(),
                "Crossover detected"
            );
        }

        self.prev_diff = Some(diff);
        signal
    }

    /// Short window mean, if any values are held.
    pub fn short_mean(&self) -> Option<Decimal> {
        self.short.mean()
    }

    /// Long window mean, if any values are held.
    pub fn long_mean(&self) -> Option<Decimal> {
        self.long.mean()
    }

    /// Highest price in the high/low window.
    pub fn high(&self) -> Option<Price> {
        self.high_low.high()
    }

    /// Lowest price in the high/low window.
    pub fn low(&self) -> Option<Price> {
        self.high_low.low()
    }

    /// Most recent price fed into the detector.
    pub fn last_price(&self) -> Option<Price> {
        self.short.last()
    }
}
