//! Signal detector configuration.

use crate::error::{SignalError, SignalResult};
use serde::{Deserialize, Serialize};

/// Window sizing for crossover detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Short SMA window length in ticks. Default: 5.
    #[serde(default = "default_short_window")]
    pub short_window: usize,
    /// Long SMA window length in ticks. Default: 15.
    #[serde(default = "default_long_window")]
    pub long_window: usize,
    /// High/low tracking window length in ticks. Default: 60.
    #[serde(default = "default_high_low_window")]
    pub high_low_window: usize,
}

fn default_short_window() -> usize {
    5
}

fn default_long_window() -> usize {
    15
}

fn default_high_low_window() -> usize {
    60
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            short_window: default_short_window(),
            long_window: default_long_window(),
            high_low_window: default_high_low_window(),
        }
    }
}

impl SignalConfig {
    /// Validate window sizing.
    pub fn validate(&self) -> SignalResult<()> {
        if self.short_window == 0 || self.long_window == 0 || self.high_low_window == 0 {
            return Err(SignalError::ZeroCapacity);
        }
        if self.short_window >= self.long_window {
            return Err(SignalError::WindowOrder {
                short: self.short_window,
                long: self.long_window,
            });
        }
        Ok(())
    }
}
