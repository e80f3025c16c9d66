//! Engine configuration.

use crate::error::EngineResult;
use alphafx_broadcast::BroadcastConfig;
use alphafx_risk::RiskConfig;
use alphafx_signal::SignalConfig;
use serde::{Deserialize, Serialize};

/// Configuration for the whole pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub signal: SignalConfig,
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub broadcast: BroadcastConfig,
    /// How many recent trades a status snapshot carries. Default: 20.
    #[serde(default = "default_recent_trades_limit")]
    pub recent_trades_limit: usize,
    /// Bounded tick queue depth per pair worker. Default: 256.
    #[serde(default = "default_pair_queue_depth")]
    pub pair_queue_depth: usize,
}

fn default_recent_trades_limit() -> usize {
    20
}

fn default_pair_queue_depth() -> usize {
    256
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            signal: SignalConfig::default(),
            risk: RiskConfig::default(),
            broadcast: BroadcastConfig::default(),
            recent_trades_limit: default_recent_trades_limit(),
            pair_queue_depth: default_pair_queue_depth(),
        }
    }
}

impl EngineConfig {
    /// Validate nested component configuration.
    pub fn validate(&self) -> EngineResult<()> {
        self.signal.validate()?;
        self.risk.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.recent_trades_limit, 20);
    }

    #[test]
    fn test_toml_defaults_fill_in() {
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config.recent_trades_limit, 20);
        assert_eq!(config.pair_queue_depth, 256);
        assert_eq!(config.signal.short_window, 5);
    }
}
