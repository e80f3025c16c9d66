//! Application configuration.

use crate::error::{AppError, AppResult};
use alphafx_engine::EngineConfig;
use alphafx_gateway::GatewayConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One simulated instrument with its starting quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedPair {
    pub pair: String,
    pub start_price: f64,
}

/// Random-walk tick source configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Feed synthetic ticks when no upstream publisher exists.
    #[serde(default = "default_sim_enabled")]
    pub enabled: bool,
    /// Delay between rounds of ticks, one tick per pair per round.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Half-width of the proportional step, e.g. 0.0002 = +/-2 pips.
    #[serde(default = "default_step_scale")]
    pub step_scale: f64,
    #[serde(default = "default_sim_pairs")]
    pub pairs: Vec<SimulatedPair>,
}

fn default_sim_enabled() -> bool {
    true
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_step_scale() -> f64 {
    0.0002
}

fn default_sim_pairs() -> Vec<SimulatedPair> {
    [("EURUSD", 1.0800), ("GBPUSD", 1.2600), ("USDJPY", 150.0)]
        .into_iter()
        .map(|(pair, start_price)| SimulatedPair {
            pair: pair.to_string(),
            start_price,
        })
        .collect()
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            enabled: default_sim_enabled(),
            interval_ms: default_interval_ms(),
            step_scale: default_step_scale(),
            pairs: default_sim_pairs(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Gateway configuration.
    #[serde(default)]
    pub gateway: GatewayConfig,
    /// Tick simulator configuration.
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

impl AppConfig {
    /// Resolve the config path: CLI arg > ALPHAFX_CONFIG env var > default.
    pub fn resolve_path(cli: Option<String>) -> String {
        cli.or_else(|| std::env::var("ALPHAFX_CONFIG").ok())
            .unwrap_or_else(|| "config/default.toml".to_string())
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &str) -> AppResult<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(path = %path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content).map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}
