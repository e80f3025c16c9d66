//! Gateway configuration.

use serde::{Deserialize, Serialize};

/// Gateway server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum concurrent WebSocket feed connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    /// Trades returned by `/history` when no limit is given.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_port() -> u16 {
    8000
}

fn default_max_connections() -> usize {
    32
}

fn default_history_limit() -> usize {
    100
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            max_connections: default_max_connections(),
            history_limit: default_history_limit(),
        }
    }
}
