//! Broadcast hub configuration.

use serde::{Deserialize, Serialize};

/// Queue sizing for the hub and its subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastConfig {
    /// Bounded queue depth per subscriber. A subscriber that falls this
    /// far behind starts losing events. Default: 64.
    #[serde(default = "default_subscriber_queue_depth")]
    pub subscriber_queue_depth: usize,
    /// Bounded depth of the hub's own inbox. Default: 1024.
    #[serde(default = "default_hub_queue_depth")]
    pub hub_queue_depth: usize,
}

fn default_subscriber_queue_depth() -> usize {
    64
}

fn default_hub_queue_depth() -> usize {
    1024
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            subscriber_queue_depth: default_subscriber_queue_depth(),
            hub_queue_depth: default_hub_queue_depth(),
        }
    }
}
