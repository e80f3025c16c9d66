//! Trade id allocation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Engine-wide sequential trade id allocator.
///
/// Shared across all pair workers so trade ids are unique and
/// monotonically increasing over the whole engine.
#[derive(Debug, Clone, Default)]
pub struct TradeIds(Arc<AtomicU64>);

impl TradeIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id, starting from 1.
    pub fn next_id(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}
