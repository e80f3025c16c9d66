//! Event fan-out to live subscribers.
//!
//! The hub is an actor owning the subscriber registry. Producers hand
//! events off with a non-blocking `publish`; a dedicated worker fans
//! each event out over per-subscriber bounded queues, so one slow or
//! dead subscriber can never delay the producer or its peers.

pub mod config;
pub mod error;
pub mod hub;

pub use config::BroadcastConfig;
pub use error::{BroadcastError, BroadcastResult};
pub use hub::{BroadcastHub, Subscription};
