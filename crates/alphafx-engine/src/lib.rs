//! The AlphaFX engine: tick → signal → trade → broadcast.
//!
//! One worker task per pair processes ticks strictly in arrival order;
//! pairs are independent of each other. The engine validates ticks at
//! the boundary, owns the broadcast hub, and exposes read-only status
//! snapshots that are safe to query concurrently with ingestion.

pub mod config;
pub mod engine;
pub mod error;
pub mod status;
mod worker;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use status::PairStatus;
