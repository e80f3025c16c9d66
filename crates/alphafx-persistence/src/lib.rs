//! Persistence collaborator port.
//!
//! Durable history is owned by an external store; the engine only
//! consumes this interface. Store failures are reported upward and
//! logged but never corrupt in-memory engine state, which stays
//! authoritative for position and volume.

pub mod error;
pub mod memory;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use store::PriceStore;
