//! Trade execution bookkeeping.
//!
//! On admission the executor appends a `TradeRecord` to the append-only
//! trade log; the volume ledger was debited when the signal was
//! admitted. Durable storage of the record is a separate, best-effort
//! concern owned by the caller.

pub mod executor;
pub mod ids;

pub use executor::TradeExecutor;
pub use ids::TradeIds;
