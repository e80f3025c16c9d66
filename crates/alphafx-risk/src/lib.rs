//! Trade admission governance.
//!
//! Turns crossover signals into admit/reject decisions:
//! - `VolumeLedger`: cumulative traded volume against a hard ceiling
//! - `PositionGovernor`: per-pair FLAT/LONG/CLOSED state machine
//! - `Decision` / `RejectReason`: the admission outcome taxonomy
//!
//! Nothing here is fatal: every disallowed trade is a `Reject` value,
//! and ingestion continues regardless.

pub mod config;
pub mod error;
pub mod governor;
pub mod ledger;

pub use config::{LedgerScope, RiskConfig};
pub use error::{RiskError, RiskResult};
pub use governor::{Admitted, Decision, PositionGovernor, RejectReason};
pub use ledger::{LedgerHandle, VolumeLedger};
