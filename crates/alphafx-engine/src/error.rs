//! Engine error types.
//!
//! Nothing in the pipeline is fatal to the process. The only errors a
//! caller sees are rejections of individual operations; everything
//! downstream of a validated tick is a decision value or a logged,
//! best-effort failure.

use alphafx_core::{CoreError, Pair};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The tick was rejected at the ingestion boundary; pipeline state
    /// is untouched.
    #[error("Malformed tick: {0}")]
    MalformedTick(#[from] CoreError),

    #[error("Signal configuration: {0}")]
    Signal(#[from] alphafx_signal::SignalError),

    #[error("Risk configuration: {0}")]
    Risk(#[from] alphafx_risk::RiskError),

    /// The pair's worker task has stopped; only possible during shutdown.
    #[error("Worker for pair {0} is not running")]
    PairUnavailable(Pair),
}

pub type EngineResult<T> = Result<T, EngineError>;
