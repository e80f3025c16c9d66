//! Per-pair position state machine and trade admission.

use crate::ledger::LedgerHandle;
use alphafx_core::{PositionState, Price, Side, Volume};
use rust_decimal::Decimal;
use tracing::debug;

/// Why a signal was not admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No crossover fired on this tick. A null decision, not an error.
    NoSignal,
    /// The volume ledger is at or over its ceiling. Latched for the run.
    CapReached,
    /// The signal contradicts the current position (BUY while long,
    /// SELL while not long).
    NoOpForCurrentPosition,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSignal => write!(f, "no_signal"),
            Self::CapReached => write!(f, "cap_reached"),
            Self::NoOpForCurrentPosition => write!(f, "no_op_for_current_position"),
        }
    }
}

/// An admitted trade, ready for the executor to record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admitted {
    pub side: Side,
    pub volume: Volume,
    /// Position state after the transition was applied.
    pub resulting_position: PositionState,
    /// Realized profit and loss; present only when a long was closed.
    pub realized_pnl: Option<Decimal>,
}

/// Admission outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Admit(Admitted),
    Reject(RejectReason),
}

/// Position state machine for one pair.
///
/// A BUY opens a long when none is held; a SELL only closes an existing
/// long (moving to `Closed`, a flat-equivalent state). SELL never opens
/// a short. Transitions are applied as part of `decide` so the state
/// the decision was based on and the state it produces are one step.
#[derive(Debug)]
pub struct PositionGovernor {
    position: PositionState,
    entry_price: Option<Price>,
    trade_size: Volume,
}

impl PositionGovernor {
    pub fn new(trade_size: Volume) -> Self {
        Self {
            position: PositionState::Flat,
            entry_price: None,
            trade_size,
        }
    }

    /// Decide whether a signal becomes a trade, applying the position
    /// transition and the ledger debit on admission.
    ///
    /// Rules are evaluated in order: no signal, then the cap, then the
    /// position. The ledger may be shared with workers for other pairs,
    /// so the authoritative cap check is the `try_debit` at admission:
    /// check and debit happen under one lock, and a concurrent worker
    /// taking the last headroom turns this admission into `CapReached`.
    /// The early `at_cap` check only keeps the reject-reason ordering
    /// for signals that would be position no-ops anyway.
    pub fn decide(
        &mut self,
        signal: Option<Side>,
        price: Price,
        ledger: &mut LedgerHandle,
    ) -> Decision {
        let side = match signal {
            Some(side) => side,
            None => return Decision::Reject(RejectReason::NoSignal),
        };

        if ledger.at_cap() {
            debug!(cumulative = %ledger.cumulative(), "Trade rejected, volume cap reached");
            return Decision::Reject(RejectReason::CapReached);
        }

        match side {
            Side::Buy if !self.position.is_long() => {
                if !ledger.try_debit(self.trade_size) {
                    debug!(cumulative = %ledger.cumulative(), "Trade rejected, volume cap reached");
                    return Decision::Reject(RejectReason::CapReached);
                }
                self.position = PositionState::Long;
                self.entry_price = Some(price);
                Decision::Admit(Admitted {
                    side,
                    volume: self.trade_size,
                    resulting_position: self.position,
                    realized_pnl: None,
                })
            }
            Side::Sell if self.position.is_long() => {
                if !ledger.try_debit(self.trade_size) {
                    debug!(cumulative = %ledger.cumulative(), "Trade rejected, volume cap reached");
                    return Decision::Reject(RejectReason::CapReached);
                }
                let realized = self
                    .entry_price
                    .map(|entry| price.inner() - entry.inner());
                self.position = PositionState::Closed;
                self.entry_price = None;
                Decision::Admit(Admitted {
                    side,
                    volume: self.trade_size,
                    resulting_position: self.position,
                    realized_pnl: realized,
                })
            }
            _ => Decision::Reject(RejectReason::NoOpForCurrentPosition),
        }
    }

    pub fn position(&self) -> PositionState {
        self.position
    }

    pub fn entry_price(&self) -> Option<Price> {
        self.entry_price
    }

    /// Unrealized profit and loss for an open long.
    pub fn open_pnl(&self, current_price: Price) -> Option<Decimal> {
        if !self.position.is_long() {
            return None;
        }
        self.entry_price
            .map(|entry| current_price.inner() - entry.inner())
    }
}
