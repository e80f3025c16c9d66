//! Cumulative traded-volume ledger.

use alphafx_core::Volume;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::warn;

/// Running total of admitted volume against a hard ceiling.
///
/// The total only ever increases. Once it reaches the cap, `at_cap`
/// stays true for the remainder of the run; there is no reset.
#[derive(Debug)]
pub struct VolumeLedger {
    cumulative: Volume,
    cap: Volume,
}

impl VolumeLedger {
    pub fn new(cap: Volume) -> Self {
        Self {
            cumulative: Volume::ZERO,
            cap,
        }
    }

    /// Create a ledger pre-loaded with volume already traded (e.g. from
    /// the persistence collaborator at startup, so the cap survives
    /// process restarts).
    pub fn seeded(cap: Volume, initial: Volume) -> Self {
        if initial >= cap {
            warn!(%initial, %cap, "Ledger seeded at or over cap, trading disabled for this run");
        }
        Self {
            cumulative: initial,
            cap,
        }
    }

    /// Whether admissions must stop.
    pub fn at_cap(&self) -> bool {
        self.cumulative >= self.cap
    }

    /// Check the cap and debit `volume` as one operation.
    ///
    /// Returns false, debiting nothing, when the ledger is already at
    /// its ceiling. Admission must go through this rather than a
    /// separate `at_cap` check followed by `record`: the ledger may be
    /// shared across pair workers, and a split check-then-debit lets
    /// two workers both pass the check on the last unit of headroom.
    pub fn try_debit(&mut self, volume: Volume) -> bool {
        if self.at_cap() {
            return false;
        }
        self.cumulative = self.cumulative + volume;
        true
    }

    /// Debit without a cap check, for pre-admitted volume (seeding).
    pub fn record(&mut self, volume: Volume) {
        self.cumulative = self.cumulative + volume;
    }

    pub fn cumulative(&self) -> Volume {
        self.cumulative
    }

    pub fn cap(&self) -> Volume {
        self.cap
    }
}

/// A pair worker's view of its ledger.
///
/// Global scope shares one ledger across all pair workers behind a
/// mutex; per-pair scope gives the worker exclusive ownership and the
/// lock-free path.
#[derive(Debug)]
pub enum LedgerHandle {
    Own(VolumeLedger),
    Shared(Arc<Mutex<VolumeLedger>>),
}

impl LedgerHandle {
    pub fn at_cap(&self) -> bool {
        match self {
            Self::Own(ledger) => ledger.at_cap(),
            Self::Shared(ledger) => ledger.lock().at_cap(),
        }
    }

    pub fn record(&mut self, volume: Volume) {
        match self {
            Self::Own(ledger) => ledger.record(volume),
            Self::Shared(ledger) => ledger.lock().record(volume),
        }
    }

    /// Check-and-debit under a single lock acquisition for the shared
    /// scope, so concurrent workers cannot both take the last headroom.
    pub fn try_debit(&mut self, volume: Volume) -> bool {
        match self {
            Self::Own(ledger) => ledger.try_debit(volume),
            Self::Shared(ledger) => ledger.lock().try_debit(volume),
        }
    }

    pub fn cumulative(&self) -> Volume {
        match self {
            Self::Own(ledger) => ledger.cumulative(),
            Self::Shared(ledger) => ledger.lock().cumulative(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cap_boundary() {
        // cap=200,000, trade_size=100,000: two admissions fill the cap
        // exactly, the third is refused and debits nothing.
        let mut ledger = VolumeLedger::new(Volume::new(dec!(200000)));
        let size = Volume::new(dec!(100000));

        assert!(ledger.try_debit(size));
        assert_eq!(ledger.cumulative().inner(), dec!(100000));
        assert!(!ledger.at_cap());

        assert!(ledger.try_debit(size));
        assert_eq!(ledger.cumulative().inner(), dec!(200000));
        assert!(ledger.at_cap());

        assert!(!ledger.try_debit(size));
        assert_eq!(ledger.cumulative().inner(), dec!(200000));
    }

    #[test]
    fn test_seeded_ledger() {
        let ledger = VolumeLedger::seeded(Volume::new(dec!(500000)), Volume::new(dec!(450000)));
        assert!(!ledger.at_cap());

        let ledger = VolumeLedger::seeded(Volume::new(dec!(500000)), Volume::new(dec!(500000)));
        assert!(ledger.at_cap());
    }

    #[test]
    fn test_shared_handle_sees_other_debits() {
        let shared = Arc::new(Mutex::new(VolumeLedger::new(Volume::new(dec!(150000)))));
        let mut a = LedgerHandle::Shared(Arc::clone(&shared));
        let b = LedgerHandle::Shared(shared);

        a.record(Volume::new(dec!(100000)));
        assert!(!b.at_cap());
        a.record(Volume::new(dec!(100000)));
        assert!(b.at_cap());
        assert_eq!(b.cumulative().inner(), dec!(200000));
    }

    #[test]
    fn test_shared_handle_last_headroom_goes_to_one_debit() {
        // Two handles over one ledger with a single trade of headroom:
        // exactly one try_debit wins, the loser debits nothing.
        let shared = Arc::new(Mutex::new(VolumeLedger::seeded(
            Volume::new(dec!(200000)),
            Volume::new(dec!(100000)),
        )));
        let mut a = LedgerHandle::Shared(Arc::clone(&shared));
        let mut b = LedgerHandle::Shared(shared);
        let size = Volume::new(dec!(100000));

        assert!(a.try_debit(size));
        assert!(!b.try_debit(size));
        assert_eq!(b.cumulative().inner(), dec!(200000));
    }
}
