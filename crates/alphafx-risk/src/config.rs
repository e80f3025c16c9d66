//! Risk configuration.

use crate::error::{RiskError, RiskResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Whether the volume ledger is shared across pairs or kept per pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerScope {
    /// One ledger for the whole engine (every admitted trade debits it).
    #[default]
    Global,
    /// An independent ledger per pair.
    PerPair,
}

/// Trade admission limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Cumulative traded volume ceiling. Default: 10,000,000 units.
    #[serde(default = "default_volume_cap")]
    pub volume_cap: Decimal,
    /// Fixed volume per admitted trade. Default: 100,000 units.
    #[serde(default = "default_trade_size")]
    pub trade_size: Decimal,
    /// Ledger scope. Default: global.
    #[serde(default)]
    pub ledger_scope: LedgerScope,
}

fn default_volume_cap() -> Decimal {
    dec!(10000000)
}

fn default_trade_size() -> Decimal {
    dec!(100000)
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            volume_cap: default_volume_cap(),
            trade_size: default_trade_size(),
            ledger_scope: LedgerScope::default(),
        }
    }
}

impl RiskConfig {
    /// Validate limits.
    pub fn validate(&self) -> RiskResult<()> {
        if self.volume_cap <= Decimal::ZERO {
            return Err(RiskError::NonPositiveCap(self.volume_cap));
        }
        if self.trade_size <= Decimal::ZERO {
            return Err(RiskError::NonPositiveTradeSize(self.trade_size));
        }
        Ok(())
    }
}
