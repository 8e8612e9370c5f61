//! Configuration types for the settlement engine and game ledger.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants;

/// Settlement engine tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementConfig {
    /// Remaining balances at or below this magnitude count as zero.
    pub epsilon: Decimal,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            epsilon: constants::DEFAULT_SETTLEMENT_EPSILON,
        }
    }
}

/// Per-game ledger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub settlement: SettlementConfig,
    /// Largest gap between total buy-ins and total cashouts that still
    /// counts as balanced.
    pub discrepancy_tolerance: Decimal,
    /// Attempts at drawing an unused game code.
    pub max_code_attempts: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            settlement: SettlementConfig::default(),
            discrepancy_tolerance: constants::DEFAULT_DISCREPANCY_TOLERANCE,
            max_code_attempts: constants::DEFAULT_MAX_CODE_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settlement_config_defaults() {
        let cfg = SettlementConfig::default();
        assert_eq!(cfg.epsilon, Decimal::new(1, 9));
    }

    #[test]
    fn ledger_config_defaults() {
        let cfg = LedgerConfig::default();
        assert_eq!(cfg.discrepancy_tolerance, Decimal::new(1, 2));
        assert_eq!(cfg.max_code_attempts, 100);
    }

    #[test]
    fn ledger_config_serde_roundtrip() {
        let cfg = LedgerConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: LedgerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.settlement, back.settlement);
        assert_eq!(cfg.discrepancy_tolerance, back.discrepancy_tolerance);
        assert_eq!(cfg.max_code_attempts, back.max_code_attempts);
    }
}
