//! Settlement input and output types.
//!
//! A [`PlayerResult`] is one player's net outcome for a game. The settlement
//! engine turns a list of them into [`SettlementTransfer`]s: payment
//! instructions from debtors to creditors.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{LedgerError, PlayerId, Result};

/// A player's net result: final cashout minus total buy-ins.
///
/// Positive means the player is owed money (creditor), negative means the
/// player owes money (debtor), zero means the player is already settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResult {
    pub player_id: PlayerId,
    pub net: Decimal,
}

impl PlayerResult {
    #[must_use]
    pub fn new(player_id: PlayerId, net: Decimal) -> Self {
        Self { player_id, net }
    }

    /// Build a result from a floating-point net.
    ///
    /// # Errors
    /// - [`LedgerError::NonFiniteAmount`] for NaN or infinite input
    /// - [`LedgerError::AmountOutOfRange`] for finite values beyond `Decimal`
    pub fn try_from_f64(player_id: PlayerId, value: f64) -> Result<Self> {
        let net = Decimal::try_from(value).map_err(|_| {
            if value.is_finite() {
                LedgerError::AmountOutOfRange { value }
            } else {
                LedgerError::NonFiniteAmount { value }
            }
        })?;
        Ok(Self { player_id, net })
    }

    #[must_use]
    pub fn is_creditor(&self) -> bool {
        self.net.is_sign_positive() && !self.net.is_zero()
    }

    #[must_use]
    pub fn is_debtor(&self) -> bool {
        self.net.is_sign_negative() && !self.net.is_zero()
    }
}

#[cfg(feature = "test-helpers")]
impl PlayerResult {
    /// Result with a fixed, readable id: every byte of the uuid is `tag`.
    #[must_use]
    pub fn fixture(tag: u8, net: Decimal) -> Self {
        Self::new(PlayerId::from_bytes([tag; 16]), net)
    }
}

/// One payment instruction: `from_id` pays `amount` to `to_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementTransfer {
    /// The debtor.
    pub from_id: PlayerId,
    /// The creditor.
    pub to_id: PlayerId,
    /// Always strictly positive.
    pub amount: Decimal,
}

impl fmt::Display for SettlementTransfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from_id, self.to_id, self.amount)
    }
}

/// Totals shown next to a settlement plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementSummary {
    /// Sum of every debtor's loss.
    pub total_owed: Decimal,
    /// Sum of every creditor's gain.
    pub total_won: Decimal,
    pub transfer_count: usize,
}
