//! Ledger records for a single game.
//!
//! A game has players; each player has zero or more buy-ins and at most one
//! final cashout. Net results are derived from these, never stored.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BuyInId, PlayerId};

/// A player seated in a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    /// Trimmed display name.
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Chips bought by a player. Always positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyIn {
    pub id: BuyInId,
    pub player_id: PlayerId,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// The amount a player cashed out with at the end of the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalCashout {
    pub player_id: PlayerId,
    /// Zero or more.
    pub amount: Decimal,
    pub recorded_at: DateTime<Utc>,
}

/// Game-wide totals used to decide whether the game can be settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub total_buy_ins: Decimal,
    /// Sum of recorded cashouts; missing cashouts count as zero.
    pub total_finals: Decimal,
    /// `|total_finals - total_buy_ins|`.
    pub discrepancy: Decimal,
    pub all_finals_entered: bool,
    /// Largest discrepancy that still counts as balanced.
    pub tolerance: Decimal,
}

impl LedgerSummary {
    /// Whether the discrepancy is within tolerance.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.discrepancy <= self.tolerance
    }

    /// Every player has cashed out and the chips add up.
    #[must_use]
    pub fn is_ready_to_settle(&self) -> bool {
        self.all_finals_entered && self.is_balanced()
    }
}
