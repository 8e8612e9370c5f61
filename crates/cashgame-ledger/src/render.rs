//! Human-readable settlement output.
//!
//! Transfer lines look like `Bob → Alice: ฿1,250`, one per line, in the
//! order the engine emitted them.

use std::collections::HashMap;

use cashgame_types::{PlayerId, PlayerResult, SettlementSummary, SettlementTransfer};
use rust_decimal::Decimal;

use crate::format_currency;

fn display_name(names: &HashMap<PlayerId, String>, id: PlayerId) -> String {
    names.get(&id).cloned().unwrap_or_else(|| id.to_string())
}

/// `"<from> → <to>: <amount>"`. Unknown ids render as the raw id.
#[must_use]
pub fn render_transfer(transfer: &SettlementTransfer, names: &HashMap<PlayerId, String>) -> String {
    format!(
        "{} → {}: {}",
        display_name(names, transfer.from_id),
        display_name(names, transfer.to_id),
        format_currency(transfer.amount)
    )
}

/// All transfers, newline separated. Empty plan gives an empty string.
#[must_use]
pub fn render_transfers(
    transfers: &[SettlementTransfer],
    names: &HashMap<PlayerId, String>,
) -> String {
    transfers
        .iter()
        .map(|t| render_transfer(t, names))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Totals shown alongside a settlement plan. Totals saturate at the
/// `Decimal` bounds.
#[must_use]
pub fn settlement_summary(
    results: &[PlayerResult],
    transfers: &[SettlementTransfer],
) -> SettlementSummary {
    let total_owed = results
        .iter()
        .filter(|r| r.net < Decimal::ZERO)
        .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.net.abs()));
    let total_won = results
        .iter()
        .filter(|r| r.net > Decimal::ZERO)
        .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.net));
    SettlementSummary {
        total_owed,
        total_won,
        transfer_count: transfers.len(),
    }
}
