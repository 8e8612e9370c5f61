//! Zero-sum conservation checks.
//!
//! Mathematical invariant for a settled game:
//! ```text
//! Σ(net) == 0   and   ∀ player: net + Σ(paid) - Σ(received) == 0
//! ```
//!
//! Money only moves between players, so a valid ledger is zero-sum and a
//! valid settlement plan leaves every player at zero.

use cashgame_types::{LedgerError, PlayerResult, Result, SettlementTransfer};
use rust_decimal::Decimal;

/// Sum of all net results. Zero for a consistent ledger.
///
/// Saturates instead of overflowing on absurd input.
#[must_use]
pub fn net_imbalance(results: &[PlayerResult]) -> Decimal {
    results
        .iter()
        .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.net))
}

/// Verify that net results sum to zero within `tolerance`.
///
/// # Errors
/// Returns [`LedgerError::Imbalanced`] if `|Σ(net)| > tolerance`.
pub fn verify_zero_sum(results: &[PlayerResult], tolerance: Decimal) -> Result<()> {
    let imbalance = net_imbalance(results);
    if imbalance.abs() > tolerance.abs() {
        return Err(LedgerError::Imbalanced { imbalance });
    }
    Ok(())
}

/// Apply transfers to the original net results and return what each player
/// still has outstanding, in input order.
///
/// A debtor's balance rises by what they pay; a creditor's falls by what
/// they receive.
///
/// # Errors
/// Returns [`LedgerError::UnknownPlayer`] if a transfer names a player that
/// is not in `results`.
pub fn apply_transfers(
    results: &[PlayerResult],
    transfers: &[SettlementTransfer],
) -> Result<Vec<PlayerResult>> {
    let mut residual = results.to_vec();

    for transfer in transfers {
        let from = residual
            .iter_mut()
            .find(|r| r.player_id == transfer.from_id)
            .ok_or(LedgerError::UnknownPlayer(transfer.from_id))?;
        from.net = from.net.saturating_add(transfer.amount);

        let to = residual
            .iter_mut()
            .find(|r| r.player_id == transfer.to_id)
            .ok_or(LedgerError::UnknownPlayer(transfer.to_id))?;
        to.net = to.net.saturating_sub(transfer.amount);
    }

    Ok(residual)
}

/// Verify that `transfers` bring every player in `results` to zero, within
/// `epsilon`.
///
/// # Errors
/// - `UnknownPlayer` if a transfer names a player not in `results`
/// - `UnsettledBalance` for the first player left with a balance
pub fn verify_settled(
    results: &[PlayerResult],
    transfers: &[SettlementTransfer],
    epsilon: Decimal,
) -> Result<()> {
    let residual = apply_transfers(results, transfers)?;
    if let Some(open) = residual.iter().find(|r| r.net.abs() > epsilon.abs()) {
        return Err(LedgerError::UnsettledBalance {
            player_id: open.player_id,
            remaining: open.net,
        });
    }
    Ok(())
}
