//! Greedy settlement engine.
//!
//! Algorithm:
//! 1. Split results into creditors (`net > ε`) and debtors (`net < -ε`);
//!    near-zero results need no transfer
//! 2. Sort both sides by magnitude, largest first (stable: ties keep input order)
//! 3. Walk both lists with one cursor each, paying
//!    `min(creditor.remaining, debtor.remaining)` from debtor to creditor
//! 4. Advance whichever cursor's remaining balance dropped to within ε
//!
//! Every iteration drains at least one side, so the loop runs at most
//! `creditors + debtors` times.

use cashgame_types::{PlayerId, PlayerResult, SettlementConfig, SettlementTransfer};
use rust_decimal::Decimal;

/// Working copy of one side's outstanding balance.
struct Outstanding {
    player_id: PlayerId,
    remaining: Decimal,
}

/// Compute settlement transfers with the default [`SettlementConfig`].
#[must_use]
pub fn calculate_settlement(results: &[PlayerResult]) -> Vec<SettlementTransfer> {
    calculate_settlement_with(results, &SettlementConfig::default())
}

/// Compute settlement transfers, treating balances within `config.epsilon`
/// of zero as settled.
///
/// Input is expected to be zero-sum. If it is not, whatever cannot be
/// matched is left unsettled and a warning is logged; use
/// [`crate::verify_zero_sum`] first to reject such input instead.
#[must_use]
pub fn calculate_settlement_with(
    results: &[PlayerResult],
    config: &SettlementConfig,
) -> Vec<SettlementTransfer> {
    let epsilon = config.epsilon.abs();

    let mut creditors: Vec<Outstanding> = results
        .iter()
        .filter(|r| r.net > epsilon)
        .map(|r| Outstanding {
            player_id: r.player_id,
            remaining: r.net,
        })
        .collect();

    let mut debtors: Vec<Outstanding> = results
        .iter()
        .filter(|r| r.net < -epsilon)
        .map(|r| Outstanding {
            player_id: r.player_id,
            remaining: r.net.abs(),
        })
        .collect();

    // `sort_by` is stable; equal balances stay in input order.
    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    let imbalance = crate::net_imbalance(results);
    if imbalance.abs() > epsilon {
        tracing::warn!(
            %imbalance,
            players = results.len(),
            "Settlement input is not zero-sum; remainder stays unsettled"
        );
    }

    let mut transfers = Vec::with_capacity(creditors.len() + debtors.len());
    let mut creditor_idx = 0;
    let mut debtor_idx = 0;

    while creditor_idx < creditors.len() && debtor_idx < debtors.len() {
        let creditor = &mut creditors[creditor_idx];
        let debtor = &mut debtors[debtor_idx];

        let amount = creditor.remaining.min(debtor.remaining);

        tracing::debug!(
            from = %debtor.player_id,
            to = %creditor.player_id,
            %amount,
            "Transfer planned"
        );

        transfers.push(SettlementTransfer {
            from_id: debtor.player_id,
            to_id: creditor.player_id,
            amount,
        });

        creditor.remaining -= amount;
        debtor.remaining -= amount;

        if creditor.remaining <= epsilon {
            creditor_idx += 1;
        }
        if debtor.remaining <= epsilon {
            debtor_idx += 1;
        }
    }

    tracing::info!(
        players = results.len(),
        creditors = creditors.len(),
        debtors = debtors.len(),
        transfers = transfers.len(),
        "Settlement computed"
    );

    transfers
}
