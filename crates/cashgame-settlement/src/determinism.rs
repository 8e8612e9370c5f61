//! Settlement plan fingerprints.
//!
//! The engine is deterministic: the same results in the same order always
//! produce the same transfers. The plan digest is a SHA-256 over the
//! transfer list, so collaborators that poll game state can tell whether
//! the plan changed without comparing full payloads.

use cashgame_types::SettlementTransfer;
use sha2::{Digest, Sha256};

/// Compute the digest of a settlement plan.
///
/// Depends on transfer order, both player ids, and the amount's value
/// (`25.5` and `25.50` hash the same).
#[must_use]
pub fn compute_plan_digest(transfers: &[SettlementTransfer]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"cashgame:settlement_plan:v1:");
    hasher.update((transfers.len() as u64).to_le_bytes());

    for transfer in transfers {
        hasher.update(transfer.from_id.0.as_bytes());
        hasher.update(transfer.to_id.0.as_bytes());
        let amount = transfer.amount.normalize().to_string();
        hasher.update((amount.len() as u64).to_le_bytes());
        hasher.update(amount.as_bytes());
    }

    let result = hasher.finalize();
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&result);
    digest
}

/// Hex-encoded [`compute_plan_digest`].
#[must_use]
pub fn plan_digest_hex(transfers: &[SettlementTransfer]) -> String {
    hex::encode(compute_plan_digest(transfers))
}

/// Recompute the digest and compare it with `expected`.
#[must_use]
pub fn verify_plan_digest(transfers: &[SettlementTransfer], expected: &[u8; 32]) -> bool {
    compute_plan_digest(transfers) == *expected
}
