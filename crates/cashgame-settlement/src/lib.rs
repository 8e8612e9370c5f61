//! # cashgame-settlement
//!
//! **Settlement engine** for the cashgame ledger: turns per-player net
//! results into payment instructions that zero every balance.
//!
//! ## Architecture
//!
//! - **Engine**: greedy largest-debtor / largest-creditor matching
//!   ([`calculate_settlement`])
//! - **Conservation**: zero-sum checks and transfer application
//!   ([`verify_zero_sum`], [`apply_transfers`], [`verify_settled`])
//! - **Determinism**: SHA-256 digest over a settlement plan
//!   ([`compute_plan_digest`])
//!
//! Everything here is pure: no I/O, no shared state, and caller input is
//! never mutated.

pub mod conservation;
pub mod determinism;
pub mod engine;

pub use conservation::{apply_transfers, net_imbalance, verify_settled, verify_zero_sum};
pub use determinism::{compute_plan_digest, plan_digest_hex, verify_plan_digest};
pub use engine::{calculate_settlement, calculate_settlement_with};
