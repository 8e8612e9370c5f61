//! # cashgame-types
//!
//! Shared types, errors, and configuration for the **cashgame** ledger.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`PlayerId`], [`BuyInId`], [`GameCode`]
//! - **Settlement model**: [`PlayerResult`], [`SettlementTransfer`], [`SettlementSummary`]
//! - **Ledger model**: [`Player`], [`BuyIn`], [`FinalCashout`], [`LedgerSummary`]
//! - **Configuration**: [`SettlementConfig`], [`LedgerConfig`]
//! - **Errors**: [`LedgerError`] with `CG_ERR_` prefix codes
//! - **Constants**: game code alphabet, name limits, default tolerances

pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod ledger;
pub mod settlement;

// Re-export all primary types at crate root for ergonomic imports:
//   use cashgame_types::{PlayerId, PlayerResult, SettlementTransfer, ...};

pub use config::*;
pub use error::*;
pub use ids::*;
pub use ledger::*;
pub use settlement::*;

// Constants are accessed via `cashgame_types::constants::FOO`
// (not re-exported to avoid name collisions).
