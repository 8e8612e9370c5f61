//! Error types for the cashgame ledger.
//!
//! All errors use the `CG_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Validation errors
//! - 2xx: Ledger errors
//! - 3xx: Settlement errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{BuyInId, PlayerId};

/// Central error enum for all cashgame operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // =================================================================
    // Validation Errors (1xx)
    // =================================================================
    /// The game code is malformed.
    #[error("CG_ERR_100: Invalid game code {code:?}: {reason}")]
    InvalidGameCode { code: String, reason: String },

    /// The player name is empty or too long.
    #[error("CG_ERR_101: Invalid player name: {reason}")]
    InvalidPlayerName { reason: String },

    /// An amount is out of range for the operation.
    #[error("CG_ERR_102: Invalid amount {amount}: {reason}")]
    InvalidAmount { amount: Decimal, reason: String },

    /// A floating-point amount was NaN or infinite.
    #[error("CG_ERR_103: Amount is not a finite number: {value}")]
    NonFiniteAmount { value: f64 },

    /// A floating-point amount is finite but too large for `Decimal`.
    #[error("CG_ERR_104: Amount out of range: {value}")]
    AmountOutOfRange { value: f64 },

    // =================================================================
    // Ledger Errors (2xx)
    // =================================================================
    /// The player is not seated in this game.
    #[error("CG_ERR_200: Player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// The buy-in does not exist for this player.
    #[error("CG_ERR_201: Buy-in not found: {0}")]
    BuyInNotFound(BuyInId),

    /// No game is registered under this code.
    #[error("CG_ERR_202: Game not found: {0}")]
    GameNotFound(String),

    /// Every attempt at drawing an unused game code collided.
    #[error("CG_ERR_203: Failed to generate unique game code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },

    /// A snapshot lists the same player twice.
    #[error("CG_ERR_204: Duplicate player: {0}")]
    DuplicatePlayer(PlayerId),

    /// A snapshot lists the same buy-in twice.
    #[error("CG_ERR_205: Duplicate buy-in: {0}")]
    DuplicateBuyIn(BuyInId),

    /// A snapshot lists more than one final cashout for a player.
    #[error("CG_ERR_206: Duplicate final cashout for player {0}")]
    DuplicateFinal(PlayerId),

    /// Summing ledger amounts left the representable range.
    #[error("CG_ERR_207: Amount overflow while computing {context}")]
    AmountOverflow { context: &'static str },

    // =================================================================
    // Settlement Errors (3xx)
    // =================================================================
    /// Net results do not sum to zero.
    #[error("CG_ERR_300: Net results are not zero-sum: imbalance {imbalance}")]
    Imbalanced { imbalance: Decimal },

    /// A transfer references a player absent from the results.
    #[error("CG_ERR_301: Transfer references unknown player: {0}")]
    UnknownPlayer(PlayerId),

    /// A balance is still outstanding after applying all transfers.
    #[error("CG_ERR_302: Player {player_id} still has {remaining} outstanding")]
    UnsettledBalance {
        player_id: PlayerId,
        remaining: Decimal,
    },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, LedgerError>;
