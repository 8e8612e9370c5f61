//! Input rules for ledger writes.
//!
//! Every mutating [`GameLedger`](crate::GameLedger) operation runs its input
//! through one of these before touching state.

use cashgame_types::{GameCode, LedgerError, Result, constants};
use rust_decimal::Decimal;

/// Validate a game code. Case-insensitive; returns the canonical form.
pub fn game_code(input: &str) -> Result<GameCode> {
    GameCode::parse(input)
}

/// Validate a player name and return it trimmed.
///
/// # Errors
/// Returns [`LedgerError::InvalidPlayerName`] if the trimmed name is empty
/// or longer than [`constants::MAX_PLAYER_NAME_LEN`] characters.
pub fn player_name(input: &str) -> Result<String> {
    let name = input.trim();
    if name.is_empty() {
        return Err(LedgerError::InvalidPlayerName {
            reason: "name is required".into(),
        });
    }
    let len = name.chars().count();
    if len > constants::MAX_PLAYER_NAME_LEN {
        return Err(LedgerError::InvalidPlayerName {
            reason: format!(
                "name is {len} characters, limit is {}",
                constants::MAX_PLAYER_NAME_LEN
            ),
        });
    }
    Ok(name.to_string())
}

/// Buy-ins must be strictly positive.
pub fn buy_in_amount(amount: Decimal) -> Result<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount {
            amount,
            reason: "buy-in must be positive".into(),
        });
    }
    within_storage_bounds(amount)
}

/// Final cashouts may be zero (busted) but never negative.
pub fn final_amount(amount: Decimal) -> Result<Decimal> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(LedgerError::InvalidAmount {
            amount,
            reason: "final cashout must be non-negative".into(),
        });
    }
    within_storage_bounds(amount)
}

/// Recorded amounts fit `decimal(10,2)`: at most [`constants::MAX_AMOUNT`]
/// and [`constants::AMOUNT_SCALE`] fractional digits. Trailing zeros do not
/// count, so `100.500` passes.
fn within_storage_bounds(amount: Decimal) -> Result<Decimal> {
    if amount > constants::MAX_AMOUNT {
        return Err(LedgerError::InvalidAmount {
            amount,
            reason: format!("limit is {}", constants::MAX_AMOUNT),
        });
    }
    if amount.normalize().scale() > constants::AMOUNT_SCALE {
        return Err(LedgerError::InvalidAmount {
            amount,
            reason: format!(
                "at most {} decimal places allowed",
                constants::AMOUNT_SCALE
            ),
        });
    }
    Ok(amount)
}
