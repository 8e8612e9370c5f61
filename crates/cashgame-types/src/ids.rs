//! Identifiers used throughout the cashgame ledger.
//!
//! Player and buy-in IDs use UUIDv7 for time-ordered sorting. Games are
//! addressed by a short human-typed [`GameCode`].

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerError, Result, constants};

// ---------------------------------------------------------------------------
// PlayerId
// ---------------------------------------------------------------------------

/// Unique identifier for a player seated in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// BuyInId
// ---------------------------------------------------------------------------

/// Unique identifier for a single buy-in entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct BuyInId(pub Uuid);

impl BuyInId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for BuyInId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BuyInId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buyin:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// GameCode
// ---------------------------------------------------------------------------

/// Short code players type to join a game (e.g. `K7Q2X`).
///
/// Always stored upper-case, so two codes that differ only by case are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameCode(String);

impl GameCode {
    /// Parse a user-supplied code. Input is upper-cased before validation.
    ///
    /// # Errors
    /// Returns [`LedgerError::InvalidGameCode`] if the code is not exactly
    /// [`constants::GAME_CODE_LEN`] characters from `A-Z0-9`.
    pub fn parse(input: &str) -> Result<Self> {
        let code = input.trim().to_ascii_uppercase();
        if code.chars().count() != constants::GAME_CODE_LEN {
            return Err(LedgerError::InvalidGameCode {
                code,
                reason: format!("must be {} characters", constants::GAME_CODE_LEN),
            });
        }
        if !code.bytes().all(|b| constants::GAME_CODE_ALPHABET.contains(&b)) {
            return Err(LedgerError::InvalidGameCode {
                code,
                reason: "must contain only letters and numbers".into(),
            });
        }
        Ok(Self(code))
    }

    /// Build a code from alphabet indices. Indices wrap modulo the alphabet size.
    #[must_use]
    pub fn from_indices(indices: [usize; constants::GAME_CODE_LEN]) -> Self {
        let alphabet = constants::GAME_CODE_ALPHABET;
        let code = indices
            .iter()
            .map(|&i| char::from(alphabet[i % alphabet.len()]))
            .collect();
        Self(code)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GameCode {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<GameCode> for String {
    fn from(code: GameCode) -> Self {
        code.0
    }
}

impl fmt::Display for GameCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
