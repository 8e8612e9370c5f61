//! System-wide constants for the cashgame ledger.

use rust_decimal::Decimal;

/// Number of characters in a game code.
pub const GAME_CODE_LEN: usize = 5;

/// Characters a game code is drawn from. Codes are stored upper-case.
pub const GAME_CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Attempts at drawing an unused game code before giving up.
pub const DEFAULT_MAX_CODE_ATTEMPTS: usize = 100;

/// Maximum player name length, in characters, after trimming.
pub const MAX_PLAYER_NAME_LEN: usize = 50;

/// Largest buy-in or final cashout accepted (99,999,999.99).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Most fractional digits a recorded amount may carry.
pub const AMOUNT_SCALE: u32 = 2;

/// Balances at or below this magnitude count as settled (1e-9).
pub const DEFAULT_SETTLEMENT_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 9);

/// Largest gap between total buy-ins and total cashouts that still allows
/// settlement (0.01).
pub const DEFAULT_DISCREPANCY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Currency symbol used when rendering amounts (Thai baht).
pub const CURRENCY_SYMBOL: &str = "฿";

/// Maximum fraction digits shown when rendering amounts.
pub const CURRENCY_FRACTION_DIGITS: u32 = 2;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
