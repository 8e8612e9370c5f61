//! # cashgame-ledger
//!
//! In-memory ledger for poker cash games: the collaborator that feeds the
//! settlement engine and renders its output.
//!
//! ## Architecture
//!
//! 1. **GameRegistry**: scopes games by short [`GameCode`](cashgame_types::GameCode)
//! 2. **GameLedger**: players, buy-ins, and final cashouts for one game;
//!    derives each player's net result
//! 3. **validate**: name, code, and amount rules applied on every write
//! 4. **format / render**: baht formatting and human-readable transfer lines
//!
//! ## Flow
//!
//! ```text
//! GameRegistry.create_game() → GameLedger.add_player() / add_buy_in() / set_final()
//!     → GameLedger.player_results() → calculate_settlement() → render_transfers()
//! ```

pub mod format;
pub mod game;
pub mod registry;
pub mod render;
pub mod validate;

pub use format::{format_currency, format_net, parse_currency};
pub use game::{GameLedger, GameSnapshot};
pub use registry::{GameRegistry, generate_game_code};
pub use render::{render_transfer, render_transfers, settlement_summary};
