//! Game registry: games scoped by short code.
//!
//! New codes are drawn at random from `A-Z0-9` and retried on collision,
//! up to `max_code_attempts` times.

use std::collections::HashMap;

use cashgame_types::{GameCode, LedgerConfig, LedgerError, Result, constants};
use rand::Rng;

use crate::{GameLedger, validate};

/// Draw a random game code. Does not check for collisions.
pub fn generate_game_code<R: Rng + ?Sized>(rng: &mut R) -> GameCode {
    let mut indices = [0usize; constants::GAME_CODE_LEN];
    for idx in &mut indices {
        *idx = rng.gen_range(0..constants::GAME_CODE_ALPHABET.len());
    }
    GameCode::from_indices(indices)
}

/// All live games, keyed by code.
pub struct GameRegistry {
    games: HashMap<GameCode, GameLedger>,
    config: LedgerConfig,
}

impl GameRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Every game created by this registry inherits `config`.
    #[must_use]
    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            games: HashMap::new(),
            config,
        }
    }

    /// Create an empty game under a fresh code.
    ///
    /// # Errors
    /// Returns [`LedgerError::CodeSpaceExhausted`] if every attempt drew a
    /// code that is already taken.
    pub fn create_game<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<GameCode> {
        let attempts = self.config.max_code_attempts;
        for attempt in 0..attempts {
            let code = generate_game_code(rng);
            if self.games.contains_key(&code) {
                tracing::warn!(%code, attempt, "Game code collision, retrying");
                continue;
            }
            let ledger = GameLedger::with_config(code.clone(), self.config.clone());
            self.games.insert(code.clone(), ledger);
            tracing::info!(%code, games = self.games.len(), "Game created");
            return Ok(code);
        }
        Err(LedgerError::CodeSpaceExhausted { attempts })
    }

    /// Register an existing ledger, e.g. one restored from a snapshot.
    /// Returns the ledger it replaced, if any.
    pub fn insert(&mut self, ledger: GameLedger) -> Option<GameLedger> {
        self.games.insert(ledger.code().clone(), ledger)
    }

    /// Look up a game by user-typed code (case-insensitive).
    pub fn get(&self, code: &str) -> Result<&GameLedger> {
        let code = validate::game_code(code)?;
        self.games
            .get(&code)
            .ok_or_else(|| LedgerError::GameNotFound(code.to_string()))
    }

    pub fn get_mut(&mut self, code: &str) -> Result<&mut GameLedger> {
        let code = validate::game_code(code)?;
        self.games
            .get_mut(&code)
            .ok_or_else(|| LedgerError::GameNotFound(code.to_string()))
    }

    pub fn remove(&mut self, code: &str) -> Result<GameLedger> {
        let code = validate::game_code(code)?;
        let ledger = self
            .games
            .remove(&code)
            .ok_or_else(|| LedgerError::GameNotFound(code.to_string()))?;
        tracing::info!(%code, "Game removed");
        Ok(ledger)
    }

    #[must_use]
    pub fn contains(&self, code: &GameCode) -> bool {
        self.games.contains_key(code)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    use super::*;

    #[test]
    fn generated_codes_are_valid() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let code = generate_game_code(&mut rng);
            assert_eq!(GameCode::parse(code.as_str()).unwrap(), code);
        }
    }

    #[test]
    fn create_and_lookup_case_insensitive() {
        let mut registry = GameRegistry::new();
        let mut rng = StdRng::seed_from_u64(2);
        let code = registry.create_game(&mut rng).unwrap();

        let lower = code.as_str().to_ascii_lowercase();
        assert_eq!(registry.get(&lower).unwrap().code(), &code);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_code_not_found() {
        let registry = GameRegistry::new();
        let err = registry.get("ZZZZZ").unwrap_err();
        assert!(matches!(err, LedgerError::GameNotFound(c) if c == "ZZZZZ"));
    }

    #[test]
    fn malformed_code_rejected_before_lookup() {
        let registry = GameRegistry::new();
        let err = registry.get("NOPE").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidGameCode { .. }));
    }

    #[test]
    fn collisions_exhaust_attempts() {
        // A constant RNG always draws "AAAAA".
        let mut rng = StepRng::new(0, 0);
        let mut registry = GameRegistry::new();
        let first = registry.create_game(&mut rng).unwrap();
        assert_eq!(first.as_str(), "AAAAA");

        let err = registry.create_game(&mut rng).unwrap_err();
        assert!(matches!(err, LedgerError::CodeSpaceExhausted { attempts: 100 }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn games_inherit_registry_config() {
        let config = LedgerConfig {
            max_code_attempts: 5,
            ..LedgerConfig::default()
        };
        let mut registry = GameRegistry::with_config(config);
        let mut rng = StdRng::seed_from_u64(3);
        let code = registry.create_game(&mut rng).unwrap();
        assert_eq!(registry.get(code.as_str()).unwrap().config().max_code_attempts, 5);
    }

    #[test]
    fn mutate_through_registry() {
        let mut registry = GameRegistry::new();
        let mut rng = StdRng::seed_from_u64(4);
        let code = registry.create_game(&mut rng).unwrap();

        registry.get_mut(code.as_str()).unwrap().add_player("Alice").unwrap();
        assert_eq!(registry.get(code.as_str()).unwrap().players().len(), 1);

        let removed = registry.remove(code.as_str()).unwrap();
        assert_eq!(removed.players().len(), 1);
        assert!(registry.is_empty());
        assert!(!registry.contains(&code));
    }
}
