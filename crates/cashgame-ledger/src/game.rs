//! Ledger for a single cash game.
//!
//! Tracks players in join order, their buy-ins in creation order, and at
//! most one final cashout each. A player's net result is derived on demand:
//!
//! ```text
//! net = final cashout (0 if not entered) - Σ(buy-ins)
//! ```

use std::collections::{HashMap, HashSet};

use cashgame_settlement::calculate_settlement_with;
use cashgame_types::{
    BuyIn, BuyInId, FinalCashout, GameCode, LedgerConfig, LedgerError, LedgerSummary, Player,
    PlayerId, PlayerResult, Result, SettlementTransfer,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::validate;

/// Owned, serializable copy of a game's full state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub game_code: GameCode,
    pub created_at: DateTime<Utc>,
    pub players: Vec<Player>,
    pub buy_ins: Vec<BuyIn>,
    pub finals: Vec<FinalCashout>,
}

/// All ledger state for one game.
#[derive(Debug, Clone)]
pub struct GameLedger {
    code: GameCode,
    created_at: DateTime<Utc>,
    config: LedgerConfig,
    /// Join order.
    players: Vec<Player>,
    /// Creation order per player.
    buy_ins: HashMap<PlayerId, Vec<BuyIn>>,
    finals: HashMap<PlayerId, FinalCashout>,
}

impl GameLedger {
    /// Create an empty game with the default [`LedgerConfig`].
    #[must_use]
    pub fn new(code: GameCode) -> Self {
        Self::with_config(code, LedgerConfig::default())
    }

    #[must_use]
    pub fn with_config(code: GameCode, config: LedgerConfig) -> Self {
        Self {
            code,
            created_at: Utc::now(),
            config,
            players: Vec::new(),
            buy_ins: HashMap::new(),
            finals: HashMap::new(),
        }
    }

    #[must_use]
    pub fn code(&self) -> &GameCode {
        &self.code
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ---------------------------------------------------------------------
    // Players
    // ---------------------------------------------------------------------

    /// Seat a new player. Duplicate names are allowed; ids tell them apart.
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId> {
        let name = validate::player_name(name)?;
        let player = Player {
            id: PlayerId::new(),
            name,
            created_at: Utc::now(),
        };
        let id = player.id;
        tracing::debug!(game = %self.code, player = %id, name = %player.name, "Player added");
        self.players.push(player);
        Ok(id)
    }

    pub fn rename_player(&mut self, player_id: PlayerId, name: &str) -> Result<()> {
        let name = validate::player_name(name)?;
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or(LedgerError::PlayerNotFound(player_id))?;
        player.name = name;
        Ok(())
    }

    /// Remove a player together with their buy-ins and final cashout.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<Player> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(LedgerError::PlayerNotFound(player_id))?;
        let player = self.players.remove(idx);
        self.buy_ins.remove(&player_id);
        self.finals.remove(&player_id);
        tracing::debug!(game = %self.code, player = %player_id, "Player removed");
        Ok(player)
    }

    #[must_use]
    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    /// Players in join order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Display names keyed by id, for rendering transfers.
    #[must_use]
    pub fn player_names(&self) -> HashMap<PlayerId, String> {
        self.players
            .iter()
            .map(|p| (p.id, p.name.clone()))
            .collect()
    }

    fn ensure_player(&self, player_id: PlayerId) -> Result<()> {
        if self.player(player_id).is_none() {
            return Err(LedgerError::PlayerNotFound(player_id));
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Buy-ins
    // ---------------------------------------------------------------------

    /// Record a buy-in. Amount must be positive.
    pub fn add_buy_in(&mut self, player_id: PlayerId, amount: Decimal) -> Result<BuyInId> {
        self.ensure_player(player_id)?;
        let amount = validate::buy_in_amount(amount)?;
        let buy_in = BuyIn {
            id: BuyInId::new(),
            player_id,
            amount,
            created_at: Utc::now(),
        };
        let id = buy_in.id;
        tracing::debug!(game = %self.code, player = %player_id, %amount, "Buy-in recorded");
        self.buy_ins.entry(player_id).or_default().push(buy_in);
        Ok(id)
    }

    pub fn update_buy_in(
        &mut self,
        player_id: PlayerId,
        buy_in_id: BuyInId,
        amount: Decimal,
    ) -> Result<()> {
        self.ensure_player(player_id)?;
        let amount = validate::buy_in_amount(amount)?;
        let buy_in = self
            .buy_ins
            .get_mut(&player_id)
            .and_then(|entries| entries.iter_mut().find(|b| b.id == buy_in_id))
            .ok_or(LedgerError::BuyInNotFound(buy_in_id))?;
        buy_in.amount = amount;
        Ok(())
    }

    pub fn remove_buy_in(&mut self, player_id: PlayerId, buy_in_id: BuyInId) -> Result<BuyIn> {
        self.ensure_player(player_id)?;
        let entries = self
            .buy_ins
            .get_mut(&player_id)
            .ok_or(LedgerError::BuyInNotFound(buy_in_id))?;
        let idx = entries
            .iter()
            .position(|b| b.id == buy_in_id)
            .ok_or(LedgerError::BuyInNotFound(buy_in_id))?;
        Ok(entries.remove(idx))
    }

    /// A player's buy-ins, oldest first.
    #[must_use]
    pub fn buy_ins_for(&self, player_id: PlayerId) -> &[BuyIn] {
        self.buy_ins.get(&player_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total_buy_ins_for(&self, player_id: PlayerId) -> Result<Decimal> {
        checked_sum(
            self.buy_ins_for(player_id).iter().map(|b| b.amount),
            "buy-in total",
        )
    }

    // ---------------------------------------------------------------------
    // Final cashouts
    // ---------------------------------------------------------------------

    /// Record (or replace) a player's final cashout. Zero is allowed.
    pub fn set_final(&mut self, player_id: PlayerId, amount: Decimal) -> Result<()> {
        self.ensure_player(player_id)?;
        let amount = validate::final_amount(amount)?;
        tracing::debug!(game = %self.code, player = %player_id, %amount, "Final cashout recorded");
        self.finals.insert(
            player_id,
            FinalCashout {
                player_id,
                amount,
                recorded_at: Utc::now(),
            },
        );
        Ok(())
    }

    /// Forget a player's final cashout. Clearing an absent final is a no-op.
    pub fn clear_final(&mut self, player_id: PlayerId) -> Result<()> {
        self.ensure_player(player_id)?;
        self.finals.remove(&player_id);
        Ok(())
    }

    #[must_use]
    pub fn final_for(&self, player_id: PlayerId) -> Option<Decimal> {
        self.finals.get(&player_id).map(|f| f.amount)
    }

    // ---------------------------------------------------------------------
    // Results
    // ---------------------------------------------------------------------

    /// One result per player, in join order.
    pub fn player_results(&self) -> Result<Vec<PlayerResult>> {
        self.players
            .iter()
            .map(|p| {
                let cashout = self.final_for(p.id).unwrap_or(Decimal::ZERO);
                let net = cashout
                    .checked_sub(self.total_buy_ins_for(p.id)?)
                    .ok_or(LedgerError::AmountOverflow { context: "net result" })?;
                Ok(PlayerResult::new(p.id, net))
            })
            .collect()
    }

    pub fn summary(&self) -> Result<LedgerSummary> {
        let mut total_buy_ins = Decimal::ZERO;
        for player in &self.players {
            total_buy_ins = total_buy_ins
                .checked_add(self.total_buy_ins_for(player.id)?)
                .ok_or(LedgerError::AmountOverflow { context: "game buy-in total" })?;
        }
        let total_finals = checked_sum(
            self.players.iter().filter_map(|p| self.final_for(p.id)),
            "game cashout total",
        )?;
        let discrepancy = total_finals
            .checked_sub(total_buy_ins)
            .ok_or(LedgerError::AmountOverflow { context: "discrepancy" })?
            .abs();
        Ok(LedgerSummary {
            total_buy_ins,
            total_finals,
            discrepancy,
            all_finals_entered: self.players.iter().all(|p| self.finals.contains_key(&p.id)),
            tolerance: self.config.discrepancy_tolerance,
        })
    }

    /// Settlement plan for the current results.
    ///
    /// Computed even when [`LedgerSummary::is_ready_to_settle`] is false;
    /// callers decide whether to show it.
    pub fn settle(&self) -> Result<Vec<SettlementTransfer>> {
        let results = self.player_results()?;
        let summary = self.summary()?;
        if !summary.is_ready_to_settle() {
            tracing::warn!(
                game = %self.code,
                discrepancy = %summary.discrepancy,
                all_finals_entered = summary.all_finals_entered,
                "Settling a game that is not balanced"
            );
        }
        Ok(calculate_settlement_with(&results, &self.config.settlement))
    }

    /// Start over: drop every player, buy-in and cashout. The code is kept.
    pub fn reset(&mut self) {
        tracing::info!(game = %self.code, players = self.players.len(), "Game reset");
        self.players.clear();
        self.buy_ins.clear();
        self.finals.clear();
    }

    // ---------------------------------------------------------------------
    // Snapshots
    // ---------------------------------------------------------------------

    /// Copy of the full state. Buy-ins are listed player by player, oldest
    /// first; finals in player join order.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            game_code: self.code.clone(),
            created_at: self.created_at,
            players: self.players.clone(),
            buy_ins: self
                .players
                .iter()
                .flat_map(|p| self.buy_ins_for(p.id).iter().cloned())
                .collect(),
            finals: self
                .players
                .iter()
                .filter_map(|p| self.finals.get(&p.id).cloned())
                .collect(),
        }
    }

    /// Rebuild a ledger from a snapshot.
    ///
    /// Buy-ins are re-ordered by `created_at`. Every amount and name is
    /// re-validated.
    ///
    /// # Errors
    /// - `PlayerNotFound` if a buy-in or final names a player not in the snapshot
    /// - `DuplicatePlayer` / `DuplicateBuyIn` / `DuplicateFinal` for repeated records
    /// - `InvalidPlayerName` / `InvalidAmount` for records that fail validation
    pub fn from_snapshot(snapshot: GameSnapshot, config: LedgerConfig) -> Result<Self> {
        let mut ledger = Self::with_config(snapshot.game_code, config);
        ledger.created_at = snapshot.created_at;

        let mut seen_players = HashSet::with_capacity(snapshot.players.len());
        for mut player in snapshot.players {
            if !seen_players.insert(player.id) {
                return Err(LedgerError::DuplicatePlayer(player.id));
            }
            player.name = validate::player_name(&player.name)?;
            ledger.players.push(player);
        }

        let mut buy_ins = snapshot.buy_ins;
        buy_ins.sort_by_key(|b| b.created_at);
        let mut seen_buy_ins = HashSet::with_capacity(buy_ins.len());
        for buy_in in buy_ins {
            ledger.ensure_player(buy_in.player_id)?;
            if !seen_buy_ins.insert(buy_in.id) {
                return Err(LedgerError::DuplicateBuyIn(buy_in.id));
            }
            validate::buy_in_amount(buy_in.amount)?;
            ledger.buy_ins.entry(buy_in.player_id).or_default().push(buy_in);
        }

        for cashout in snapshot.finals {
            ledger.ensure_player(cashout.player_id)?;
            if ledger.finals.contains_key(&cashout.player_id) {
                return Err(LedgerError::DuplicateFinal(cashout.player_id));
            }
            validate::final_amount(cashout.amount)?;
            ledger.finals.insert(cashout.player_id, cashout);
        }

        Ok(ledger)
    }
}

fn checked_sum(
    amounts: impl IntoIterator<Item = Decimal>,
    context: &'static str,
) -> Result<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, Decimal::checked_add)
        .ok_or(LedgerError::AmountOverflow { context })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    fn game() -> GameLedger {
        GameLedger::new(GameCode::parse("TEST1").unwrap())
    }

    #[test]
    fn net_is_final_minus_buy_ins() {
        let mut g = game();
        let alice = g.add_player("Alice").unwrap();
        g.add_buy_in(alice, dec(100)).unwrap();
        g.add_buy_in(alice, dec(50)).unwrap();
        g.set_final(alice, dec(200)).unwrap();

        let results = g.player_results().unwrap();
        assert_eq!(results, vec![PlayerResult::new(alice, dec(50))]);
    }

    #[test]
    fn missing_final_counts_as_zero() {
        let mut g = game();
        let bob = g.add_player("Bob").unwrap();
        g.add_buy_in(bob, dec(100)).unwrap();
        assert_eq!(g.player_results().unwrap()[0].net, dec(-100));
    }

    #[test]
    fn results_follow_join_order() {
        let mut g = game();
        let a = g.add_player("A").unwrap();
        let b = g.add_player("B").unwrap();
        let c = g.add_player("C").unwrap();
        let ids: Vec<PlayerId> = g.player_results().unwrap().iter().map(|r| r.player_id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn invalid_name_rejected() {
        let mut g = game();
        let err = g.add_player("   ").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidPlayerName { .. }));
        assert!(g.players().is_empty());
    }

    #[test]
    fn rename_trims_and_validates() {
        let mut g = game();
        let id = g.add_player("Alice").unwrap();
        g.rename_player(id, "  Alicia ").unwrap();
        assert_eq!(g.player(id).unwrap().name, "Alicia");
        assert!(g.rename_player(id, "").is_err());
        assert!(matches!(
            g.rename_player(PlayerId::new(), "X").unwrap_err(),
            LedgerError::PlayerNotFound(_)
        ));
    }

    #[test]
    fn buy_in_for_unknown_player_rejected() {
        let mut g = game();
        let err = g.add_buy_in(PlayerId::new(), dec(100)).unwrap_err();
        assert!(matches!(err, LedgerError::PlayerNotFound(_)));
    }

    #[test]
    fn non_positive_buy_in_rejected() {
        let mut g = game();
        let id = g.add_player("A").unwrap();
        assert!(g.add_buy_in(id, Decimal::ZERO).is_err());
        assert!(g.add_buy_in(id, dec(-5)).is_err());
        assert!(g.buy_ins_for(id).is_empty());
    }

    #[test]
    fn update_and_remove_buy_in() {
        let mut g = game();
        let id = g.add_player("A").unwrap();
        let first = g.add_buy_in(id, dec(100)).unwrap();
        let second = g.add_buy_in(id, dec(200)).unwrap();

        g.update_buy_in(id, first, dec(150)).unwrap();
        assert_eq!(g.total_buy_ins_for(id).unwrap(), dec(350));

        let removed = g.remove_buy_in(id, second).unwrap();
        assert_eq!(removed.amount, dec(200));
        assert_eq!(g.total_buy_ins_for(id).unwrap(), dec(150));

        let err = g.remove_buy_in(id, second).unwrap_err();
        assert!(matches!(err, LedgerError::BuyInNotFound(b) if b == second));
    }

    #[test]
    fn buy_in_of_other_player_not_found() {
        let mut g = game();
        let a = g.add_player("A").unwrap();
        let b = g.add_player("B").unwrap();
        let a_buy_in = g.add_buy_in(a, dec(100)).unwrap();
        let err = g.update_buy_in(b, a_buy_in, dec(10)).unwrap_err();
        assert!(matches!(err, LedgerError::BuyInNotFound(_)));
    }

    #[test]
    fn set_final_replaces_and_clear_removes() {
        let mut g = game();
        let id = g.add_player("A").unwrap();
        g.set_final(id, dec(100)).unwrap();
        g.set_final(id, Decimal::ZERO).unwrap();
        assert_eq!(g.final_for(id), Some(Decimal::ZERO));

        g.clear_final(id).unwrap();
        assert_eq!(g.final_for(id), None);
        g.clear_final(id).unwrap();
    }

    #[test]
    fn negative_final_rejected() {
        let mut g = game();
        let id = g.add_player("A").unwrap();
        assert!(matches!(
            g.set_final(id, dec(-1)).unwrap_err(),
            LedgerError::InvalidAmount { .. }
        ));
    }

    #[test]
    fn remove_player_cascades() {
        let mut g = game();
        let a = g.add_player("A").unwrap();
        let b = g.add_player("B").unwrap();
        g.add_buy_in(a, dec(100)).unwrap();
        g.set_final(a, dec(50)).unwrap();

        let removed = g.remove_player(a).unwrap();
        assert_eq!(removed.name, "A");
        assert!(g.buy_ins_for(a).is_empty());
        assert_eq!(g.final_for(a), None);
        assert_eq!(g.players().len(), 1);
        assert_eq!(g.players()[0].id, b);
    }

    #[test]
    fn summary_tracks_discrepancy() {
        let mut g = game();
        let a = g.add_player("A").unwrap();
        let b = g.add_player("B").unwrap();
        g.add_buy_in(a, dec(100)).unwrap();
        g.add_buy_in(b, dec(100)).unwrap();
        g.set_final(a, dec(150)).unwrap();

        let s = g.summary().unwrap();
        assert_eq!(s.total_buy_ins, dec(200));
        assert_eq!(s.total_finals, dec(150));
        assert_eq!(s.discrepancy, dec(50));
        assert!(!s.all_finals_entered);
        assert!(!s.is_ready_to_settle());

        g.set_final(b, dec(50)).unwrap();
        assert!(g.summary().unwrap().is_ready_to_settle());
    }

    #[test]
    fn empty_game_is_trivially_ready() {
        let g = game();
        assert!(g.summary().unwrap().is_ready_to_settle());
        assert!(g.settle().unwrap().is_empty());
    }

    #[test]
    fn settle_uses_results() {
        let mut g = game();
        let a = g.add_player("A").unwrap();
        let b = g.add_player("B").unwrap();
        g.add_buy_in(a, dec(100)).unwrap();
        g.add_buy_in(b, dec(100)).unwrap();
        g.set_final(a, dec(180)).unwrap();
        g.set_final(b, dec(20)).unwrap();

        let transfers = g.settle().unwrap();
        assert_eq!(
            transfers,
            vec![SettlementTransfer {
                from_id: b,
                to_id: a,
                amount: dec(80),
            }]
        );
    }

    #[test]
    fn reset_keeps_code() {
        let mut g = game();
        let a = g.add_player("A").unwrap();
        g.add_buy_in(a, dec(100)).unwrap();
        g.reset();
        assert!(g.players().is_empty());
        assert!(g.player_results().unwrap().is_empty());
        assert_eq!(g.code().as_str(), "TEST1");
    }

    #[test]
    fn snapshot_roundtrip() {
        let mut g = game();
        let a = g.add_player("A").unwrap();
        let b = g.add_player("B").unwrap();
        g.add_buy_in(a, dec(100)).unwrap();
        g.add_buy_in(a, dec(25)).unwrap();
        g.add_buy_in(b, dec(100)).unwrap();
        g.set_final(a, dec(40)).unwrap();

        let snapshot = g.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        let restored = GameLedger::from_snapshot(back, LedgerConfig::default()).unwrap();

        assert_eq!(restored.snapshot(), snapshot);
        assert_eq!(restored.player_results().unwrap(), g.player_results().unwrap());
    }

    #[test]
    fn snapshot_with_orphan_buy_in_rejected() {
        let mut g = game();
        let a = g.add_player("A").unwrap();
        g.add_buy_in(a, dec(100)).unwrap();

        let mut snapshot = g.snapshot();
        snapshot.players.clear();
        let err = GameLedger::from_snapshot(snapshot, LedgerConfig::default()).unwrap_err();
        assert!(matches!(err, LedgerError::PlayerNotFound(id) if id == a));
    }

    #[test]
    fn snapshot_with_duplicate_player_rejected() {
        let mut g = game();
        let a = g.add_player("A").unwrap();
        let b = g.add_player("B").unwrap();
        g.add_buy_in(a, dec(100)).unwrap();
        g.add_buy_in(b, dec(100)).unwrap();
        g.set_final(a, dec(200)).unwrap();
        g.set_final(b, Decimal::ZERO).unwrap();

        let mut snapshot = g.snapshot();
        let repeated = snapshot.players[1].clone();
        snapshot.players.push(repeated);
        let err = GameLedger::from_snapshot(snapshot, LedgerConfig::default()).unwrap_err();
        assert!(matches!(err, LedgerError::DuplicatePlayer(id) if id == b));
    }

    #[test]
    fn snapshot_with_duplicate_buy_in_rejected() {
        let mut g = game();
        let a = g.add_player("A").unwrap();
        let buy_in = g.add_buy_in(a, dec(100)).unwrap();

        let mut snapshot = g.snapshot();
        let repeated = snapshot.buy_ins[0].clone();
        snapshot.buy_ins.push(repeated);
        let err = GameLedger::from_snapshot(snapshot, LedgerConfig::default()).unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateBuyIn(id) if id == buy_in));
    }

    #[test]
    fn snapshot_with_two_finals_for_one_player_rejected() {
        let mut g = game();
        let a = g.add_player("A").unwrap();
        g.set_final(a, dec(10)).unwrap();

        let mut snapshot = g.snapshot();
        let mut second = snapshot.finals[0].clone();
        second.amount = dec(20);
        snapshot.finals.push(second);
        let err = GameLedger::from_snapshot(snapshot, LedgerConfig::default()).unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateFinal(id) if id == a));
    }

    #[test]
    fn snapshot_with_out_of_range_amount_rejected() {
        let mut g = game();
        let a = g.add_player("A").unwrap();
        g.add_buy_in(a, dec(100)).unwrap();

        let mut snapshot = g.snapshot();
        snapshot.buy_ins[0].amount = Decimal::MAX;
        let err = GameLedger::from_snapshot(snapshot, LedgerConfig::default()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount { .. }));
    }

    #[test]
    fn oversized_amounts_rejected_before_totals() {
        let mut g = game();
        let a = g.add_player("A").unwrap();
        assert!(g.add_buy_in(a, Decimal::MAX).is_err());
        assert!(g.set_final(a, Decimal::MAX).is_err());
        assert!(g.add_buy_in(a, Decimal::new(1, 3)).is_err());

        let max = cashgame_types::constants::MAX_AMOUNT;
        g.add_buy_in(a, max).unwrap();
        g.add_buy_in(a, max).unwrap();
        g.set_final(a, max).unwrap();
        assert_eq!(g.player_results().unwrap()[0].net, -max);
        assert_eq!(g.summary().unwrap().total_buy_ins, max + max);
    }

    #[test]
    fn checked_sum_reports_overflow() {
        let err = checked_sum([Decimal::MAX, Decimal::MAX], "buy-in total").unwrap_err();
        assert!(matches!(
            err,
            LedgerError::AmountOverflow { context: "buy-in total" }
        ));
        assert_eq!(checked_sum([dec(1), dec(2)], "x").unwrap(), dec(3));
    }
}
