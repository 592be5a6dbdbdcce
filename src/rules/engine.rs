//! Rules engine trait for game implementations.
//!
//! A rule module is two functions:
//! - `create_new_game`: seat the players and deal
//! - `apply_move`: validate a move and return the next state
//!
//! Both are pure apart from the `GameRng` handed in. `apply_move` borrows the
//! current state and returns a fresh one; on rejection the caller still
//! holds the untouched original.

use std::fmt;
use std::ops::RangeInclusive;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{CreateError, MoveError};
use crate::core::{GameRng, GameState, GameStatus, PlayerId, PlayerMap};

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `apply_move` must reject with `GameAlreadyOver` once the state is
///   finished, and with `NotYourTurn` when a gameplay move comes from anyone
///   but the current player. `check_turn` does both.
/// - Intermission acknowledgments are not turn-gated; `check_acknowledgment`
///   validates them.
/// - Only `apply_move` moves `current_turn_index`.
pub trait RulesEngine {
    /// Game-specific state stored in `GameState::table`.
    type Table: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned;

    /// The game's move grammar.
    type Move: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned;

    /// Registry key for this game.
    fn game_type(&self) -> &'static str;

    /// Allowed player counts.
    fn player_range(&self) -> RangeInclusive<usize>;

    /// Seat the players and set up the first round.
    fn create_new_game(
        &self,
        players: &[PlayerId],
        mode: &str,
        rng: &mut GameRng,
    ) -> Result<GameState<Self::Table>, CreateError>;

    /// Validate `mv` by `actor` and return the resulting state.
    fn apply_move(
        &self,
        state: &GameState<Self::Table>,
        actor: &PlayerId,
        mv: &Self::Move,
        rng: &mut GameRng,
    ) -> Result<GameState<Self::Table>, MoveError>;

    // === Convenience Methods ===

    /// Players whose input the game is waiting on.
    ///
    /// In progress: the current player. In an intermission: everyone who
    /// has not acknowledged. Finished: nobody.
    fn awaiting(&self, state: &GameState<Self::Table>) -> Vec<PlayerId> {
        match state.status {
            GameStatus::InProgress => state.current_player().cloned().into_iter().collect(),
            GameStatus::RoundFinished | GameStatus::HandFinished => state.not_ready(),
            GameStatus::Finished => Vec::new(),
        }
    }

    /// Reject gameplay moves on a finished game, during an intermission, or
    /// out of turn.
    fn check_turn(&self, state: &GameState<Self::Table>, actor: &PlayerId) -> Result<(), MoveError> {
        if state.status.is_terminal() {
            return Err(MoveError::GameAlreadyOver);
        }
        if state.status.is_intermission() {
            return Err(MoveError::invalid(format!(
                "action not permitted while {}",
                state.status
            )));
        }
        if state.current_player() != Some(actor) {
            return Err(MoveError::NotYourTurn);
        }
        Ok(())
    }

    /// Reject acknowledgments outside the given intermission status.
    fn check_acknowledgment(
        &self,
        state: &GameState<Self::Table>,
        actor: &PlayerId,
        intermission: GameStatus,
        not_paused_reason: &str,
    ) -> Result<(), MoveError> {
        if state.status.is_terminal() {
            return Err(MoveError::GameAlreadyOver);
        }
        if !state.is_seated(actor) {
            return Err(MoveError::NotYourTurn);
        }
        if state.status != intermission {
            return Err(MoveError::invalid(not_paused_reason));
        }
        Ok(())
    }

    /// Reject a state the rules cannot act on, such as one decoded from an
    /// edited payload: the turn index must name a seat and every per-player
    /// field must cover every seat.
    fn check_state(&self, state: &GameState<Self::Table>) -> Result<(), MoveError> {
        if state.current_turn_index >= state.players.len().max(1) {
            return Err(MoveError::invalid(format!(
                "turn index {} is past the last seat",
                state.current_turn_index
            )));
        }
        self.check_table(state)
    }

    /// Game-specific half of `check_state`.
    fn check_table(&self, _state: &GameState<Self::Table>) -> Result<(), MoveError> {
        Ok(())
    }

    /// Validate the seat list against `player_range` and uniqueness.
    fn check_players(&self, players: &[PlayerId]) -> Result<(), CreateError> {
        let range = self.player_range();
        if !range.contains(&players.len()) {
            let expected = if range.start() == range.end() {
                format!("exactly {}", range.start())
            } else {
                format!("{} to {}", range.start(), range.end())
            };
            return Err(CreateError::player_count(self.game_type(), expected, players.len()));
        }
        for (i, player) in players.iter().enumerate() {
            if players[..i].contains(player) {
                return Err(CreateError::DuplicatePlayer(player.clone()));
            }
        }
        Ok(())
    }
}

/// Fail when `map` has no entry for one of the seated `players`.
pub fn require_seats<T>(map: &PlayerMap<T>, players: &[PlayerId], field: &str) -> Result<(), MoveError> {
    match map.missing(players) {
        Some(player) => Err(MoveError::invalid(format!("{field} has no entry for {player}"))),
        None => Ok(()),
    }
}
