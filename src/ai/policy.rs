//! Move policies for automated players.
//!
//! Policies are trait-based so each game ships its own heuristic:
//! - Blackjack: hit below a threshold, otherwise stand
//! - Dominoes: first legal tile, else draw, else pass
//!
//! A policy only ever proposes moves that are legal under the current
//! rules. When nothing but a forced action exists (draw, pass,
//! acknowledge), that is what it returns.

use crate::core::{GameRng, GameState, PlayerId};
use crate::rules::RulesEngine;

/// Policy for choosing an automated player's move.
pub trait MovePolicy<E: RulesEngine>: Send + Sync {
    /// Choose a move for `actor`.
    ///
    /// Returns `None` if the game is not waiting on `actor`. The RNG is
    /// only for breaking ties between equally good moves.
    fn select_move(
        &self,
        engine: &E,
        state: &GameState<E::Table>,
        actor: &PlayerId,
        rng: &mut GameRng,
    ) -> Option<E::Move>;
}
