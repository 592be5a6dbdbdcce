//! Per-viewer sanitization of game state.
//!
//! `sanitize` copies the shared base fields and asks the game for a typed
//! projection of its table. The canonical state is only borrowed, so the
//! same state can be projected once per viewer without any of them seeing
//! another's redactions.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{GameResult, GameState, GameStatus, PlayerId};
use crate::rules::RulesEngine;

/// Games that can project their table for a viewer.
///
/// Implementations apply the generic rule first (owner-only holdings via
/// `project_holdings`, reserves via `ReserveView`), then any game-specific
/// concealment such as a face-down card in an otherwise visible row.
pub trait Sanitize: RulesEngine {
    /// Redacted table type.
    type View: Clone + fmt::Debug + PartialEq + Serialize;

    /// Project the table for `viewer`.
    ///
    /// Must be deterministic and must not depend on anything but its inputs.
    fn project_table(&self, state: &GameState<Self::Table>, viewer: &PlayerId) -> Self::View;
}

/// A game state as one viewer is allowed to see it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectedState<V> {
    /// Who this projection was made for.
    pub viewer: PlayerId,
    /// Seat order.
    pub players: Vec<PlayerId>,
    /// Index of the player to act.
    pub current_turn_index: usize,
    /// Lifecycle status.
    pub status: GameStatus,
    /// Full event log.
    pub log: Vec<String>,
    /// Intermission acknowledgments.
    pub ready: BTreeSet<PlayerId>,
    /// Final result, if finished.
    pub winner: Option<GameResult>,
    /// Redacted game-specific state.
    pub table: V,
}

impl<V> ProjectedState<V> {
    /// True if it is the viewer's turn.
    #[must_use]
    pub fn is_viewer_turn(&self) -> bool {
        self.status == GameStatus::InProgress
            && self.players.get(self.current_turn_index) == Some(&self.viewer)
    }
}

/// Project `state` for `viewer`.
pub fn sanitize<E: Sanitize>(engine: &E, state: &GameState<E::Table>, viewer: &PlayerId) -> ProjectedState<E::View> {
    ProjectedState {
        viewer: viewer.clone(),
        players: state.players.clone(),
        current_turn_index: state.current_turn_index,
        status: state.status,
        log: state.log.iter().cloned().collect(),
        ready: state.ready.clone(),
        winner: state.winner.clone(),
        table: engine.project_table(state, viewer),
    }
}
