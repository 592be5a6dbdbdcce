//! Error taxonomy for rule modules and the engine around them.
//!
//! - `CreateError`: a game could not be set up. Fatal to game creation.
//! - `MoveError`: a move was rejected. Recoverable; the state is unchanged
//!   and the message goes back to the acting player only.
//! - `EngineError`: everything the host must treat as fatal for the
//!   operation or the instance, plus wrapped rule errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::PlayerId;

/// Errors raised by `create_new_game`.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum CreateError {
    #[error("{game} needs {expected} players, got {got}")]
    InvalidPlayerCount {
        game: String,
        expected: String,
        got: usize,
    },
    #[error("unknown {game} mode '{mode}'")]
    InvalidMode { game: String, mode: String },
    #[error("player {0} is seated twice")]
    DuplicatePlayer(PlayerId),
}

impl CreateError {
    pub(crate) fn player_count(game: &str, expected: impl Into<String>, got: usize) -> Self {
        Self::InvalidPlayerCount {
            game: game.to_string(),
            expected: expected.into(),
            got,
        }
    }
}

/// Errors raised by `apply_move`.
///
/// The display string is the message relayed to the offending player.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum MoveError {
    #[error("not your turn")]
    NotYourTurn,
    #[error("game is already over")]
    GameAlreadyOver,
    #[error("{0}")]
    InvalidMove(String),
}

impl MoveError {
    /// Reject a move with a game-specific reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidMove(reason.into())
    }
}

/// Errors surfaced to the host.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Create(#[from] CreateError),
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error("automated players exceeded {steps} moves without yielding")]
    CascadeOverrun { steps: usize },
    #[error("no automated move available for {0}")]
    NoAutomatedMove(PlayerId),
    #[error("automated move by {actor} rejected: {error}")]
    AutomatedMoveRejected { actor: PlayerId, error: MoveError },
    #[error("unknown game type '{0}'")]
    UnknownGameType(String),
    #[error("state encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl EngineError {
    /// True for faults that should freeze the game instance.
    #[must_use]
    pub fn is_instance_fatal(&self) -> bool {
        matches!(
            self,
            EngineError::CascadeOverrun { .. }
                | EngineError::NoAutomatedMove(_)
                | EngineError::AutomatedMoveRejected { .. }
        )
    }
}
