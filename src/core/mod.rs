//! Core engine types: players, state, RNG, configuration.
//!
//! This module contains the game-agnostic building blocks. Games put their
//! own data in the `table` of a `GameState` rather than extending the core.

pub mod player;
pub mod rng;
pub mod config;
pub mod state;

pub use player::{Player, PlayerId, PlayerMap, Roster};
pub use rng::{GameRng, GameRngState};
pub use config::{EngineConfig, DEFAULT_MAX_CASCADE_STEPS};
pub use state::{Acknowledgment, GameLog, GameResult, GameState, GameStatus, TeamId};
