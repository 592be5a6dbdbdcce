//! # tabletop-engine
//!
//! A turn-based game-state engine for multiplayer tabletop games.
//!
//! ## Design Principles
//!
//! 1. **Pure Rules**: A rule module maps `(state, actor, move)` to a new state
//!    or a rejection. It never mutates its input and never touches I/O.
//!
//! 2. **Typed Inside, Encoded at the Edge**: Each game owns its table and move
//!    types. Only the registry speaks `serde_json::Value`.
//!
//! 3. **Injectable Randomness**: Shuffles draw from a caller-supplied
//!    `GameRng`, so a seed replays a whole game.
//!
//! ## Architecture
//!
//! - **Sanitized Views**: Every state leaving the engine for a viewer goes
//!   through a per-game projection that collapses hidden holdings to counts.
//!
//! - **Bounded Cascade**: After an external move, automated players act until
//!   a human is awaited or the game ends, capped by `EngineConfig`.
//!
//! - **Persistent Data Structures**: The log and domino line use `im-rs`, so
//!   copy-on-write state stays cheap.
//!
//! ## Modules
//!
//! - `core`: Players, state envelope, RNG, configuration
//! - `rules`: RulesEngine trait and error taxonomy
//! - `view`: Per-viewer projection
//! - `ai`: Move policies for automated players
//! - `session`: Turn orchestration and the automated cascade
//! - `registry`: String-keyed game modules over `serde_json::Value`
//! - `games`: Blackjack and dominoes

pub mod core;
pub mod rules;
pub mod view;
pub mod ai;
pub mod session;
pub mod registry;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Player, PlayerId, PlayerMap, Roster,
    GameRng, GameRngState,
    EngineConfig,
    GameLog, GameResult, GameState, GameStatus, TeamId,
};

pub use crate::rules::{CreateError, EngineError, MoveError, RulesEngine};

pub use crate::view::{sanitize, Holding, ProjectedState, ReserveView, Sanitize};

pub use crate::ai::MovePolicy;

pub use crate::session::{CascadeReport, CascadeStep, Orchestrator, TurnOutcome};

pub use crate::registry::{EncodedReport, GameModule, GameRegistry, Module, PlayOutcome};
