//! Rules engine trait and error taxonomy for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - Player-count and mode validation at creation
//! - Move validation and the resulting state
//! - Turn, round and game completion
//!
//! The orchestrator and sanitizer call into `RulesEngine` but never
//! interpret game-specific concepts directly.

pub mod engine;
pub mod error;

pub use engine::{require_seats, RulesEngine};
pub use error::{CreateError, EngineError, MoveError};
