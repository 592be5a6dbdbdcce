//! Engine configuration.
//!
//! Game-specific knobs live next to each game (`BlackjackConfig`,
//! `DominoConfig`); this holds what the generic layer needs.

use serde::{Deserialize, Serialize};

/// Default cap on automated moves applied after one external move.
pub const DEFAULT_MAX_CASCADE_STEPS: usize = 4096;

/// Configuration for the orchestrator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum automated moves in a single cascade.
    ///
    /// The longest all-automated game, team dominoes to 500 at 25 points a
    /// hand, runs to roughly 40 hands of about 40 moves each. Hitting the cap
    /// means a rule module or policy is looping.
    pub max_cascade_steps: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_cascade_steps: DEFAULT_MAX_CASCADE_STEPS,
        }
    }
}

impl EngineConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cascade cap.
    #[must_use]
    pub fn with_max_cascade_steps(mut self, steps: usize) -> Self {
        self.max_cascade_steps = steps;
        self
    }
}
