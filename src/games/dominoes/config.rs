//! Dominoes configuration and game modes.

use serde::{Deserialize, Serialize};

use crate::rules::CreateError;

/// Scoring mode, selected by the mode string at creation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DominoMode {
    /// Individual play; first to a number of hand wins.
    #[default]
    Classic,
    /// Two fixed partnerships scoring points toward a target.
    Boricua,
}

impl DominoMode {
    /// Parse a mode string. An empty string selects the default mode.
    pub fn parse(mode: &str) -> Result<Self, CreateError> {
        match mode {
            "" | "classic" => Ok(DominoMode::Classic),
            "boricua" => Ok(DominoMode::Boricua),
            other => Err(CreateError::InvalidMode {
                game: super::GAME_TYPE.to_string(),
                mode: other.to_string(),
            }),
        }
    }

    /// Check if scores accumulate per team.
    #[must_use]
    pub fn is_team_mode(self) -> bool {
        self == DominoMode::Boricua
    }
}

impl std::fmt::Display for DominoMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DominoMode::Classic => f.write_str("CLASSIC"),
            DominoMode::Boricua => f.write_str("BORICUA"),
        }
    }
}

/// Table rules for dominoes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DominoConfig {
    /// Highest pip value; 6 is a double-six set.
    pub max_pips: u8,
    /// Tiles dealt to each player.
    pub hand_size: usize,
    /// Hand wins needed in classic mode.
    pub classic_wins_needed: u32,
    /// Team points needed in team mode.
    pub team_target: u32,
    /// Play the opening double for its holder when a hand starts.
    pub autoplay_opening_double: bool,
}

impl Default for DominoConfig {
    fn default() -> Self {
        Self {
            max_pips: 6,
            hand_size: 7,
            classic_wins_needed: 3,
            team_target: 500,
            autoplay_opening_double: false,
        }
    }
}

impl DominoConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hand wins needed in classic mode.
    #[must_use]
    pub fn with_classic_wins_needed(mut self, wins: u32) -> Self {
        self.classic_wins_needed = wins;
        self
    }

    /// Set the team points target.
    #[must_use]
    pub fn with_team_target(mut self, points: u32) -> Self {
        self.team_target = points;
        self
    }

    /// Enable or disable automatic opening doubles.
    #[must_use]
    pub fn with_autoplay_opening_double(mut self, enabled: bool) -> Self {
        self.autoplay_opening_double = enabled;
        self
    }
}
