//! Blackjack configuration and game modes.

use serde::{Deserialize, Serialize};

use crate::rules::CreateError;

/// Match length, selected by the mode string at creation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlackjackMode {
    /// First to 3 round wins.
    #[default]
    BestOf5,
    /// First to 6 round wins.
    BestOf10,
}

impl BlackjackMode {
    /// Parse a mode string. An empty string selects the default mode.
    pub fn parse(mode: &str) -> Result<Self, CreateError> {
        match mode {
            "" | "best_of_5" => Ok(BlackjackMode::BestOf5),
            "best_of_10" => Ok(BlackjackMode::BestOf10),
            other => Err(CreateError::InvalidMode {
                game: super::GAME_TYPE.to_string(),
                mode: other.to_string(),
            }),
        }
    }

    /// Round wins needed to take the game.
    #[must_use]
    pub fn wins_needed(self) -> u32 {
        match self {
            BlackjackMode::BestOf5 => 3,
            BlackjackMode::BestOf10 => 6,
        }
    }
}

impl std::fmt::Display for BlackjackMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlackjackMode::BestOf5 => f.write_str("BEST_OF_5"),
            BlackjackMode::BestOf10 => f.write_str("BEST_OF_10"),
        }
    }
}

/// Table rules for blackjack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackjackConfig {
    /// Decks in the shoe.
    pub decks: usize,
    /// The dealer draws while below this value.
    pub dealer_stands_on: u32,
    /// Shoe size below which a fresh shoe is shuffled in between rounds.
    pub reshuffle_below: usize,
    /// Automated players hit while below this value.
    pub hit_threshold: u32,
}

impl Default for BlackjackConfig {
    fn default() -> Self {
        Self {
            decks: 2,
            dealer_stands_on: 17,
            reshuffle_below: 20,
            hit_threshold: 17,
        }
    }
}

impl BlackjackConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of decks.
    #[must_use]
    pub fn with_decks(mut self, decks: usize) -> Self {
        self.decks = decks.max(1);
        self
    }

    /// Set the dealer's standing value.
    #[must_use]
    pub fn with_dealer_stands_on(mut self, value: u32) -> Self {
        self.dealer_stands_on = value;
        self
    }

    /// Set the between-rounds reshuffle point.
    #[must_use]
    pub fn with_reshuffle_below(mut self, cards: usize) -> Self {
        self.reshuffle_below = cards;
        self
    }

    /// Set the automated players' hit threshold.
    #[must_use]
    pub fn with_hit_threshold(mut self, value: u32) -> Self {
        self.hit_threshold = value;
        self
    }
}
