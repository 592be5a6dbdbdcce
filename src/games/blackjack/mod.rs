//! Blackjack: every seated player against a house dealer.
//!
//! - 1-7 players, a two-deck shoe by default
//! - Moves: `hit`, `stand`, and `ready_for_next_round` between rounds
//! - First to the mode's round-win threshold takes the game
//!
//! Hands are owner-only; the shoe is hidden; the dealer's hole card stays
//! face down until the round settles.

mod cards;
mod config;
mod game;
mod policy;
mod view;

pub use cards::{hand_value, new_shoe, Card, Rank, Suit};
pub use config::{BlackjackConfig, BlackjackMode};
pub use game::{
    Blackjack, BlackjackMove, BlackjackState, BlackjackTable, HandCards, HandStatus, PlayerHand, RoundOutcome,
};
pub use policy::ThresholdPolicy;
pub use view::{BlackjackView, CardSlot, DealerView, HandView};

/// Registry key.
pub const GAME_TYPE: &str = "blackjack";

/// Best possible hand value.
pub const TARGET: u32 = 21;
