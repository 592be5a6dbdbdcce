//! Dominoes: a double-six tile-matching game for 2-4 players.
//!
//! - `classic`: individual play, first to 3 hand wins
//! - `boricua`: two partnerships (seats 0-1 vs 2-3) racing to 500 points
//!
//! Moves are `play`, `draw`, `pass`, and `ready_for_next_hand` between hands.
//! Hands are owner-only and the boneyard is hidden; the line of play is
//! public.

mod config;
mod game;
mod policy;
mod tiles;
mod view;

pub use config::{DominoConfig, DominoMode};
pub use game::{hand_points, DominoMove, DominoState, DominoTable, Dominoes, Partnership, DOUBLE_BLANK_BONUS};
pub use policy::FirstLegalPolicy;
pub use tiles::{fits, full_set, new_boneyard, open_ends, orient, pip_total, Side, Tile};
pub use view::DominoView;

/// Registry key.
pub const GAME_TYPE: &str = "dominoes";
