//! Game state: the shared base shape plus a game-specific table.
//!
//! ## GameState
//!
//! Every game instance is one `GameState<T>`:
//! - Seat order (`players`) and whose turn it is (`current_turn_index`)
//! - Lifecycle status and final result
//! - Append-only event log for display
//! - Intermission acknowledgments (`ready`)
//! - The game-specific `table` (hands, board, reserves, scores)
//!
//! The orchestrator and sanitizer read only the base fields; everything in
//! `table` belongs to the rule module that created it.
//!
//! States are values. Rule modules take `&GameState<T>` and return a new
//! one, so a rejected move can never leave a half-applied state behind.
//! The log uses an `im` persistent vector so the clone taken on every
//! accepted move stays cheap however long the game runs.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::player::PlayerId;

/// Lifecycle status of a game instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Players are taking turns.
    InProgress,
    /// A blackjack round is over; waiting for every player to acknowledge.
    RoundFinished,
    /// A dominoes hand is over; waiting for every player to acknowledge.
    HandFinished,
    /// The game is over. Terminal.
    Finished,
}

impl GameStatus {
    /// True for the between-rounds pauses gated by acknowledgments.
    #[must_use]
    pub fn is_intermission(self) -> bool {
        matches!(self, GameStatus::RoundFinished | GameStatus::HandFinished)
    }

    /// True once the game is over.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == GameStatus::Finished
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameStatus::InProgress => "in_progress",
            GameStatus::RoundFinished => "round_finished",
            GameStatus::HandFinished => "hand_finished",
            GameStatus::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Team identifier for partnership games (1-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u8);

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "team{}", self.0)
    }
}

/// Result of a finished game, hand or round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum GameResult {
    /// Single winner.
    Player(PlayerId),
    /// A partnership won.
    Team(TeamId),
    /// Nobody won.
    Draw,
}

impl GameResult {
    /// Check if a player won outright.
    #[must_use]
    pub fn is_winner(&self, player: &PlayerId) -> bool {
        matches!(self, GameResult::Player(p) if p == player)
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Player(p) => write!(f, "{p}"),
            GameResult::Team(t) => write!(f, "{}", t.to_string().to_uppercase()),
            GameResult::Draw => f.write_str("nobody"),
        }
    }
}

/// Append-only, human-readable event log.
///
/// Entries are for display only; no rule reads them back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameLog {
    entries: Vector<String>,
}

impl GameLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push_back(entry.into());
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&String> {
        self.entries.last()
    }

    /// Entries appended at or after position `from`.
    ///
    /// Hosts keep the length they last broadcast and send only the tail.
    #[must_use]
    pub fn tail(&self, from: usize) -> Vec<String> {
        self.entries.iter().skip(from).cloned().collect()
    }

    /// Iterate over all entries.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.entries.iter()
    }
}

/// Outcome of recording an intermission acknowledgment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Acknowledgment {
    /// Newly recorded; `ready` of `total` players have acknowledged.
    Recorded { ready: usize, total: usize },
    /// The player had already acknowledged.
    Duplicate,
}

/// Complete state of one game instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState<T> {
    /// Seat order; index is turn order.
    pub players: Vec<PlayerId>,

    /// Index into `players` of the player to act.
    pub current_turn_index: usize,

    /// Lifecycle status.
    pub status: GameStatus,

    /// Event log.
    pub log: GameLog,

    /// Players that acknowledged the current intermission.
    #[serde(default)]
    pub ready: BTreeSet<PlayerId>,

    /// Final result. Set once, when `status` becomes `Finished`.
    pub winner: Option<GameResult>,

    /// Game-specific state.
    pub table: T,
}

impl<T> GameState<T> {
    /// Create an in-progress state with player 0 to act.
    #[must_use]
    pub fn new(players: Vec<PlayerId>, table: T) -> Self {
        Self {
            players,
            current_turn_index: 0,
            status: GameStatus::InProgress,
            log: GameLog::new(),
            ready: BTreeSet::new(),
            winner: None,
            table,
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The player at `current_turn_index`.
    #[must_use]
    pub fn current_player(&self) -> Option<&PlayerId> {
        self.players.get(self.current_turn_index)
    }

    /// Seat index of a player.
    #[must_use]
    pub fn seat_of(&self, player: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p == player)
    }

    /// Check whether a player is seated in this game.
    #[must_use]
    pub fn is_seated(&self, player: &PlayerId) -> bool {
        self.seat_of(player).is_some()
    }

    /// Seat index following `index`, wrapping around the table.
    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.players.len().max(1)
    }

    /// Hand the turn to the next seat.
    pub fn advance_turn(&mut self) {
        self.current_turn_index = self.next_index(self.current_turn_index);
    }

    /// Append a log entry.
    pub fn push_log(&mut self, entry: impl Into<String>) {
        self.log.push(entry);
    }

    /// Enter an intermission, clearing previous acknowledgments.
    pub fn begin_intermission(&mut self, status: GameStatus) {
        debug_assert!(status.is_intermission());
        self.status = status;
        self.ready.clear();
    }

    /// Record that a player is ready to continue.
    pub fn acknowledge(&mut self, player: &PlayerId) -> Acknowledgment {
        if !self.ready.insert(player.clone()) {
            return Acknowledgment::Duplicate;
        }
        Acknowledgment::Recorded {
            ready: self.ready.len(),
            total: self.players.len(),
        }
    }

    /// True when every seated player has acknowledged.
    #[must_use]
    pub fn all_ready(&self) -> bool {
        self.players.iter().all(|p| self.ready.contains(p))
    }

    /// Seated players that have not acknowledged yet, in seat order.
    #[must_use]
    pub fn not_ready(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| !self.ready.contains(*p))
            .cloned()
            .collect()
    }

    /// Leave an intermission and resume play.
    pub fn resume(&mut self) {
        self.status = GameStatus::InProgress;
        self.ready.clear();
    }

    /// End the game with a result. The first result recorded sticks.
    pub fn finish(&mut self, result: GameResult) {
        self.status = GameStatus::Finished;
        self.ready.clear();
        if self.winner.is_none() {
            self.winner = Some(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState<()> {
        GameState::new(
            vec![PlayerId::new("a"), PlayerId::new("b"), PlayerId::new("c")],
            (),
        )
    }

    #[test]
    fn test_new_state() {
        let state = state();

        assert_eq!(state.player_count(), 3);
        assert_eq!(state.status, GameStatus::InProgress);
        assert_eq!(state.current_player(), Some(&PlayerId::new("a")));
        assert!(state.log.is_empty());
        assert!(state.winner.is_none());
    }

    #[test]
    fn test_advance_turn_wraps() {
        let mut state = state();

        state.advance_turn();
        state.advance_turn();
        assert_eq!(state.current_player(), Some(&PlayerId::new("c")));

        state.advance_turn();
        assert_eq!(state.current_turn_index, 0);
    }

    #[test]
    fn test_log_tail() {
        let mut state = state();
        state.push_log("one");
        state.push_log("two");
        state.push_log("three");

        assert_eq!(state.log.len(), 3);
        assert_eq!(state.log.tail(1), vec!["two".to_string(), "three".to_string()]);
        assert!(state.log.tail(3).is_empty());
    }

    #[test]
    fn test_acknowledgments() {
        let mut state = state();
        state.begin_intermission(GameStatus::RoundFinished);

        let a = PlayerId::new("a");
        assert_eq!(state.acknowledge(&a), Acknowledgment::Recorded { ready: 1, total: 3 });
        assert_eq!(state.acknowledge(&a), Acknowledgment::Duplicate);
        assert_eq!(state.not_ready(), vec![PlayerId::new("b"), PlayerId::new("c")]);
        assert!(!state.all_ready());

        state.acknowledge(&PlayerId::new("b"));
        state.acknowledge(&PlayerId::new("c"));
        assert!(state.all_ready());

        state.resume();
        assert_eq!(state.status, GameStatus::InProgress);
        assert!(state.ready.is_empty());
    }

    #[test]
    fn test_finish_keeps_first_winner() {
        let mut state = state();

        state.finish(GameResult::Player(PlayerId::new("b")));
        state.finish(GameResult::Draw);

        assert!(state.status.is_terminal());
        assert_eq!(state.winner, Some(GameResult::Player(PlayerId::new("b"))));
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&GameStatus::RoundFinished).unwrap();
        assert_eq!(json, "\"round_finished\"");
        assert_eq!(GameStatus::HandFinished.to_string(), "hand_finished");
    }

    #[test]
    fn test_result_display() {
        assert_eq!(GameResult::Team(TeamId(2)).to_string(), "TEAM2");
        assert_eq!(GameResult::Player(PlayerId::new("ana")).to_string(), "ana");
        assert!(GameResult::Player(PlayerId::new("ana")).is_winner(&PlayerId::new("ana")));
    }
}
