//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Opaque player identifier supplied by the host (lobby, session layer).
//! The engine never interprets it beyond equality and ordering.
//!
//! ## PlayerMap
//!
//! Per-player data keyed by `PlayerId`, kept in seat (turn) order.
//! Holdings that belong to one player live in a `PlayerMap`, which is what
//! lets the sanitizer find and redact them structurally.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Opaque player identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A seated participant.
///
/// Automated players have no external actor driving them; the orchestrator
/// asks a move policy for their moves instead of waiting on input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Player identifier.
    pub id: PlayerId,

    /// True if moves for this player come from the AI selector.
    pub automated: bool,
}

impl Player {
    /// A player driven by external input.
    #[must_use]
    pub fn human(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            automated: false,
        }
    }

    /// A player driven by the AI selector.
    #[must_use]
    pub fn bot(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            automated: true,
        }
    }
}

/// The set of participants the host knows about for one game instance.
///
/// Unknown players are treated as human: the orchestrator never moves for
/// someone it was not told is automated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Create a roster from a list of players.
    #[must_use]
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    /// Player IDs in seat order.
    #[must_use]
    pub fn ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }

    /// Check whether a player is automated.
    #[must_use]
    pub fn is_automated(&self, player: &PlayerId) -> bool {
        self.players
            .iter()
            .any(|p| p.automated && &p.id == player)
    }

    /// Iterate over players.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }
}

impl FromIterator<Player> for Roster {
    fn from_iter<I: IntoIterator<Item = Player>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Per-player data storage in seat order.
///
/// Backed by a `Vec` of `(PlayerId, T)` pairs: tables seat at most a handful
/// of players, so a linear scan beats hashing and keeps turn order stable
/// through serialization.
///
/// ## Example
///
/// ```
/// use tabletop_engine::core::{PlayerId, PlayerMap};
///
/// let players = vec![PlayerId::new("ana"), PlayerId::new("ben")];
/// let mut wins: PlayerMap<u32> = PlayerMap::with_value(&players, 0);
///
/// wins[&PlayerId::new("ben")] += 1;
/// assert_eq!(wins.get(&PlayerId::new("ben")), Some(&1));
/// assert_eq!(wins.get(&PlayerId::new("cy")), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerMap<T> {
    entries: Vec<(PlayerId, T)>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(players: &[PlayerId], factory: impl Fn(&PlayerId) -> T) -> Self {
        let entries = players
            .iter()
            .map(|p| (p.clone(), factory(p)))
            .collect();

        Self { entries }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(players: &[PlayerId], value: T) -> Self
    where
        T: Clone,
    {
        Self::new(players, |_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(players: &[PlayerId]) -> Self
    where
        T: Default,
    {
        Self::new(players, |_| T::default())
    }

    /// Get the number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether a player has an entry.
    #[must_use]
    pub fn contains(&self, player: &PlayerId) -> bool {
        self.entries.iter().any(|(p, _)| p == player)
    }

    /// First of `players` without an entry.
    #[must_use]
    pub fn missing<'a>(&self, players: &'a [PlayerId]) -> Option<&'a PlayerId> {
        players.iter().find(|p| !self.contains(p))
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: &PlayerId) -> Option<&T> {
        self.entries
            .iter()
            .find(|(p, _)| p == player)
            .map(|(_, v)| v)
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: &PlayerId) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|(p, _)| p == player)
            .map(|(_, v)| v)
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &T)> {
        self.entries.iter().map(|(p, v)| (p, v))
    }

    /// Iterate over (PlayerId, &mut T) pairs in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&PlayerId, &mut T)> {
        self.entries.iter_mut().map(|(p, v)| (&*p, v))
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Transform every value, keeping keys and order.
    pub fn map<U>(&self, mut f: impl FnMut(&PlayerId, &T) -> U) -> PlayerMap<U> {
        PlayerMap {
            entries: self.entries.iter().map(|(p, v)| (p.clone(), f(p, v))).collect(),
        }
    }
}

impl<T> Index<&PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: &PlayerId) -> &Self::Output {
        match self.get(player) {
            Some(value) => value,
            None => panic!("no entry for player {player}"),
        }
    }
}

impl<T> IndexMut<&PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: &PlayerId) -> &mut Self::Output {
        match self.get_mut(player) {
            Some(value) => value,
            None => panic!("no entry for player {player}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats() -> Vec<PlayerId> {
        vec![PlayerId::new("a"), PlayerId::new("b"), PlayerId::new("c")]
    }

    #[test]
    fn test_player_id_display() {
        let p = PlayerId::new("p_abc123");
        assert_eq!(p.as_str(), "p_abc123");
        assert_eq!(format!("{}", p), "p_abc123");
    }

    #[test]
    fn test_player_map_keeps_seat_order() {
        let map: PlayerMap<usize> = PlayerMap::new(&seats(), |p| p.as_str().len());
        let keys: Vec<_> = map.iter().map(|(p, _)| p.as_str().to_string()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_player_map_mutation() {
        let mut map: PlayerMap<i32> = PlayerMap::with_value(&seats(), 0);

        map[&PlayerId::new("b")] = 10;
        *map.get_mut(&PlayerId::new("c")).unwrap() += 5;

        assert_eq!(map[&PlayerId::new("a")], 0);
        assert_eq!(map[&PlayerId::new("b")], 10);
        assert_eq!(map[&PlayerId::new("c")], 5);
        assert!(map.get_mut(&PlayerId::new("z")).is_none());
    }

    #[test]
    fn test_player_map_map_preserves_keys() {
        let map: PlayerMap<Vec<u8>> = PlayerMap::new(&seats(), |_| vec![1, 2, 3]);
        let counts = map.map(|_, v| v.len());

        assert_eq!(counts.len(), 3);
        assert!(counts.values().all(|&n| n == 3));
    }

    #[test]
    fn test_player_map_serialization_round_trip() {
        let map: PlayerMap<i32> = PlayerMap::with_value(&seats(), 7);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    fn test_roster_automation() {
        let roster: Roster = vec![Player::human("ana"), Player::bot("bot_1")]
            .into_iter()
            .collect();

        assert!(!roster.is_automated(&PlayerId::new("ana")));
        assert!(roster.is_automated(&PlayerId::new("bot_1")));
        assert!(!roster.is_automated(&PlayerId::new("stranger")));
        assert_eq!(roster.ids(), vec![PlayerId::new("ana"), PlayerId::new("bot_1")]);
    }

    #[test]
    #[should_panic(expected = "no entry for player")]
    fn test_player_map_missing_index_panics() {
        let map: PlayerMap<i32> = PlayerMap::with_value(&seats(), 0);
        let _ = map[&PlayerId::new("nobody")];
    }
}
