//! Domino tiles and the line of play.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// A domino tile, serialized as `[a, b]`.
///
/// Orientation matters on the line of play (`.0` faces left, `.1` faces
/// right). In a hand it does not; compare with `same_piece`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile(pub u8, pub u8);

impl Tile {
    /// Create a tile.
    #[must_use]
    pub const fn new(a: u8, b: u8) -> Self {
        Self(a, b)
    }

    /// Total pips on the tile.
    #[must_use]
    pub fn pips(self) -> u32 {
        u32::from(self.0) + u32::from(self.1)
    }

    /// Check if both halves are equal.
    #[must_use]
    pub fn is_double(self) -> bool {
        self.0 == self.1
    }

    /// Check if either half shows `value`.
    #[must_use]
    pub fn has(self, value: u8) -> bool {
        self.0 == value || self.1 == value
    }

    /// The tile turned around.
    #[must_use]
    pub fn flipped(self) -> Self {
        Self(self.1, self.0)
    }

    /// Check if two tiles are the same physical piece in either orientation.
    #[must_use]
    pub fn same_piece(self, other: Tile) -> bool {
        self == other || self == other.flipped()
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}|{}]", self.0, self.1)
    }
}

/// End of the line of play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Every tile from `[0|0]` to `[max|max]`, each once.
#[must_use]
pub fn full_set(max_pips: u8) -> Vec<Tile> {
    (0..=max_pips)
        .flat_map(|a| (a..=max_pips).map(move |b| Tile::new(a, b)))
        .collect()
}

/// A shuffled full set. Tiles are drawn from the end.
#[must_use]
pub fn new_boneyard(max_pips: u8, rng: &mut GameRng) -> Vec<Tile> {
    let mut tiles = full_set(max_pips);
    rng.shuffle(&mut tiles);
    tiles
}

/// Open `(left, right)` values of the line, or `None` while it is empty.
#[must_use]
pub fn open_ends(line: &Vector<Tile>) -> Option<(u8, u8)> {
    Some((line.front()?.0, line.back()?.1))
}

/// Orient `tile` to join the line at `side`, if it fits there.
#[must_use]
pub fn orient(tile: Tile, line: &Vector<Tile>, side: Side) -> Option<Tile> {
    let (left, right) = open_ends(line)?;
    match side {
        Side::Left if tile.1 == left => Some(tile),
        Side::Left if tile.0 == left => Some(tile.flipped()),
        Side::Right if tile.0 == right => Some(tile),
        Side::Right if tile.1 == right => Some(tile.flipped()),
        _ => None,
    }
}

/// Check if a tile can be played on the line.
#[must_use]
pub fn fits(tile: Tile, line: &Vector<Tile>) -> bool {
    match open_ends(line) {
        None => true,
        Some((left, right)) => tile.has(left) || tile.has(right),
    }
}

/// Total pips across a set of tiles.
#[must_use]
pub fn pip_total(tiles: &[Tile]) -> u32 {
    tiles.iter().map(|t| t.pips()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(tiles: &[(u8, u8)]) -> Vector<Tile> {
        tiles.iter().map(|&(a, b)| Tile::new(a, b)).collect()
    }

    #[test]
    fn test_double_six_set() {
        let set = full_set(6);
        assert_eq!(set.len(), 28);
        assert_eq!(set.iter().filter(|t| t.is_double()).count(), 7);
        assert_eq!(pip_total(&set), 168);
    }

    #[test]
    fn test_open_ends() {
        assert_eq!(open_ends(&Vector::new()), None);
        assert_eq!(open_ends(&line(&[(6, 6)])), Some((6, 6)));
        assert_eq!(open_ends(&line(&[(2, 6), (6, 6), (6, 4)])), Some((2, 4)));
    }

    #[test]
    fn test_orient() {
        let board = line(&[(2, 6), (6, 4)]);

        assert_eq!(orient(Tile::new(5, 2), &board, Side::Left), Some(Tile::new(5, 2)));
        assert_eq!(orient(Tile::new(2, 5), &board, Side::Left), Some(Tile::new(5, 2)));
        assert_eq!(orient(Tile::new(1, 4), &board, Side::Right), Some(Tile::new(4, 1)));
        assert_eq!(orient(Tile::new(1, 4), &board, Side::Left), None);
        assert_eq!(orient(Tile::new(1, 1), &Vector::new(), Side::Left), None);
    }

    #[test]
    fn test_fits() {
        let board = line(&[(3, 5)]);
        assert!(fits(Tile::new(0, 3), &board));
        assert!(fits(Tile::new(5, 5), &board));
        assert!(!fits(Tile::new(1, 2), &board));
        assert!(fits(Tile::new(1, 2), &Vector::new()));
    }

    #[test]
    fn test_tile_identity_and_encoding() {
        assert!(Tile::new(3, 4).same_piece(Tile::new(4, 3)));
        assert!(!Tile::new(3, 4).same_piece(Tile::new(3, 3)));
        assert_eq!(Tile::new(6, 1).to_string(), "[6|1]");
        assert_eq!(serde_json::to_string(&Tile::new(6, 1)).unwrap(), "[6,1]");
    }
}
