//! Building blocks for per-viewer projections.
//!
//! Two kinds of private information show up in every game:
//! - **Holdings**: one player's hand, keyed by player in a `PlayerMap`.
//!   The owner sees the contents; everyone else sees a count.
//! - **Reserves**: a shared undealt pool (deck, boneyard). Nobody sees the
//!   contents; everyone sees a count.
//!
//! Games build their views out of these so the redaction rule is written
//! once and cannot be forgotten for a new field of the same shape.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap};

/// Who may see the contents of a piece of state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    /// Visible to everyone (line of play, scores).
    Public,
    /// Visible only to the owning player (hand).
    OwnerOnly,
    /// Visible to nobody (deck, boneyard, face-down card).
    Hidden,
}

impl Visibility {
    /// Check whether `viewer` may see contents owned by `owner`.
    #[must_use]
    pub fn permits(self, owner: Option<&PlayerId>, viewer: &PlayerId) -> bool {
        match self {
            Visibility::Public => true,
            Visibility::OwnerOnly => owner == Some(viewer),
            Visibility::Hidden => false,
        }
    }
}

/// A holding as seen by one viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "visibility", rename_all = "snake_case")]
pub enum Holding<T> {
    /// The viewer may see the contents.
    Visible { items: Vec<T> },
    /// Only the size is disclosed.
    Hidden { count: usize },
}

impl<T: Clone> Holding<T> {
    /// Project `items` for a viewer under the given visibility.
    #[must_use]
    pub fn project(items: &[T], visibility: Visibility, owner: Option<&PlayerId>, viewer: &PlayerId) -> Self {
        if visibility.permits(owner, viewer) {
            Holding::Visible {
                items: items.to_vec(),
            }
        } else {
            Holding::Hidden { count: items.len() }
        }
    }

    /// Number of items, visible or not.
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Holding::Visible { items } => items.len(),
            Holding::Hidden { count } => *count,
        }
    }

    /// Contents, if visible.
    #[must_use]
    pub fn items(&self) -> Option<&[T]> {
        match self {
            Holding::Visible { items } => Some(items),
            Holding::Hidden { .. } => None,
        }
    }
}

/// A shared hidden pool, collapsed to its size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveView {
    /// Items left in the pool.
    pub count: usize,
}

impl ReserveView {
    /// Collapse a reserve to its size.
    #[must_use]
    pub fn of<T>(reserve: &[T]) -> Self {
        Self {
            count: reserve.len(),
        }
    }
}

/// Project owner-only holdings: the viewer keeps their own entry, every
/// other entry becomes a count.
pub fn project_holdings<T, H>(holdings: &PlayerMap<H>, viewer: &PlayerId) -> PlayerMap<Holding<T>>
where
    T: Clone,
    H: AsRef<[T]>,
{
    holdings.map(|owner, items| Holding::project(items.as_ref(), Visibility::OwnerOnly, Some(owner), viewer))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats() -> Vec<PlayerId> {
        vec![PlayerId::new("a"), PlayerId::new("b")]
    }

    #[test]
    fn test_visibility_rules() {
        let a = PlayerId::new("a");
        let b = PlayerId::new("b");

        assert!(Visibility::Public.permits(None, &a));
        assert!(Visibility::OwnerOnly.permits(Some(&a), &a));
        assert!(!Visibility::OwnerOnly.permits(Some(&a), &b));
        assert!(!Visibility::OwnerOnly.permits(None, &a));
        assert!(!Visibility::Hidden.permits(Some(&a), &a));
    }

    #[test]
    fn test_project_holdings() {
        let holdings: PlayerMap<Vec<u8>> = PlayerMap::new(&seats(), |p| {
            if p.as_str() == "a" {
                vec![1, 2, 3]
            } else {
                vec![4, 5]
            }
        });

        let view = project_holdings::<u8, _>(&holdings, &PlayerId::new("a"));

        assert_eq!(view[&PlayerId::new("a")].items(), Some(&[1u8, 2, 3][..]));
        assert_eq!(view[&PlayerId::new("b")], Holding::Hidden { count: 2 });
        assert_eq!(view[&PlayerId::new("b")].count(), 2);
    }

    #[test]
    fn test_spectator_sees_only_counts() {
        let holdings: PlayerMap<Vec<u8>> = PlayerMap::with_value(&seats(), vec![9, 9]);
        let view = project_holdings::<u8, _>(&holdings, &PlayerId::new("spectator"));

        assert!(view.values().all(|h| h.items().is_none()));
    }

    #[test]
    fn test_hidden_holding_serializes_without_contents() {
        let hidden: Holding<u8> = Holding::Hidden { count: 4 };
        let json = serde_json::to_string(&hidden).unwrap();
        assert_eq!(json, r#"{"visibility":"hidden","count":4}"#);
    }

    #[test]
    fn test_reserve_view() {
        assert_eq!(ReserveView::of(&[1, 2, 3]), ReserveView { count: 3 });
        assert_eq!(ReserveView::of::<u8>(&[]).count, 0);
    }
}
