//! What one dominoes player is allowed to see.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::DominoMode;
use super::game::{DominoTable, Dominoes, Partnership};
use super::tiles::Tile;
use crate::core::{GameResult, GameState, PlayerId, PlayerMap};
use crate::view::{project_holdings, Holding, ReserveView, Sanitize};

/// Redacted dominoes table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DominoView {
    pub mode: DominoMode,
    pub hand_number: u32,
    pub line: Vector<Tile>,
    pub open_ends: Option<(u8, u8)>,
    pub hands: PlayerMap<Holding<Tile>>,
    pub boneyard: ReserveView,
    pub passes_in_a_row: usize,
    pub last_tile_played: Option<Tile>,
    pub last_move_was_capicu: bool,
    pub hand_wins: PlayerMap<u32>,
    pub teams: Vec<Partnership>,
    pub starting_player: PlayerId,
    pub hand_result: Option<GameResult>,
}

impl Sanitize for Dominoes {
    type View = DominoView;

    fn project_table(&self, state: &GameState<DominoTable>, viewer: &PlayerId) -> DominoView {
        let table = &state.table;
        DominoView {
            mode: table.mode,
            hand_number: table.hand_number,
            line: table.line.clone(),
            open_ends: table.open_ends(),
            hands: project_holdings(&table.hands, viewer),
            boneyard: ReserveView::of(&table.boneyard),
            passes_in_a_row: table.passes_in_a_row,
            last_tile_played: table.last_tile_played,
            last_move_was_capicu: table.last_move_was_capicu,
            hand_wins: table.hand_wins.clone(),
            teams: table.teams.clone(),
            starting_player: table.starting_player.clone(),
            hand_result: table.hand_result.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;
    use crate::rules::RulesEngine;
    use crate::view::sanitize;

    #[test]
    fn test_hands_and_boneyard_collapse() {
        let engine = Dominoes::default();
        let players = vec![PlayerId::new("a"), PlayerId::new("b")];
        let state = engine
            .create_new_game(&players, "classic", &mut GameRng::new(21))
            .unwrap();

        let view = sanitize(&engine, &state, &PlayerId::new("a"));

        assert_eq!(
            view.table.hands[&PlayerId::new("a")].items(),
            Some(state.table.hands[&PlayerId::new("a")].as_slice())
        );
        assert_eq!(view.table.hands[&PlayerId::new("b")], Holding::Hidden { count: 7 });
        assert_eq!(view.table.boneyard.count, 14);

        let json = serde_json::to_value(&view).unwrap();
        assert!(json["table"].get("boneyard").unwrap().get("count").is_some());
    }

    #[test]
    fn test_views_are_independent() {
        let engine = Dominoes::default();
        let players = vec![PlayerId::new("a"), PlayerId::new("b"), PlayerId::new("c")];
        let state = engine
            .create_new_game(&players, "", &mut GameRng::new(2))
            .unwrap();
        let before = state.clone();

        let for_a = sanitize(&engine, &state, &PlayerId::new("a"));
        let for_b = sanitize(&engine, &state, &PlayerId::new("b"));

        assert_eq!(state, before);
        assert_ne!(for_a.table.hands, for_b.table.hands);
        assert_eq!(for_a, sanitize(&engine, &state, &PlayerId::new("a")));
    }
}
