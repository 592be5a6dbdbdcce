//! Automated dominoes player.

use super::game::{DominoMove, DominoTable, Dominoes};
use super::tiles::{Side, Tile};
use crate::ai::MovePolicy;
use crate::core::{GameRng, GameState, GameStatus, PlayerId};

/// Play the first tile that fits, else draw, else pass.
///
/// On an empty line it opens with its heaviest tile. Otherwise it takes the
/// first tile in hand order that fits, on the left end when it fits both.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegalPolicy;

impl FirstLegalPolicy {
    fn choose_play(table: &DominoTable, hand: &[Tile]) -> Option<DominoMove> {
        let Some((left, right)) = table.open_ends() else {
            // First heaviest tile wins ties.
            let opener = hand
                .iter()
                .copied()
                .reduce(|best, t| if t.pips() > best.pips() { t } else { best })?;
            return Some(DominoMove::Play {
                tile: opener,
                side: None,
            });
        };

        hand.iter().find_map(|&tile| {
            let side = if tile.has(left) {
                Side::Left
            } else if tile.has(right) {
                Side::Right
            } else {
                return None;
            };
            Some(DominoMove::Play {
                tile,
                side: Some(side),
            })
        })
    }
}

impl MovePolicy<Dominoes> for FirstLegalPolicy {
    fn select_move(
        &self,
        _engine: &Dominoes,
        state: &GameState<DominoTable>,
        actor: &PlayerId,
        _rng: &mut GameRng,
    ) -> Option<DominoMove> {
        match state.status {
            GameStatus::HandFinished if state.is_seated(actor) && !state.ready.contains(actor) => {
                Some(DominoMove::ReadyForNextHand)
            }
            GameStatus::InProgress if state.current_player() == Some(actor) => {
                let hand = state.table.hands.get(actor)?;
                Self::choose_play(&state.table, hand).or(Some(if state.table.boneyard.is_empty() {
                    DominoMove::Pass
                } else {
                    DominoMove::Draw
                }))
            }
            _ => None,
        }
    }
}
