//! Automated blackjack player.

use super::game::{Blackjack, BlackjackMove, BlackjackTable};
use crate::ai::MovePolicy;
use crate::core::{GameRng, GameState, GameStatus, PlayerId};

/// Hit below the configured threshold, otherwise stand.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThresholdPolicy;

impl MovePolicy<Blackjack> for ThresholdPolicy {
    fn select_move(
        &self,
        engine: &Blackjack,
        state: &GameState<BlackjackTable>,
        actor: &PlayerId,
        _rng: &mut GameRng,
    ) -> Option<BlackjackMove> {
        match state.status {
            GameStatus::RoundFinished if state.is_seated(actor) && !state.ready.contains(actor) => {
                Some(BlackjackMove::ReadyForNextRound)
            }
            GameStatus::InProgress if state.current_player() == Some(actor) => {
                let hand = state.table.hands.get(actor)?;
                if !hand.is_playing() {
                    return None;
                }
                if hand.value() < engine.config().hit_threshold {
                    Some(BlackjackMove::Hit)
                } else {
                    Some(BlackjackMove::Stand)
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::blackjack::cards::{Card, Rank, Suit};
    use crate::games::blackjack::config::BlackjackConfig;
    use crate::rules::RulesEngine;

    fn state_with_hand(engine: &Blackjack, ranks: [Rank; 2]) -> GameState<BlackjackTable> {
        let players = vec![PlayerId::new("bot")];
        let mut state = engine
            .create_new_game(&players, "", &mut GameRng::new(2))
            .unwrap();
        let hand = &mut state.table.hands[&PlayerId::new("bot")];
        hand.cards = ranks.iter().map(|&r| Card::new(r, Suit::Clubs)).collect();
        hand.status = Default::default();
        state.status = GameStatus::InProgress;
        state.current_turn_index = 0;
        state
    }

    #[test]
    fn test_hits_below_threshold() {
        let engine = Blackjack::default();
        let state = state_with_hand(&engine, [Rank::Ten, Rank::Six]);
        let mv = ThresholdPolicy.select_move(&engine, &state, &PlayerId::new("bot"), &mut GameRng::new(0));
        assert_eq!(mv, Some(BlackjackMove::Hit));
    }

    #[test]
    fn test_stands_at_threshold() {
        let engine = Blackjack::default();
        let state = state_with_hand(&engine, [Rank::Ten, Rank::Seven]);
        let mv = ThresholdPolicy.select_move(&engine, &state, &PlayerId::new("bot"), &mut GameRng::new(0));
        assert_eq!(mv, Some(BlackjackMove::Stand));
    }

    #[test]
    fn test_threshold_comes_from_config() {
        let engine = Blackjack::new(BlackjackConfig::new().with_hit_threshold(12));
        let state = state_with_hand(&engine, [Rank::Ten, Rank::Two]);
        let mv = ThresholdPolicy.select_move(&engine, &state, &PlayerId::new("bot"), &mut GameRng::new(0));
        assert_eq!(mv, Some(BlackjackMove::Stand));
    }

    #[test]
    fn test_acknowledges_once() {
        let engine = Blackjack::default();
        let mut state = state_with_hand(&engine, [Rank::Ten, Rank::Seven]);
        let bot = PlayerId::new("bot");
        state.begin_intermission(GameStatus::RoundFinished);

        assert_eq!(
            ThresholdPolicy.select_move(&engine, &state, &bot, &mut GameRng::new(0)),
            Some(BlackjackMove::ReadyForNextRound)
        );
        state.acknowledge(&bot);
        assert_eq!(ThresholdPolicy.select_move(&engine, &state, &bot, &mut GameRng::new(0)), None);
    }
}
