//! What one blackjack player is allowed to see.

use serde::{Deserialize, Serialize};

use super::cards::Card;
use super::config::BlackjackMode;
use super::game::{Blackjack, BlackjackTable, HandStatus, RoundOutcome};
use crate::core::{GameState, GameStatus, PlayerId, PlayerMap};
use crate::view::{Holding, ReserveView, Sanitize, Visibility};

/// A card position in a partially concealed row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "face", rename_all = "snake_case")]
pub enum CardSlot {
    Up { card: Card },
    Down,
}

/// A player's hand as seen by the viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandView {
    pub cards: Holding<Card>,
    pub status: HandStatus,
    /// Hand value, only on the viewer's own hand.
    pub value: Option<u32>,
}

/// The dealer's hand as seen by everyone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerView {
    pub cards: Vec<CardSlot>,
    /// Value of the face-up cards only.
    pub value: u32,
}

/// Redacted blackjack table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackjackView {
    pub mode: BlackjackMode,
    pub wins_needed: u32,
    pub round_number: u32,
    pub shoe: ReserveView,
    pub hands: PlayerMap<HandView>,
    pub dealer: DealerView,
    pub round_wins: PlayerMap<u32>,
    pub scores: PlayerMap<i32>,
    pub outcomes: Option<PlayerMap<RoundOutcome>>,
}

fn project_dealer(table: &BlackjackTable, status: GameStatus) -> DealerView {
    if status != GameStatus::InProgress {
        return DealerView {
            cards: table.dealer.iter().map(|&card| CardSlot::Up { card }).collect(),
            value: table.dealer_value(),
        };
    }

    // Only the up-card counts while the hole card is face down, so an ace
    // shows as 11.
    let cards = table
        .dealer
        .iter()
        .enumerate()
        .map(|(i, &card)| if i == 0 { CardSlot::Up { card } } else { CardSlot::Down })
        .collect();
    let value = table.dealer.first().map_or(0, |card| card.rank.value());
    DealerView { cards, value }
}

impl Sanitize for Blackjack {
    type View = BlackjackView;

    fn project_table(&self, state: &GameState<BlackjackTable>, viewer: &PlayerId) -> BlackjackView {
        let table = &state.table;
        let hands = table.hands.map(|owner, hand| {
            let cards = Holding::project(&hand.cards, Visibility::OwnerOnly, Some(owner), viewer);
            let value = cards.items().map(|_| hand.value());
            HandView {
                cards,
                status: hand.status,
                value,
            }
        });

        BlackjackView {
            mode: table.mode,
            wins_needed: table.wins_needed,
            round_number: table.round_number,
            shoe: ReserveView::of(&table.shoe),
            hands,
            dealer: project_dealer(table, state.status),
            round_wins: table.round_wins.clone(),
            scores: table.scores.clone(),
            outcomes: table.outcomes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;
    use crate::games::blackjack::cards::{Rank, Suit};
    use crate::rules::RulesEngine;
    use crate::view::sanitize;

    fn game() -> (Blackjack, GameState<BlackjackTable>) {
        let engine = Blackjack::default();
        let players = vec![PlayerId::new("ana"), PlayerId::new("ben")];
        let mut state = engine
            .create_new_game(&players, "best_of_5", &mut GameRng::new(5))
            .unwrap();
        state.status = GameStatus::InProgress;
        state.table.dealer = [Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::Nine, Suit::Clubs)]
            .into_iter()
            .collect();
        (engine, state)
    }

    #[test]
    fn test_own_hand_visible_others_counted() {
        let (engine, state) = game();
        let view = sanitize(&engine, &state, &PlayerId::new("ana"));

        let own = &view.table.hands[&PlayerId::new("ana")];
        assert_eq!(own.cards.items().map(<[Card]>::len), Some(2));
        assert!(own.value.is_some());

        let other = &view.table.hands[&PlayerId::new("ben")];
        assert_eq!(other.cards, Holding::Hidden { count: 2 });
        assert_eq!(other.value, None);
        assert_eq!(view.table.shoe.count, state.table.shoe.len());
    }

    #[test]
    fn test_hole_card_hidden_in_progress() {
        let (engine, state) = game();
        let view = engine.project_table(&state, &PlayerId::new("ana"));

        assert_eq!(view.dealer.cards[1], CardSlot::Down);
        assert_eq!(view.dealer.value, 11);
        assert_eq!(state.table.dealer_value(), 20);
    }

    #[test]
    fn test_hole_card_revealed_after_round() {
        let (engine, mut state) = game();
        state.begin_intermission(GameStatus::RoundFinished);
        let view = engine.project_table(&state, &PlayerId::new("ana"));

        assert!(view.dealer.cards.iter().all(|slot| matches!(slot, CardSlot::Up { .. })));
        assert_eq!(view.dealer.value, 20);
    }

    #[test]
    fn test_view_json_has_no_hidden_cards() {
        let (engine, state) = game();
        let view = sanitize(&engine, &state, &PlayerId::new("ana"));
        let json = serde_json::to_string(&view.table.dealer).unwrap();

        assert!(!json.contains(r#""rank":"9""#));
    }

    #[test]
    fn test_log_does_not_reveal_hit_card() {
        use crate::games::blackjack::{BlackjackMove, PlayerHand};

        let (engine, mut state) = game();
        let ana = PlayerId::new("ana");
        state.table.hands[&ana] = PlayerHand {
            cards: [Card::new(Rank::Five, Suit::Hearts), Card::new(Rank::Six, Suit::Hearts)]
                .into_iter()
                .collect(),
            status: HandStatus::Playing,
        };
        state.table.shoe = vec![Card::new(Rank::Seven, Suit::Clubs)];
        state.current_turn_index = 0;

        let next = engine
            .apply_move(&state, &ana, &BlackjackMove::Hit, &mut GameRng::new(0))
            .unwrap();
        assert_eq!(next.status, GameStatus::InProgress);

        let view = sanitize(&engine, &next, &PlayerId::new("ben"));
        assert_eq!(view.table.hands[&ana].cards, Holding::Hidden { count: 3 });
        assert_eq!(view.log.last().map(String::as_str), Some("ana hits."));
        assert!(view.log[state.log.len()..]
            .iter()
            .all(|line| !line.contains("7♣") && !line.contains("18")));
    }
}
