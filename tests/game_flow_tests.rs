//! End-to-end rule flows through the public API.
//!
//! Each test sets up a table by hand so the outcome does not depend on a
//! particular shuffle.

use tabletop_engine::core::{GameRng, GameState, GameStatus, PlayerId, PlayerMap};
use tabletop_engine::games::blackjack::{
    Blackjack, BlackjackMove, BlackjackTable, Card, HandStatus, PlayerHand, Rank, RoundOutcome, Suit,
};
use tabletop_engine::games::dominoes::{DominoMove, DominoTable, Dominoes, Side, Tile};
use tabletop_engine::rules::{CreateError, MoveError, RulesEngine};

fn ids(names: &[&str]) -> Vec<PlayerId> {
    names.iter().map(|n| PlayerId::new(*n)).collect()
}

fn card(rank: Rank) -> Card {
    Card { rank, suit: Suit::Spades }
}

fn tiles(pairs: &[(u8, u8)]) -> Vec<Tile> {
    pairs.iter().map(|&(a, b)| Tile::new(a, b)).collect()
}

fn blackjack_table(hands: &[(&str, &[Rank])], dealer: &[Rank], draws: &[Rank]) -> GameState<BlackjackTable> {
    let names: Vec<&str> = hands.iter().map(|(n, _)| *n).collect();
    let mut state = Blackjack::default()
        .create_new_game(&ids(&names), "best_of_5", &mut GameRng::new(8))
        .unwrap();
    for (name, ranks) in hands {
        state.table.hands[&PlayerId::new(*name)] = PlayerHand {
            cards: ranks.iter().map(|&r| card(r)).collect(),
            status: HandStatus::Playing,
        };
    }
    state.table.dealer = dealer.iter().map(|&r| card(r)).collect();
    state.table.shoe = draws.iter().rev().map(|&r| card(r)).collect();
    state.table.round_wins = PlayerMap::with_value(&state.players, 0);
    state.table.scores = PlayerMap::with_value(&state.players, 0);
    state.table.outcomes = None;
    state.status = GameStatus::InProgress;
    state.ready.clear();
    state.winner = None;
    state.current_turn_index = 0;
    state
}

fn domino_table(names: &[&str], hands: &[&[(u8, u8)]], line: &[(u8, u8)], boneyard: &[(u8, u8)]) -> GameState<DominoTable> {
    let mut state = Dominoes::default()
        .create_new_game(&ids(names), "classic", &mut GameRng::new(21))
        .unwrap();
    for (name, hand) in names.iter().zip(hands) {
        state.table.hands[&PlayerId::new(*name)] = tiles(hand);
    }
    state.table.line = tiles(line).into_iter().collect();
    state.table.boneyard = tiles(boneyard);
    state.table.starting_player = PlayerId::new(names[0]);
    state.current_turn_index = 0;
    state
}

// =============================================================================
// Creation
// =============================================================================

#[test]
fn test_player_count_outside_range_is_rejected() {
    let mut rng = GameRng::new(1);

    let too_many = ids(&["a", "b", "c", "d", "e"]);
    assert!(matches!(
        Dominoes::default().create_new_game(&too_many, "classic", &mut rng),
        Err(CreateError::InvalidPlayerCount { got: 5, .. })
    ));
    assert!(matches!(
        Blackjack::default().create_new_game(&[], "", &mut rng),
        Err(CreateError::InvalidPlayerCount { got: 0, .. })
    ));
    assert!(matches!(
        Dominoes::default().create_new_game(&ids(&["a", "b", "c"]), "boricua", &mut rng),
        Err(CreateError::InvalidPlayerCount { got: 3, .. })
    ));
}

#[test]
fn test_same_seed_same_deal() {
    let players = ids(&["a", "b", "c"]);
    let first = Dominoes::default()
        .create_new_game(&players, "classic", &mut GameRng::new(99))
        .unwrap();
    let second = Dominoes::default()
        .create_new_game(&players, "classic", &mut GameRng::new(99))
        .unwrap();
    assert_eq!(first, second);
}

// =============================================================================
// Dominoes
// =============================================================================

#[test]
fn test_double_opens_empty_line() {
    let state = domino_table(&["a", "b"], &[&[(6, 6), (1, 2)], &[(3, 4)]], &[], &[]);
    let before = state.log.len();

    let next = Dominoes::default()
        .apply_move(
            &state,
            &PlayerId::new("a"),
            &DominoMove::Play { tile: Tile::new(6, 6), side: None },
            &mut GameRng::new(0),
        )
        .unwrap();

    assert_eq!(next.table.line.iter().copied().collect::<Vec<_>>(), tiles(&[(6, 6)]));
    assert_eq!(next.current_turn_index, 1);
    assert_eq!(next.log.len(), before + 1);
    assert_eq!(next.table.hands[&PlayerId::new("a")], tiles(&[(1, 2)]));
}

#[test]
fn test_pass_while_holding_playable_tile() {
    let state = domino_table(&["a", "b"], &[&[(4, 1)], &[(2, 2)]], &[(3, 4)], &[]);
    let snapshot = state.clone();

    let result = Dominoes::default().apply_move(&state, &PlayerId::new("a"), &DominoMove::Pass, &mut GameRng::new(0));

    assert!(matches!(result, Err(MoveError::InvalidMove(_))));
    assert_eq!(state, snapshot);
    assert_eq!(state.current_turn_index, 0);
}

#[test]
fn test_hand_restarts_after_last_acknowledgment() {
    let engine = Dominoes::default();
    let mut rng = GameRng::new(4);
    let state = domino_table(&["a", "b"], &[&[(5, 5)], &[(1, 2), (0, 0)]], &[(5, 3)], &[]);

    let state = engine
        .apply_move(
            &state,
            &PlayerId::new("a"),
            &DominoMove::Play { tile: Tile::new(5, 5), side: Some(Side::Left) },
            &mut rng,
        )
        .unwrap();
    assert_eq!(state.status, GameStatus::HandFinished);
    assert_eq!(state.table.hand_wins[&PlayerId::new("a")], 1);

    let state = engine
        .apply_move(&state, &PlayerId::new("b"), &DominoMove::ReadyForNextHand, &mut rng)
        .unwrap();
    assert_eq!(state.status, GameStatus::HandFinished);
    assert_eq!(state.table.hand_number, 1);

    let state = engine
        .apply_move(&state, &PlayerId::new("a"), &DominoMove::ReadyForNextHand, &mut rng)
        .unwrap();
    assert_eq!(state.status, GameStatus::InProgress);
    assert_eq!(state.table.hand_number, 2);
    assert!(state.table.line.is_empty());
    assert_eq!(state.table.passes_in_a_row, 0);
    assert!(state.table.hand_result.is_none());
    assert!(state.ready.is_empty());
    assert!(state.table.hands.values().all(|h| h.len() == 7));
    assert_eq!(state.table.hand_wins[&PlayerId::new("a")], 1);
    assert_eq!(state.table.hand_wins[&PlayerId::new("b")], 0);
}

#[test]
fn test_moves_after_game_over_rejected() {
    let engine = Dominoes::default();
    let mut state = domino_table(&["a", "b"], &[&[(5, 5)], &[(1, 2)]], &[(5, 3)], &[]);
    state.table.hand_wins[&PlayerId::new("a")] = 2;

    let finished = engine
        .apply_move(
            &state,
            &PlayerId::new("a"),
            &DominoMove::Play { tile: Tile::new(5, 5), side: None },
            &mut GameRng::new(0),
        )
        .unwrap();
    assert_eq!(finished.status, GameStatus::Finished);

    for actor in ["a", "b"] {
        let result = engine.apply_move(&finished, &PlayerId::new(actor), &DominoMove::Pass, &mut GameRng::new(0));
        assert_eq!(result, Err(MoveError::GameAlreadyOver));
    }
}

// =============================================================================
// Blackjack
// =============================================================================

#[test]
fn test_bust_then_dealer_resolves_once() {
    let engine = Blackjack::default();
    let mut rng = GameRng::new(0);
    let state = blackjack_table(
        &[("a", &[Rank::Ten, Rank::Six]), ("b", &[Rank::Ten, Rank::Five])],
        &[Rank::Ten, Rank::Seven],
        &[Rank::King, Rank::Queen],
    );

    let state = engine.apply_move(&state, &PlayerId::new("a"), &BlackjackMove::Hit, &mut rng).unwrap();
    assert_eq!(state.table.hands[&PlayerId::new("a")].status, HandStatus::Busted);
    assert_eq!(state.current_turn_index, 1);
    assert_eq!(state.status, GameStatus::InProgress);

    let state = engine.apply_move(&state, &PlayerId::new("b"), &BlackjackMove::Hit, &mut rng).unwrap();
    assert_eq!(state.status, GameStatus::RoundFinished);
    assert_eq!(state.table.dealer.len(), 2);

    let outcomes = state.table.outcomes.clone().unwrap();
    assert_eq!(outcomes[&PlayerId::new("a")], RoundOutcome::Loss);
    assert_eq!(outcomes[&PlayerId::new("b")], RoundOutcome::Loss);
    assert_eq!(state.table.scores[&PlayerId::new("a")], -1);
}

#[test]
fn test_round_restarts_after_last_acknowledgment() {
    let engine = Blackjack::default();
    let mut rng = GameRng::new(13);
    let state = blackjack_table(
        &[("a", &[Rank::Ten, Rank::Nine]), ("b", &[Rank::Ten, Rank::Two])],
        &[Rank::Ten, Rank::Seven],
        &[],
    );

    let state = engine.apply_move(&state, &PlayerId::new("a"), &BlackjackMove::Stand, &mut rng).unwrap();
    let state = engine.apply_move(&state, &PlayerId::new("b"), &BlackjackMove::Stand, &mut rng).unwrap();
    assert_eq!(state.status, GameStatus::RoundFinished);
    assert_eq!(state.table.round_wins[&PlayerId::new("a")], 1);

    // Gameplay moves are refused during the pause.
    let refused = engine.apply_move(&state, &PlayerId::new("a"), &BlackjackMove::Hit, &mut rng);
    assert!(matches!(refused, Err(MoveError::InvalidMove(_))));

    let state = engine
        .apply_move(&state, &PlayerId::new("a"), &BlackjackMove::ReadyForNextRound, &mut rng)
        .unwrap();
    assert_eq!(state.status, GameStatus::RoundFinished);

    let state = engine
        .apply_move(&state, &PlayerId::new("b"), &BlackjackMove::ReadyForNextRound, &mut rng)
        .unwrap();
    assert_eq!(state.table.round_number, 2);
    assert!(state.table.hands.values().all(|h| h.cards.len() >= 2));
    assert!(state.table.round_wins[&PlayerId::new("a")] >= 1);
    assert!(state.table.scores[&PlayerId::new("b")] <= 0);
}
