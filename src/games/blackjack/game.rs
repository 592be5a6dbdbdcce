//! Blackjack rules.
//!
//! ## Round Flow
//!
//! 1. Two cards to every player and the dealer. A dealt 21 stands.
//! 2. Players act in seat order: `hit` until they stand or bust.
//! 3. When no hand is still `playing`, the dealer draws to a fixed value and
//!    every hand is settled against it.
//! 4. The round pauses in `round_finished` until every seated player sends
//!    `ready_for_next_round`, or the game ends once someone reaches the
//!    round-win threshold.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use super::cards::{hand_value, new_shoe, Card};
use super::config::{BlackjackConfig, BlackjackMode};
use super::{GAME_TYPE, TARGET};
use crate::core::{Acknowledgment, GameResult, GameRng, GameState, GameStatus, PlayerId, PlayerMap};
use crate::rules::{require_seats, CreateError, MoveError, RulesEngine};

/// Blackjack game state.
pub type BlackjackState = GameState<BlackjackTable>;

/// Inline capacity for a hand; longer hands spill to the heap.
pub type HandCards = SmallVec<[Card; 6]>;

/// Status of one player's hand within a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandStatus {
    #[default]
    Playing,
    Stood,
    Busted,
}

/// One player's cards and status.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerHand {
    pub cards: HandCards,
    pub status: HandStatus,
}

impl PlayerHand {
    /// Best value of the hand.
    #[must_use]
    pub fn value(&self) -> u32 {
        hand_value(&self.cards)
    }

    /// Check if the player can still act this round.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == HandStatus::Playing
    }
}

impl AsRef<[Card]> for PlayerHand {
    fn as_ref(&self) -> &[Card] {
        &self.cards
    }
}

/// How a hand settled against the dealer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    Win,
    Push,
    Loss,
}

/// Blackjack-specific state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackjackTable {
    /// Match length.
    pub mode: BlackjackMode,
    /// Round wins that end the game.
    pub wins_needed: u32,
    /// 1-based round counter.
    pub round_number: u32,
    /// Undealt cards, dealt from the end. Hidden from everyone.
    pub shoe: Vec<Card>,
    /// Player hands, owner-only.
    pub hands: PlayerMap<PlayerHand>,
    /// Dealer cards. The second card is face down until the round settles.
    pub dealer: HandCards,
    /// Round wins per player.
    pub round_wins: PlayerMap<u32>,
    /// Net score per player: +1 per win, -1 per loss.
    pub scores: PlayerMap<i32>,
    /// Settlement of the last finished round.
    pub outcomes: Option<PlayerMap<RoundOutcome>>,
}

impl BlackjackTable {
    /// Value of the dealer's full hand.
    #[must_use]
    pub fn dealer_value(&self) -> u32 {
        hand_value(&self.dealer)
    }
}

/// Blackjack move grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BlackjackMove {
    /// Take another card.
    Hit,
    /// Keep the current hand.
    Stand,
    /// Acknowledge a finished round.
    ReadyForNextRound,
}

/// Blackjack rule module: players against a house dealer, over a series of
/// rounds.
#[derive(Clone, Debug, Default)]
pub struct Blackjack {
    config: BlackjackConfig,
}

impl Blackjack {
    /// Create a rule module with the given table rules.
    #[must_use]
    pub fn new(config: BlackjackConfig) -> Self {
        Self { config }
    }

    /// Table rules in effect.
    #[must_use]
    pub fn config(&self) -> &BlackjackConfig {
        &self.config
    }

    /// Take the next card from the shoe, shuffling in a fresh shoe when empty.
    fn draw(&self, state: &mut BlackjackState, rng: &mut GameRng) -> Card {
        loop {
            if let Some(card) = state.table.shoe.pop() {
                return card;
            }
            state.table.shoe = new_shoe(self.config.decks, rng);
            state.push_log("The shoe is empty. A fresh shoe is shuffled in.");
        }
    }

    fn deal_round(&self, state: &mut BlackjackState, rng: &mut GameRng) {
        let players = state.players.clone();
        for _ in 0..2 {
            for player in &players {
                let card = self.draw(state, rng);
                state.table.hands[player].cards.push(card);
            }
            let card = self.draw(state, rng);
            state.table.dealer.push(card);
        }

        let up_card = state.table.dealer[0];
        state.push_log(format!(
            "Round {} dealt. Dealer shows {up_card}.",
            state.table.round_number
        ));

        for player in &players {
            let hand = &mut state.table.hands[player];
            if hand.value() == TARGET {
                hand.status = HandStatus::Stood;
                state.push_log(format!("{player} stands on the deal."));
            }
        }

        self.advance_from(state, 0, rng);
    }

    /// Give the turn to the first playing hand at or after seat `from`, or
    /// settle the round if there is none.
    fn advance_from(&self, state: &mut BlackjackState, from: usize, rng: &mut GameRng) {
        let next = (from..state.players.len())
            .find(|&i| state.table.hands.get(&state.players[i]).is_some_and(PlayerHand::is_playing));
        match next {
            Some(index) => state.current_turn_index = index,
            None => self.resolve_round(state, rng),
        }
    }

    fn resolve_round(&self, state: &mut BlackjackState, rng: &mut GameRng) {
        if let Some(hole) = state.table.dealer.get(1).copied() {
            state.push_log(format!(
                "Dealer reveals {hole} ({}).",
                state.table.dealer_value()
            ));
        }
        while state.table.dealer_value() < self.config.dealer_stands_on {
            let card = self.draw(state, rng);
            state.table.dealer.push(card);
            state.push_log(format!(
                "Dealer draws {card} ({}).",
                state.table.dealer_value()
            ));
        }

        let dealer_value = state.table.dealer_value();
        if dealer_value > TARGET {
            state.push_log(format!("Dealer busts with {dealer_value}."));
        } else {
            state.push_log(format!("Dealer stands on {dealer_value}."));
        }

        let outcomes = state.table.hands.map(|_, hand| settle(hand, dealer_value));
        for (player, outcome) in outcomes.iter() {
            let value = state.table.hands[player].value();
            let line = match outcome {
                RoundOutcome::Win => {
                    state.table.round_wins[player] += 1;
                    state.table.scores[player] += 1;
                    format!("{player} wins the round ({value} vs dealer {dealer_value}).")
                }
                RoundOutcome::Push => format!("{player} pushes with {value}."),
                RoundOutcome::Loss => {
                    state.table.scores[player] -= 1;
                    if value > TARGET {
                        format!("{player} busted and loses the round.")
                    } else {
                        format!("{player} loses the round ({value} vs dealer {dealer_value}).")
                    }
                }
            };
            state.push_log(line);
        }
        state.table.outcomes = Some(outcomes);

        let round = state.table.round_number;
        match self.match_winner(&state.table, &state.players) {
            Some((winner, wins)) => {
                state.push_log(format!("🏆 {winner} wins the game with {wins} round wins!"));
                info!(game = GAME_TYPE, round, %winner, "game finished");
                state.finish(GameResult::Player(winner));
            }
            None => {
                state.push_log(format!(
                    "Round {round} complete. Waiting for all players to be ready."
                ));
                info!(game = GAME_TYPE, round, "round finished");
                state.begin_intermission(GameStatus::RoundFinished);
            }
        }
    }

    /// The player with the most round wins, once anyone has reached the
    /// threshold. Ties go to the earliest seat.
    fn match_winner(&self, table: &BlackjackTable, players: &[PlayerId]) -> Option<(PlayerId, u32)> {
        if !table.round_wins.values().any(|&w| w >= table.wins_needed) {
            return None;
        }
        let mut leader: Option<(&PlayerId, u32)> = None;
        for player in players {
            let wins = table.round_wins[player];
            if leader.map_or(true, |(_, best)| wins > best) {
                leader = Some((player, wins));
            }
        }
        leader.map(|(p, w)| (p.clone(), w))
    }

    fn start_next_round(&self, state: &mut BlackjackState, rng: &mut GameRng) {
        state.resume();
        state.table.round_number += 1;
        for (_, hand) in state.table.hands.iter_mut() {
            *hand = PlayerHand::default();
        }
        state.table.dealer.clear();
        state.table.outcomes = None;

        if state.table.shoe.len() < self.config.reshuffle_below {
            state.table.shoe = new_shoe(self.config.decks, rng);
            state.push_log("The shoe is reshuffled.");
        }
        state.push_log(format!(
            "All players ready. Starting round {}.",
            state.table.round_number
        ));
        self.deal_round(state, rng);
    }

    /// Validate a gameplay move and return the working copy.
    fn begin_action(&self, state: &BlackjackState, actor: &PlayerId) -> Result<BlackjackState, MoveError> {
        self.check_turn(state, actor)?;
        let hand = state
            .table
            .hands
            .get(actor)
            .ok_or_else(|| MoveError::invalid("no hand for this player"))?;
        if !hand.is_playing() {
            return Err(MoveError::invalid("action not permitted in current hand status"));
        }
        Ok(state.clone())
    }

    fn end_action(&self, state: &mut BlackjackState, actor: &PlayerId, rng: &mut GameRng) {
        if !state.table.hands.get(actor).is_some_and(PlayerHand::is_playing) {
            self.advance_from(state, state.current_turn_index + 1, rng);
        }
    }

    fn hit(&self, state: &BlackjackState, actor: &PlayerId, rng: &mut GameRng) -> Result<BlackjackState, MoveError> {
        let mut next = self.begin_action(state, actor)?;
        let card = self.draw(&mut next, rng);

        let hand = &mut next.table.hands[actor];
        hand.cards.push(card);
        // Hands stay private until settlement, so the log names the action only.
        let value = hand.value();
        let line = if value > TARGET {
            hand.status = HandStatus::Busted;
            format!("{actor} hits and busts.")
        } else if value == TARGET {
            hand.status = HandStatus::Stood;
            format!("{actor} hits and stands.")
        } else {
            format!("{actor} hits.")
        };
        next.push_log(line);

        self.end_action(&mut next, actor, rng);
        Ok(next)
    }

    fn stand(&self, state: &BlackjackState, actor: &PlayerId, rng: &mut GameRng) -> Result<BlackjackState, MoveError> {
        let mut next = self.begin_action(state, actor)?;

        next.table.hands[actor].status = HandStatus::Stood;
        next.push_log(format!("{actor} stands."));

        self.end_action(&mut next, actor, rng);
        Ok(next)
    }

    fn ready(&self, state: &BlackjackState, actor: &PlayerId, rng: &mut GameRng) -> Result<BlackjackState, MoveError> {
        self.check_acknowledgment(state, actor, GameStatus::RoundFinished, "no round is finished")?;

        let mut next = state.clone();
        match next.acknowledge(actor) {
            Acknowledgment::Duplicate => return Ok(next),
            Acknowledgment::Recorded { ready, total } => {
                next.push_log(format!("{actor} is ready for the next round ({ready}/{total})."));
            }
        }
        if next.all_ready() {
            self.start_next_round(&mut next, rng);
        }
        Ok(next)
    }
}

/// Settle one hand against the dealer's final value.
fn settle(hand: &PlayerHand, dealer_value: u32) -> RoundOutcome {
    let value = hand.value();
    if hand.status == HandStatus::Busted || value > TARGET {
        RoundOutcome::Loss
    } else if dealer_value > TARGET || value > dealer_value {
        RoundOutcome::Win
    } else if value == dealer_value {
        RoundOutcome::Push
    } else {
        RoundOutcome::Loss
    }
}

impl RulesEngine for Blackjack {
    type Table = BlackjackTable;
    type Move = BlackjackMove;

    fn game_type(&self) -> &'static str {
        GAME_TYPE
    }

    fn player_range(&self) -> std::ops::RangeInclusive<usize> {
        1..=7
    }

    fn create_new_game(
        &self,
        players: &[PlayerId],
        mode: &str,
        rng: &mut GameRng,
    ) -> Result<BlackjackState, CreateError> {
        self.check_players(players)?;
        let mode = BlackjackMode::parse(mode)?;

        let table = BlackjackTable {
            mode,
            wins_needed: mode.wins_needed(),
            round_number: 1,
            shoe: new_shoe(self.config.decks, rng),
            hands: PlayerMap::with_default(players),
            dealer: HandCards::new(),
            round_wins: PlayerMap::with_value(players, 0),
            scores: PlayerMap::with_value(players, 0),
            outcomes: None,
        };
        let mut state = GameState::new(players.to_vec(), table);
        state.push_log(format!(
            "Blackjack started ({mode}). First to {} round wins takes the game.",
            mode.wins_needed()
        ));
        self.deal_round(&mut state, rng);

        debug!(game = GAME_TYPE, players = players.len(), %mode, "game created");
        Ok(state)
    }

    fn check_table(&self, state: &BlackjackState) -> Result<(), MoveError> {
        let table = &state.table;
        require_seats(&table.hands, &state.players, "hands")?;
        require_seats(&table.round_wins, &state.players, "round_wins")?;
        require_seats(&table.scores, &state.players, "scores")?;
        if let Some(outcomes) = &table.outcomes {
            require_seats(outcomes, &state.players, "outcomes")?;
        }
        Ok(())
    }

    fn apply_move(
        &self,
        state: &BlackjackState,
        actor: &PlayerId,
        mv: &BlackjackMove,
        rng: &mut GameRng,
    ) -> Result<BlackjackState, MoveError> {
        let next = match mv {
            BlackjackMove::Hit => self.hit(state, actor, rng)?,
            BlackjackMove::Stand => self.stand(state, actor, rng)?,
            BlackjackMove::ReadyForNextRound => self.ready(state, actor, rng)?,
        };
        debug!(game = GAME_TYPE, %actor, action = ?mv, status = %next.status, "move applied");
        Ok(next)
    }
}
