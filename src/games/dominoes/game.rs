//! Dominoes rules.
//!
//! ## Hand Flow
//!
//! 1. Shuffle the set into the boneyard and deal each player a hand.
//! 2. The holder of the highest double (else the highest tile) opens.
//! 3. On your turn: play a tile that matches an open end; with nothing
//!    playable, draw from the boneyard (turn continues) or, once it is
//!    empty, pass.
//! 4. The hand ends when someone plays their last tile, or when every
//!    player has passed in a row (blocked).
//! 5. `hand_finished` holds the table until every seated player sends
//!    `ready_for_next_hand`, unless the hand decided the game.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::{DominoConfig, DominoMode};
use super::tiles::{fits, new_boneyard, open_ends, orient, pip_total, Side, Tile};
use super::GAME_TYPE;
use crate::core::{Acknowledgment, GameResult, GameRng, GameState, GameStatus, PlayerId, PlayerMap, TeamId};
use crate::rules::{require_seats, CreateError, MoveError, RulesEngine};

/// Dominoes game state.
pub type DominoState = GameState<DominoTable>;

/// Bonus for going out with the double blank in team mode.
pub const DOUBLE_BLANK_BONUS: u32 = 100;

/// Team points for winning hand `hand_number` by domino.
#[must_use]
pub fn hand_points(hand_number: u32) -> u32 {
    match hand_number {
        0 | 1 => 100,
        2 => 75,
        3 => 50,
        _ => 25,
    }
}

/// A fixed partnership in team mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partnership {
    pub id: TeamId,
    pub members: Vec<PlayerId>,
    pub score: u32,
}

/// Dominoes-specific state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DominoTable {
    /// Scoring mode.
    pub mode: DominoMode,
    /// 1-based hand counter.
    pub hand_number: u32,
    /// Line of play, left to right. Public.
    pub line: Vector<Tile>,
    /// Player hands, owner-only.
    pub hands: PlayerMap<Vec<Tile>>,
    /// Undrawn tiles, drawn from the end. Hidden from everyone.
    pub boneyard: Vec<Tile>,
    /// Consecutive passes since the last tile was played.
    pub passes_in_a_row: usize,
    /// The most recently placed tile, as oriented on the line.
    pub last_tile_played: Option<Tile>,
    /// True if the hand was closed with a tile matching both ends.
    pub last_move_was_capicu: bool,
    /// Hands won per player.
    pub hand_wins: PlayerMap<u32>,
    /// Partnerships; empty outside team mode.
    pub teams: Vec<Partnership>,
    /// Who opened the current hand.
    pub starting_player: PlayerId,
    /// Team that opens the next hand after a tied block.
    pub next_hand_starter: Option<TeamId>,
    /// Result of the last finished hand.
    pub hand_result: Option<GameResult>,
}

impl DominoTable {
    /// Open `(left, right)` values, or `None` before the first tile.
    #[must_use]
    pub fn open_ends(&self) -> Option<(u8, u8)> {
        open_ends(&self.line)
    }

    /// The partnership a player belongs to.
    #[must_use]
    pub fn team_of(&self, player: &PlayerId) -> Option<&Partnership> {
        self.teams.iter().find(|t| t.members.contains(player))
    }

    /// Tiles in a player's hand that fit the line.
    #[must_use]
    pub fn playable_tiles(&self, player: &PlayerId) -> Vec<Tile> {
        self.hands
            .get(player)
            .map(|hand| hand.iter().copied().filter(|&t| fits(t, &self.line)).collect())
            .unwrap_or_default()
    }

    /// Check if a player holds any playable tile.
    #[must_use]
    pub fn can_play(&self, player: &PlayerId) -> bool {
        self.hands
            .get(player)
            .is_some_and(|hand| hand.iter().any(|&t| fits(t, &self.line)))
    }

    fn award(&mut self, team: TeamId, points: u32) -> u32 {
        match self.teams.iter_mut().find(|t| t.id == team) {
            Some(partnership) => {
                partnership.score += points;
                partnership.score
            }
            None => 0,
        }
    }

    fn score_line(&self) -> String {
        self.teams
            .iter()
            .map(|t| format!("{}: {}", t.id.to_string().to_uppercase(), t.score))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Dominoes move grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DominoMove {
    /// Place a tile. Without a side, the right end is tried first.
    Play {
        tile: Tile,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        side: Option<Side>,
    },
    /// Take a tile from the boneyard.
    Draw,
    /// Give up the turn.
    Pass,
    /// Acknowledge a finished hand.
    ReadyForNextHand,
}

/// Dominoes rule module: 2-4 players, individual or partnership scoring.
#[derive(Clone, Debug, Default)]
pub struct Dominoes {
    config: DominoConfig,
}

fn take_tile(hand: &mut Vec<Tile>, tile: Tile) -> Option<Tile> {
    let index = hand.iter().position(|t| t.same_piece(tile))?;
    Some(hand.remove(index))
}

impl Dominoes {
    /// Create a rule module with the given table rules.
    #[must_use]
    pub fn new(config: DominoConfig) -> Self {
        Self { config }
    }

    /// Table rules in effect.
    #[must_use]
    pub fn config(&self) -> &DominoConfig {
        &self.config
    }

    /// Seat of the opener among `candidates` and, if chosen by a double,
    /// that double. The highest double wins, else the highest pip tile.
    fn find_opener(&self, state: &DominoState, candidates: &[PlayerId]) -> (usize, Option<Tile>) {
        let seats: Vec<usize> = candidates.iter().filter_map(|p| state.seat_of(p)).collect();
        let hand = |seat: usize| {
            state
                .table
                .hands
                .get(&state.players[seat])
                .map(Vec::as_slice)
                .unwrap_or_default()
        };

        for pips in (0..=self.config.max_pips).rev() {
            let double = Tile::new(pips, pips);
            if let Some(&seat) = seats.iter().find(|&&seat| hand(seat).contains(&double)) {
                return (seat, Some(double));
            }
        }

        let mut best: Option<(usize, u32)> = None;
        for &seat in &seats {
            for tile in hand(seat) {
                if best.map_or(true, |(_, pips)| tile.pips() > pips) {
                    best = Some((seat, tile.pips()));
                }
            }
        }
        let fallback = seats.first().copied().unwrap_or(0);
        (best.map_or(fallback, |(seat, _)| seat), None)
    }

    fn deal_hand(&self, state: &mut DominoState, starter_team: Option<TeamId>, rng: &mut GameRng) {
        let table = &mut state.table;
        table.boneyard = new_boneyard(self.config.max_pips, rng);
        table.line = Vector::new();
        table.passes_in_a_row = 0;
        table.last_tile_played = None;
        table.last_move_was_capicu = false;
        for (_, hand) in table.hands.iter_mut() {
            hand.clear();
        }
        let players = state.players.clone();
        for _ in 0..self.config.hand_size {
            for player in &players {
                if let Some(tile) = state.table.boneyard.pop() {
                    state.table.hands[player].push(tile);
                }
            }
        }

        // After a tied block the starting team keeps the lead; its member
        // with the best tile opens.
        let candidates = starter_team
            .and_then(|team| state.table.teams.iter().find(|t| t.id == team))
            .map_or_else(|| players.clone(), |t| t.members.clone());
        let (seat, opening_double) = self.find_opener(state, &candidates);

        let starter = players[seat].clone();
        state.current_turn_index = seat;
        state.table.starting_player = starter.clone();
        state.push_log(format!(
            "Hand #{}: {starter} goes first.",
            state.table.hand_number
        ));

        if let (true, Some(double)) = (self.config.autoplay_opening_double, opening_double) {
            take_tile(&mut state.table.hands[&starter], double);
            state.table.line.push_back(double);
            state.table.last_tile_played = Some(double);
            state.push_log(format!("{starter} opens with {double}."));
            state.advance_turn();
        }
    }

    fn start_next_hand(&self, state: &mut DominoState, rng: &mut GameRng) {
        state.resume();
        state.table.hand_number += 1;
        state.table.hand_result = None;
        let starter_team = state.table.next_hand_starter.take();
        state.push_log(format!(
            "All players ready. Starting hand #{}.",
            state.table.hand_number
        ));
        self.deal_hand(state, starter_team, rng);
    }

    /// Record a finished hand and either pause for acknowledgments or end
    /// the game.
    fn close_hand(&self, state: &mut DominoState, hand_result: GameResult, game_winner: Option<GameResult>) {
        let hand = state.table.hand_number;
        state.table.hand_result = Some(hand_result);
        match game_winner {
            Some(winner) => {
                state.push_log(format!("🏆 {winner} wins the game!"));
                info!(game = GAME_TYPE, hand, %winner, "game finished");
                state.finish(winner);
            }
            None => {
                state.push_log(format!(
                    "Hand #{hand} complete. Waiting for all players to be ready."
                ));
                info!(game = GAME_TYPE, hand, "hand finished");
                state.begin_intermission(GameStatus::HandFinished);
            }
        }
    }

    /// Credit a hand to a single player in classic mode.
    fn credit_player(&self, state: &mut DominoState, player: &PlayerId) -> Option<GameResult> {
        state.table.hand_wins[player] += 1;
        let wins = state.table.hand_wins[player];
        (wins >= self.config.classic_wins_needed).then(|| GameResult::Player(player.clone()))
    }

    /// Credit points to a partnership in team mode.
    fn credit_team(&self, state: &mut DominoState, team: TeamId, points: u32) -> Option<GameResult> {
        let score = state.table.award(team, points);
        let summary = state.table.score_line();
        state.push_log(format!("Scores: {summary}."));
        (score >= self.config.team_target).then_some(GameResult::Team(team))
    }

    fn win_by_domino(&self, state: &mut DominoState, actor: &PlayerId, placed: Tile) {
        let hand = state.table.hand_number;
        let capicu = state.table.line.len() > 1
            && state
                .table
                .open_ends()
                .is_some_and(|(left, right)| placed.has(left) && placed.has(right));
        if capicu {
            state.table.last_move_was_capicu = true;
            state.push_log("¡Capicú!");
        }

        let team = state.table.team_of(actor).map(|t| t.id);
        match (state.table.mode, team) {
            (DominoMode::Boricua, Some(team)) => {
                let mut points = hand_points(hand);
                if placed.same_piece(Tile::new(0, 0)) {
                    points += DOUBLE_BLANK_BONUS;
                    state.push_log(format!("¡La chucha! +{DOUBLE_BLANK_BONUS} bonus points."));
                }
                state.push_log(format!(
                    "{} wins hand #{hand} for {points} points.",
                    GameResult::Team(team)
                ));
                let winner = self.credit_team(state, team, points);
                self.close_hand(state, GameResult::Team(team), winner);
            }
            _ => {
                if placed.same_piece(Tile::new(0, 0)) {
                    state.push_log("¡CHUCHAZO!");
                }
                state.push_log(format!("{actor} wins hand #{hand}!"));
                let winner = self.credit_player(state, actor);
                self.close_hand(state, GameResult::Player(actor.clone()), winner);
            }
        }
    }

    fn resolve_block(&self, state: &mut DominoState) {
        state.push_log("The game is blocked.");

        if state.table.mode.is_team_mode() && state.table.teams.len() == 2 {
            let totals: Vec<(TeamId, u32)> = state
                .table
                .teams
                .iter()
                .map(|t| {
                    let pips = t.members.iter().map(|p| pip_total(&state.table.hands[p])).sum();
                    (t.id, pips)
                })
                .collect();
            let (first, second) = (totals[0], totals[1]);
            let remaining = first.1 + second.1;

            if first.1 == second.1 {
                state.push_log(format!("Both teams hold {} pips. Nobody scores.", first.1));
                let starter_team = state.table.team_of(&state.table.starting_player).map(|t| t.id);
                if let Some(team) = starter_team {
                    state.push_log(format!("{} started this hand and starts the next.", GameResult::Team(team)));
                }
                state.table.next_hand_starter = starter_team;
                self.close_hand(state, GameResult::Draw, None);
                return;
            }

            let (winner, loser) = if first.1 < second.1 { (first, second) } else { (second, first) };
            state.push_log(format!(
                "{} holds fewer pips ({} vs {}) and scores {remaining} points.",
                GameResult::Team(winner.0),
                winner.1,
                loser.1
            ));
            let game_winner = self.credit_team(state, winner.0, remaining);
            self.close_hand(state, GameResult::Team(winner.0), game_winner);
            return;
        }

        let totals: Vec<(PlayerId, u32)> = state
            .table
            .hands
            .iter()
            .map(|(p, hand)| (p.clone(), pip_total(hand)))
            .collect();
        let lowest = totals.iter().map(|(_, pips)| *pips).min().unwrap_or(0);
        let mut holders = totals.iter().filter(|(_, pips)| *pips == lowest);

        match (holders.next(), holders.next()) {
            (Some((player, pips)), None) => {
                let player = player.clone();
                state.push_log(format!("{player} wins the blocked hand with {pips} pips."));
                let winner = self.credit_player(state, &player);
                self.close_hand(state, GameResult::Player(player), winner);
            }
            _ => {
                state.push_log(format!("Blocked hand tied at {lowest} pips. Nobody wins."));
                self.close_hand(state, GameResult::Draw, None);
            }
        }
    }

    fn play(
        &self,
        state: &DominoState,
        actor: &PlayerId,
        tile: Tile,
        side: Option<Side>,
    ) -> Result<DominoState, MoveError> {
        self.check_turn(state, actor)?;
        let hand = state
            .table
            .hands
            .get(actor)
            .ok_or_else(|| MoveError::invalid("no hand for this player"))?;
        if !hand.iter().any(|t| t.same_piece(tile)) {
            return Err(MoveError::invalid("you don't have that tile"));
        }

        let line = &state.table.line;
        let (placed, side) = if line.is_empty() {
            (tile, None)
        } else {
            let side = match side {
                Some(side) => side,
                None => [Side::Right, Side::Left]
                    .into_iter()
                    .find(|&s| orient(tile, line, s).is_some())
                    .ok_or_else(|| MoveError::invalid("tile doesn't match either end"))?,
            };
            let placed = orient(tile, line, side)
                .ok_or_else(|| MoveError::invalid(format!("tile doesn't match the {side} end")))?;
            (placed, Some(side))
        };

        let mut next = state.clone();
        let table = &mut next.table;
        take_tile(&mut table.hands[actor], tile);
        match side {
            Some(Side::Left) => table.line.push_front(placed),
            _ => table.line.push_back(placed),
        }
        table.passes_in_a_row = 0;
        table.last_tile_played = Some(placed);
        let went_out = table.hands[actor].is_empty();

        next.push_log(match side {
            None => format!("{actor} opens with {placed}."),
            Some(side) => format!("{actor} plays {placed} on the {side}."),
        });

        if went_out {
            self.win_by_domino(&mut next, actor, placed);
        } else {
            next.advance_turn();
        }
        Ok(next)
    }

    fn draw(&self, state: &DominoState, actor: &PlayerId) -> Result<DominoState, MoveError> {
        self.check_turn(state, actor)?;
        if state.table.can_play(actor) {
            return Err(MoveError::invalid("you have a playable tile"));
        }
        if state.table.boneyard.is_empty() {
            return Err(MoveError::invalid("the boneyard is empty, you must pass"));
        }

        let mut next = state.clone();
        if let Some(tile) = next.table.boneyard.pop() {
            next.table.hands[actor].push(tile);
        }
        next.push_log(format!("{actor} draws a tile."));
        Ok(next)
    }

    fn pass(&self, state: &DominoState, actor: &PlayerId) -> Result<DominoState, MoveError> {
        self.check_turn(state, actor)?;
        if state.table.can_play(actor) {
            return Err(MoveError::invalid("you have a playable tile"));
        }
        if !state.table.boneyard.is_empty() {
            return Err(MoveError::invalid("you must draw from the boneyard"));
        }

        let mut next = state.clone();
        next.table.passes_in_a_row += 1;
        next.push_log(format!("{actor} passes."));
        if next.table.passes_in_a_row >= next.player_count() {
            self.resolve_block(&mut next);
        } else {
            next.advance_turn();
        }
        Ok(next)
    }

    fn ready(&self, state: &DominoState, actor: &PlayerId, rng: &mut GameRng) -> Result<DominoState, MoveError> {
        self.check_acknowledgment(state, actor, GameStatus::HandFinished, "no hand is finished")?;

        let mut next = state.clone();
        match next.acknowledge(actor) {
            Acknowledgment::Duplicate => return Ok(next),
            Acknowledgment::Recorded { ready, total } => {
                next.push_log(format!("{actor} is ready for the next hand ({ready}/{total})."));
            }
        }
        if next.all_ready() {
            self.start_next_hand(&mut next, rng);
        }
        Ok(next)
    }
}

impl RulesEngine for Dominoes {
    type Table = DominoTable;
    type Move = DominoMove;

    fn game_type(&self) -> &'static str {
        GAME_TYPE
    }

    fn player_range(&self) -> std::ops::RangeInclusive<usize> {
        2..=4
    }

    fn create_new_game(
        &self,
        players: &[PlayerId],
        mode: &str,
        rng: &mut GameRng,
    ) -> Result<DominoState, CreateError> {
        self.check_players(players)?;
        let mode = DominoMode::parse(mode)?;
        if mode.is_team_mode() && players.len() != 4 {
            return Err(CreateError::player_count(GAME_TYPE, "exactly 4 (two teams of 2)", players.len()));
        }

        let teams = if mode.is_team_mode() {
            players
                .chunks(2)
                .zip(1u8..)
                .map(|(members, id)| Partnership {
                    id: TeamId(id),
                    members: members.to_vec(),
                    score: 0,
                })
                .collect()
        } else {
            Vec::new()
        };

        let table = DominoTable {
            mode,
            hand_number: 1,
            line: Vector::new(),
            hands: PlayerMap::with_default(players),
            boneyard: Vec::new(),
            passes_in_a_row: 0,
            last_tile_played: None,
            last_move_was_capicu: false,
            hand_wins: PlayerMap::with_value(players, 0),
            teams,
            starting_player: players[0].clone(),
            next_hand_starter: None,
            hand_result: None,
        };
        let mut state = GameState::new(players.to_vec(), table);
        state.push_log(format!("Dominoes started ({mode} mode)."));
        self.deal_hand(&mut state, None, rng);

        debug!(game = GAME_TYPE, players = players.len(), %mode, "game created");
        Ok(state)
    }

    fn check_table(&self, state: &DominoState) -> Result<(), MoveError> {
        let table = &state.table;
        require_seats(&table.hands, &state.players, "hands")?;
        require_seats(&table.hand_wins, &state.players, "hand_wins")?;
        match table.teams.iter().flat_map(|t| &t.members).find(|p| !state.is_seated(p)) {
            Some(member) => Err(MoveError::invalid(format!("team member {member} is not seated"))),
            None => Ok(()),
        }
    }

    fn apply_move(
        &self,
        state: &DominoState,
        actor: &PlayerId,
        mv: &DominoMove,
        rng: &mut GameRng,
    ) -> Result<DominoState, MoveError> {
        let next = match *mv {
            DominoMove::Play { tile, side } => self.play(state, actor, tile, side)?,
            DominoMove::Draw => self.draw(state, actor)?,
            DominoMove::Pass => self.pass(state, actor)?,
            DominoMove::ReadyForNextHand => self.ready(state, actor, rng)?,
        };
        debug!(game = GAME_TYPE, %actor, action = ?mv, status = %next.status, "move applied");
        Ok(next)
    }
}
