//! Game-type registry.
//!
//! Hosts address games by a string key and move states around as
//! `serde_json::Value`s. Each registered `GameModule` decodes into its
//! typed state, runs the typed rules, and encodes the result back, so a
//! new game is one `register` call and nothing else changes.

use std::ops::RangeInclusive;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::ai::MovePolicy;
use crate::core::{EngineConfig, GameRng, GameState, PlayerId, Roster};
use crate::games::blackjack::{self, Blackjack, ThresholdPolicy};
use crate::games::dominoes::{self, Dominoes, FirstLegalPolicy};
use crate::rules::{EngineError, MoveError, RulesEngine};
use crate::session::{CascadeReport, Orchestrator, TurnOutcome};
use crate::view::{sanitize, Sanitize};

/// A cascade report in boundary encoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedReport {
    /// Final state, for persistence.
    pub state: Value,
    /// Applied moves, external first.
    pub steps: Vec<Value>,
    /// Log entries appended during the call, for incremental display.
    pub log_tail: Vec<String>,
}

/// Outcome of `GameModule::play`.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayOutcome {
    Accepted(EncodedReport),
    Rejected { actor: PlayerId, error: MoveError },
}

/// A rule module behind the host boundary encoding.
pub trait GameModule: Send + Sync {
    /// Registry key.
    fn game_type(&self) -> &'static str;

    /// Allowed player counts.
    fn player_range(&self) -> RangeInclusive<usize>;

    /// Create a game state.
    fn create_new_game(&self, players: &[PlayerId], mode: &str, rng: &mut GameRng) -> Result<Value, EngineError>;

    /// Apply one move without running automated players.
    fn apply_move(&self, state: &Value, actor: &PlayerId, mv: &Value, rng: &mut GameRng) -> Result<Value, EngineError>;

    /// Project a state for one viewer.
    fn sanitize(&self, state: &Value, viewer: &PlayerId) -> Result<Value, EngineError>;

    /// The automated move for `actor`, if the game is waiting on them.
    fn select_ai_move(&self, state: &Value, actor: &PlayerId, rng: &mut GameRng) -> Result<Option<Value>, EngineError>;

    /// Create a game and run the opening cascade.
    fn start(&self, roster: &Roster, mode: &str, rng: &mut GameRng) -> Result<EncodedReport, EngineError>;

    /// Apply an external move and run the cascade.
    fn play(
        &self,
        state: &Value,
        roster: &Roster,
        actor: &PlayerId,
        mv: &Value,
        rng: &mut GameRng,
    ) -> Result<PlayOutcome, EngineError>;
}

/// `GameModule` for a typed engine and policy.
pub struct Module<E, P> {
    orchestrator: Orchestrator<E, P>,
}

impl<E, P> Module<E, P>
where
    E: Sanitize,
    P: MovePolicy<E>,
{
    /// Wrap an engine and its policy with the default engine config.
    pub fn new(engine: E, policy: P) -> Self {
        Self {
            orchestrator: Orchestrator::new(engine, policy),
        }
    }

    /// Replace the engine config.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.orchestrator = self.orchestrator.with_config(config);
        self
    }

    /// Decode a host-held state and refuse one the rules cannot act on.
    fn decode_state(&self, state: &Value) -> Result<GameState<E::Table>, EngineError> {
        let state = GameState::<E::Table>::deserialize(state)?;
        if let Err(error) = self.orchestrator.engine().check_state(&state) {
            warn!(game = self.orchestrator.engine().game_type(), %error, "inconsistent state refused");
            return Err(error.into());
        }
        Ok(state)
    }

    fn decode_move(&self, mv: &Value) -> Result<E::Move, EngineError> {
        E::Move::deserialize(mv).map_err(|err| {
            EngineError::Move(MoveError::invalid(format!("unrecognized move: {err}")))
        })
    }

    fn encode_report(&self, report: CascadeReport<E::Table, E::Move>) -> Result<EncodedReport, EngineError> {
        let steps = report
            .steps
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EncodedReport {
            state: serde_json::to_value(&report.state)?,
            steps,
            log_tail: report.log_tail,
        })
    }
}

impl<E, P> GameModule for Module<E, P>
where
    E: Sanitize + Send + Sync,
    P: MovePolicy<E>,
{
    fn game_type(&self) -> &'static str {
        self.orchestrator.engine().game_type()
    }

    fn player_range(&self) -> RangeInclusive<usize> {
        self.orchestrator.engine().player_range()
    }

    fn create_new_game(&self, players: &[PlayerId], mode: &str, rng: &mut GameRng) -> Result<Value, EngineError> {
        let state = self.orchestrator.engine().create_new_game(players, mode, rng)?;
        Ok(serde_json::to_value(&state)?)
    }

    fn apply_move(&self, state: &Value, actor: &PlayerId, mv: &Value, rng: &mut GameRng) -> Result<Value, EngineError> {
        let state = self.decode_state(state)?;
        let mv = self.decode_move(mv)?;
        let next = self.orchestrator.engine().apply_move(&state, actor, &mv, rng)?;
        Ok(serde_json::to_value(&next)?)
    }

    fn sanitize(&self, state: &Value, viewer: &PlayerId) -> Result<Value, EngineError> {
        let state = self.decode_state(state)?;
        let view = sanitize(self.orchestrator.engine(), &state, viewer);
        Ok(serde_json::to_value(&view)?)
    }

    fn select_ai_move(&self, state: &Value, actor: &PlayerId, rng: &mut GameRng) -> Result<Option<Value>, EngineError> {
        let state = self.decode_state(state)?;
        self.orchestrator
            .policy()
            .select_move(self.orchestrator.engine(), &state, actor, rng)
            .map(|mv| serde_json::to_value(&mv))
            .transpose()
            .map_err(EngineError::from)
    }

    fn start(&self, roster: &Roster, mode: &str, rng: &mut GameRng) -> Result<EncodedReport, EngineError> {
        let report = self.orchestrator.start(roster, mode, rng)?;
        self.encode_report(report)
    }

    fn play(
        &self,
        state: &Value,
        roster: &Roster,
        actor: &PlayerId,
        mv: &Value,
        rng: &mut GameRng,
    ) -> Result<PlayOutcome, EngineError> {
        let state = self.decode_state(state)?;
        let mv = match self.decode_move(mv) {
            Ok(mv) => mv,
            Err(EngineError::Move(error)) => {
                return Ok(PlayOutcome::Rejected {
                    actor: actor.clone(),
                    error,
                })
            }
            Err(err) => return Err(err),
        };

        match self.orchestrator.submit(&state, roster, actor, &mv, rng)? {
            TurnOutcome::Accepted(report) => Ok(PlayOutcome::Accepted(self.encode_report(report)?)),
            TurnOutcome::Rejected { actor, error } => Ok(PlayOutcome::Rejected { actor, error }),
        }
    }
}

/// String-keyed table of game modules.
#[derive(Default)]
pub struct GameRegistry {
    modules: FxHashMap<String, Box<dyn GameModule>>,
}

impl GameRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in games and the default engine config.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Registry with the built-in games.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let mut registry = Self::new();
        registry.register(
            blackjack::GAME_TYPE,
            Module::new(Blackjack::default(), ThresholdPolicy).with_config(config.clone()),
        );
        registry.register(
            dominoes::GAME_TYPE,
            Module::new(Dominoes::default(), FirstLegalPolicy).with_config(config),
        );
        registry
    }

    /// Add a module under `key`. An existing entry is never replaced; returns
    /// `false` if the key was taken.
    pub fn register(&mut self, key: impl Into<String>, module: impl GameModule + 'static) -> bool {
        let key = key.into();
        if self.modules.contains_key(&key) {
            warn!(game = %key, "game type already registered");
            return false;
        }
        self.modules.insert(key, Box::new(module));
        true
    }

    /// Look up a module.
    pub fn get(&self, key: &str) -> Result<&dyn GameModule, EngineError> {
        self.modules
            .get(key)
            .map(|m| m.as_ref())
            .ok_or_else(|| EngineError::UnknownGameType(key.to_string()))
    }

    /// Check if a key is registered.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.modules.contains_key(key)
    }

    /// Registered keys, sorted.
    #[must_use]
    pub fn game_types(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.modules.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of registered games.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Check if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    // === Inbound operations by key ===

    pub fn create_new_game(
        &self,
        game_type: &str,
        players: &[PlayerId],
        mode: &str,
        rng: &mut GameRng,
    ) -> Result<Value, EngineError> {
        self.get(game_type)?.create_new_game(players, mode, rng)
    }

    pub fn apply_move(
        &self,
        game_type: &str,
        state: &Value,
        actor: &PlayerId,
        mv: &Value,
        rng: &mut GameRng,
    ) -> Result<Value, EngineError> {
        self.get(game_type)?.apply_move(state, actor, mv, rng)
    }

    pub fn sanitize(&self, game_type: &str, state: &Value, viewer: &PlayerId) -> Result<Value, EngineError> {
        self.get(game_type)?.sanitize(state, viewer)
    }

    pub fn select_ai_move(
        &self,
        game_type: &str,
        state: &Value,
        actor: &PlayerId,
        rng: &mut GameRng,
    ) -> Result<Option<Value>, EngineError> {
        self.get(game_type)?.select_ai_move(state, actor, rng)
    }
}

impl std::fmt::Debug for GameRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameRegistry")
            .field("game_types", &self.game_types())
            .finish()
    }
}
