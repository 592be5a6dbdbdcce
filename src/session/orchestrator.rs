//! Turn orchestration with a bounded automated-player cascade.
//!
//! ## Flow
//!
//! 1. Apply the external move. A rejection is returned as
//!    `TurnOutcome::Rejected`; the caller's state is untouched.
//! 2. While the game is waiting on an automated player, ask the policy for
//!    a move and apply it.
//! 3. Stop when the game waits only on external players, or has finished.
//!
//! The loop is capped by `EngineConfig::max_cascade_steps`. Exceeding the
//! cap, or a policy producing no move or an illegal one, is an internal
//! fault and is returned as an `EngineError`, never as a player rejection.

use serde::Serialize;
use tracing::{debug, error, warn};

use crate::ai::MovePolicy;
use crate::core::{EngineConfig, GameRng, GameState, PlayerId, Roster};
use crate::rules::{EngineError, MoveError, RulesEngine};

/// One applied move.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CascadeStep<M> {
    /// Who moved.
    pub actor: PlayerId,
    /// The move.
    #[serde(rename = "move")]
    pub mv: M,
    /// True if the move came from the policy.
    pub automated: bool,
}

/// Result of an accepted move and the cascade that followed it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CascadeReport<T, M> {
    /// The state after the last applied move.
    pub state: GameState<T>,
    /// Every applied move in order, external first.
    pub steps: Vec<CascadeStep<M>>,
    /// Log entries appended during this call.
    pub log_tail: Vec<String>,
}

impl<T, M> CascadeReport<T, M> {
    /// Number of automated moves applied.
    #[must_use]
    pub fn automated_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.automated).count()
    }
}

/// Report type for a given rules engine.
pub type Report<E> = CascadeReport<<E as RulesEngine>::Table, <E as RulesEngine>::Move>;

/// Outcome of submitting an external move.
#[derive(Clone, Debug, PartialEq)]
pub enum TurnOutcome<T, M> {
    /// The move was applied; the cascade ran to a stopping point.
    Accepted(CascadeReport<T, M>),
    /// The move was rejected. Relay `error` to `actor` only.
    Rejected { actor: PlayerId, error: MoveError },
}

/// Outcome type for a given rules engine.
pub type Outcome<E> = TurnOutcome<<E as RulesEngine>::Table, <E as RulesEngine>::Move>;

impl<T, M> TurnOutcome<T, M> {
    /// The report, if accepted.
    #[must_use]
    pub fn accepted(self) -> Option<CascadeReport<T, M>> {
        match self {
            TurnOutcome::Accepted(report) => Some(report),
            TurnOutcome::Rejected { .. } => None,
        }
    }

    /// Check if the move was rejected.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, TurnOutcome::Rejected { .. })
    }
}

/// Sequences moves for one game type.
///
/// Stateless across calls: every method takes the latest state and returns
/// the next one. The host serializes calls per game instance.
#[derive(Clone, Debug)]
pub struct Orchestrator<E, P> {
    engine: E,
    policy: P,
    config: EngineConfig,
}

impl<E, P> Orchestrator<E, P>
where
    E: RulesEngine,
    P: MovePolicy<E>,
{
    /// Create an orchestrator with the default config.
    pub fn new(engine: E, policy: P) -> Self {
        Self {
            engine,
            policy,
            config: EngineConfig::default(),
        }
    }

    /// Replace the config.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The rules engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The automated-player policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// The config in effect.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Create a game for the roster and run the opening cascade.
    pub fn start(&self, roster: &Roster, mode: &str, rng: &mut GameRng) -> Result<Report<E>, EngineError> {
        let players = roster.ids();
        let state = self.engine.create_new_game(&players, mode, rng)?;
        debug!(game = self.engine.game_type(), players = players.len(), mode, "game started");
        self.cascade(state, roster, Vec::new(), 0, rng)
    }

    /// Apply an external move, then run the cascade.
    pub fn submit(
        &self,
        state: &GameState<E::Table>,
        roster: &Roster,
        actor: &PlayerId,
        mv: &E::Move,
        rng: &mut GameRng,
    ) -> Result<Outcome<E>, EngineError> {
        let mark = state.log.len();
        let next = match self.engine.apply_move(state, actor, mv, rng) {
            Ok(next) => next,
            Err(error) => {
                debug!(game = self.engine.game_type(), %actor, %error, "move rejected");
                return Ok(TurnOutcome::Rejected {
                    actor: actor.clone(),
                    error,
                });
            }
        };

        let steps = vec![CascadeStep {
            actor: actor.clone(),
            mv: mv.clone(),
            automated: false,
        }];
        self.cascade(next, roster, steps, mark, rng)
            .map(TurnOutcome::Accepted)
    }

    /// The first automated player the game is waiting on.
    pub fn next_automated(&self, state: &GameState<E::Table>, roster: &Roster) -> Option<PlayerId> {
        self.engine
            .awaiting(state)
            .into_iter()
            .find(|p| roster.is_automated(p))
    }

    fn cascade(
        &self,
        mut state: GameState<E::Table>,
        roster: &Roster,
        mut steps: Vec<CascadeStep<E::Move>>,
        mark: usize,
        rng: &mut GameRng,
    ) -> Result<Report<E>, EngineError> {
        let game = self.engine.game_type();
        let mut automated = 0;

        while let Some(actor) = self.next_automated(&state, roster) {
            if automated >= self.config.max_cascade_steps {
                error!(game, steps = automated, "automated cascade exceeded its cap");
                return Err(EngineError::CascadeOverrun { steps: automated });
            }

            let Some(mv) = self.policy.select_move(&self.engine, &state, &actor, rng) else {
                warn!(game, %actor, "policy produced no move");
                return Err(EngineError::NoAutomatedMove(actor));
            };
            state = match self.engine.apply_move(&state, &actor, &mv, rng) {
                Ok(next) => next,
                Err(error) => {
                    error!(game, %actor, action = ?mv, %error, "automated move rejected");
                    return Err(EngineError::AutomatedMoveRejected { actor, error });
                }
            };

            automated += 1;
            debug!(game, %actor, step = automated, status = %state.status, "automated move applied");
            steps.push(CascadeStep {
                actor,
                mv,
                automated: true,
            });
        }

        let log_tail = state.log.tail(mark);
        Ok(CascadeReport {
            state,
            steps,
            log_tail,
        })
    }
}
