//! Session layer: applies moves and drives automated players.

pub mod orchestrator;

pub use orchestrator::{CascadeReport, CascadeStep, Orchestrator, Outcome, Report, TurnOutcome};
