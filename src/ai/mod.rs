//! AI move selection for automated players.
//!
//! Deliberately simple, per-game heuristics. No search.

pub mod policy;

pub use policy::MovePolicy;
