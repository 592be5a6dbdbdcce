//! Concrete rule modules.
//!
//! Each game lives in its own module with the same layout: a rules engine
//! (`RulesEngine`), a typed per-viewer projection (`Sanitize`), and a move
//! policy for automated players (`MovePolicy`).

pub mod blackjack;
pub mod dominoes;
