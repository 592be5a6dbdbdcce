//! Information hiding: what each viewer is allowed to see.
//!
//! ## Key Types
//!
//! - `Visibility`: public / owner-only / hidden
//! - `Holding`: a player's holding, either visible or collapsed to a count
//! - `ReserveView`: a shared hidden pool collapsed to a count
//! - `Sanitize`: per-game typed projection of the table
//! - `ProjectedState`: the per-viewer state handed to display

pub mod projection;
pub mod sanitizer;

pub use projection::{project_holdings, Holding, ReserveView, Visibility};
pub use sanitizer::{sanitize, ProjectedState, Sanitize};
