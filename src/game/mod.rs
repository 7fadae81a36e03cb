//! Chess game module - session state over a rules engine
//!
//! Everything the board session knows about a game lives here, split between
//! pure data, the rules seam and the store that ties them together.
//!
//! # Module Organization
//!
//! - `types` - squares, pieces, colours and move records
//! - `rules` - [`rules::RulesEngine`] seam and the shakmaty-backed [`rules::ChessRules`]
//! - `resources` - selection, pending promotion, move log, captured pieces
//! - `session` - [`session::BoardSession`], the only place state changes
//! - `persistence` - snapshot format and restore-by-replay
//! - `status` - status line and king-in-check derivation
//! - `error` - error types for the above

pub mod error;
pub mod persistence;
pub mod resources;
pub mod rules;
pub mod session;
pub mod status;
pub mod types;

// Re-export the session entry points
pub use error::{GameError, GameResult, RulesError};
pub use session::{BoardSession, ChessSession, MoveOutcome, SquareAction};
pub use status::GameStatus;
