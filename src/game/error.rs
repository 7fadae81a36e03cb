//! Error types for game module
//!
//! Covers the rules-engine seam, session transitions that take user-supplied
//! positions, and restoring a persisted session.

use crate::core::error::CoreError;
use crate::game::types::Square;

/// Errors reported by a [`crate::game::rules::RulesEngine`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// Position string could not be parsed or describes an impossible position
    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    /// Move history could not be replayed
    #[error("Invalid move history at ply {ply} ('{token}'): {reason}")]
    InvalidHistory {
        ply: usize,
        token: String,
        reason: String,
    },

    /// No legal move connects the two squares
    #[error("Illegal move {from}-{to}")]
    IllegalMove { from: Square, to: Square },

    /// The move reaches the back rank but no promotion piece was given
    #[error("Move {from}-{to} requires a promotion piece")]
    PromotionRequired { from: Square, to: Square },

    /// The engine failed to play a move it reported as legal
    #[error("Engine failure: {message}")]
    Engine { message: String },
}

/// Errors that can occur in game logic
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Rules engine rejected an input
    #[error(transparent)]
    Rules(#[from] RulesError),

    /// Storage or serialization failure
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
