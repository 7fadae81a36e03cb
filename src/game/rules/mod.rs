//! Chess rules seam
//!
//! The session never decides legality itself. Everything it needs from a chess
//! library goes through [`RulesEngine`]; [`ChessRules`] implements it on top of
//! `shakmaty`.
//!
//! # Module Structure
//!
//! - `chess_rules` - shakmaty-backed engine with its own undo stack
//! - `movetext` - PGN movetext tokenizer used to load move histories

pub mod chess_rules;
pub mod movetext;

#[cfg(test)]
mod tests;

pub use chess_rules::{parse_placement, ChessRules};

use crate::game::error::RulesError;
use crate::game::types::{MoveRecord, Piece, PieceColor, PieceType, Square};
use std::fmt;

/// A move as the board widget describes it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)?;
        if let Some(piece) = self.promotion {
            write!(f, "={}", piece.to_char().to_ascii_uppercase())?;
        }
        Ok(())
    }
}

/// A destination reachable by a legal move
///
/// Castling is reported as the king's two-square step (`e1` to `g1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalTarget {
    pub from: Square,
    pub to: Square,
    pub requires_promotion: bool,
}

/// The chess rules library as the session sees it
///
/// `Default` constructs the standard initial position.
pub trait RulesEngine: Default {
    /// Replace the game with the position in `fen`; history is emptied
    fn load_fen(&mut self, fen: &str) -> Result<(), RulesError>;

    /// Replace the game by replaying PGN movetext
    ///
    /// A `[FEN "..."]` header sets the starting position. Returns the replayed
    /// records in order. On error the engine is left unchanged.
    fn load_pgn(&mut self, pgn: &str) -> Result<Vec<MoveRecord>, RulesError>;

    /// Current position as FEN
    fn fen(&self) -> String;

    /// Moves played so far as PGN, with FEN headers if the game did not start
    /// from the standard position
    fn pgn(&self) -> String;

    /// Legal destinations, optionally only those starting on `from`
    fn legal_targets(&self, from: Option<Square>) -> Vec<LegalTarget>;

    /// Validate and play a move
    fn apply(&mut self, request: MoveRequest) -> Result<MoveRecord, RulesError>;

    /// Take back the last move; `None` when there is nothing to take back
    fn undo(&mut self) -> Option<MoveRecord>;

    /// Number of moves played since the starting position
    fn history_len(&self) -> usize;

    /// Full-move number of the starting position
    fn start_move_number(&self) -> usize;

    fn is_game_over(&self) -> bool;
    fn is_checkmate(&self) -> bool;
    /// Insufficient material, fifty-move rule or threefold repetition
    fn is_draw(&self) -> bool;
    fn is_stalemate(&self) -> bool;
    fn is_check(&self) -> bool;
    fn turn(&self) -> PieceColor;
    fn piece_at(&self, square: Square) -> Option<Piece>;

    /// Occupancy of all 64 squares, indexed by [`Square::index`]
    fn grid(&self) -> [Option<Piece>; 64] {
        let mut grid = [None; 64];
        for square in Square::all() {
            grid[square.index() as usize] = self.piece_at(square);
        }
        grid
    }
}
