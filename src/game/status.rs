//! Game status derivation
//!
//! Status is never stored. It is recomputed from the rules engine every time the
//! board is drawn, so it cannot drift from the position.
//!
//! # Precedence
//!
//! ```text
//! Checkmate > Draw > Stalemate > GameOver > Check > ToMove
//! ```
//!
//! The first condition that holds wins.

use crate::game::rules::RulesEngine;
use crate::game::types::{Piece, PieceColor, PieceType, Square};
use std::fmt;
use tracing::error;

/// Outcome or progress of the current game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Side to move is mated
    Checkmate { winner: PieceColor },
    /// Insufficient material, fifty-move rule or threefold repetition
    Draw,
    /// Side to move has no legal move and is not in check
    Stalemate,
    /// Engine reports the game over for a reason not listed above
    GameOver,
    /// Side to move is in check
    Check { side: PieceColor },
    /// Game in progress
    ToMove { side: PieceColor },
}

impl GameStatus {
    pub fn derive<E: RulesEngine>(engine: &E) -> Self {
        let side = engine.turn();
        if engine.is_checkmate() {
            GameStatus::Checkmate {
                winner: side.opposite(),
            }
        } else if engine.is_draw() {
            GameStatus::Draw
        } else if engine.is_stalemate() {
            GameStatus::Stalemate
        } else if engine.is_game_over() {
            GameStatus::GameOver
        } else if engine.is_check() {
            GameStatus::Check { side }
        } else {
            GameStatus::ToMove { side }
        }
    }

    /// No more moves can be made
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameStatus::Check { .. } | GameStatus::ToMove { .. })
    }

    pub fn winner(&self) -> Option<PieceColor> {
        match self {
            GameStatus::Checkmate { winner } => Some(*winner),
            _ => None,
        }
    }

    /// Status line for the UI
    pub fn message(&self) -> String {
        match self {
            GameStatus::Checkmate { winner } => format!("Checkmate! {winner} wins"),
            GameStatus::Draw => "Draw".to_string(),
            GameStatus::Stalemate => "Stalemate".to_string(),
            GameStatus::GameOver => "Game over".to_string(),
            GameStatus::Check { side } => format!("{side} is in check"),
            GameStatus::ToMove { side } => format!("{side} to move"),
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Square of the side-to-move's king when it is in check or mated
///
/// Full 64-square scan on every call. A missing king cannot happen in a legal
/// position; it is logged as corruption and reported as `None`.
pub fn king_in_danger<E: RulesEngine>(engine: &E) -> Option<Square> {
    if !(engine.is_check() || engine.is_checkmate()) {
        return None;
    }

    let side = engine.turn();
    let king = Some(Piece::new(side, PieceType::King));
    let grid = engine.grid();
    let found = Square::all().find(|square| grid[square.index() as usize] == king);

    if found.is_none() {
        error!(
            "[STATUS] CRITICAL: {} is in check but has no king on the board",
            side
        );
    }
    found
}
