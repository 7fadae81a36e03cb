//! Captured pieces tracking
//!
//! Tracks pieces captured by each player and calculates material advantage.
//!
//! # Material Values
//!
//! Pawn 1, Knight/Bishop 3, Rook 5, Queen 9, King 0.
//!
//! Positive advantage means White is ahead, negative means Black is ahead.

use crate::game::types::{PieceColor, PieceType};

/// Captured pieces for both sides, in capture order
///
/// - `white_captured`: Black pieces that White has captured
/// - `black_captured`: White pieces that Black has captured
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct CapturedPieces {
    pub white_captured: Vec<PieceType>,
    pub black_captured: Vec<PieceType>,
}

impl CapturedPieces {
    /// Record a capture of a `captured_piece_color` piece
    pub fn add_capture(&mut self, captured_piece_color: PieceColor, piece_type: PieceType) {
        self.list_mut(captured_piece_color.opposite()).push(piece_type);
    }

    /// Drop the most recent capture credited to `captor`
    pub fn remove_last_capture(&mut self, captor: PieceColor) -> Option<PieceType> {
        self.list_mut(captor).pop()
    }

    /// Pieces captured by `captor`
    pub fn by_captor(&self, captor: PieceColor) -> &[PieceType] {
        match captor {
            PieceColor::White => &self.white_captured,
            PieceColor::Black => &self.black_captured,
        }
    }

    fn list_mut(&mut self, captor: PieceColor) -> &mut Vec<PieceType> {
        match captor {
            PieceColor::White => &mut self.white_captured,
            PieceColor::Black => &mut self.black_captured,
        }
    }

    /// Material difference in pawn units, positive when White is ahead
    pub fn material_advantage(&self) -> i32 {
        let white_score: i32 = self.white_captured.iter().map(|p| piece_value(*p)).sum();
        let black_score: i32 = self.black_captured.iter().map(|p| piece_value(*p)).sum();
        white_score - black_score
    }

    /// Clear all captured pieces (for new game)
    pub fn clear(&mut self) {
        self.white_captured.clear();
        self.black_captured.clear();
    }
}

/// Pawn-unit value of a piece
fn piece_value(piece_type: PieceType) -> i32 {
    match piece_type {
        PieceType::Pawn => 1,
        PieceType::Knight => 3,
        PieceType::Bishop => 3,
        PieceType::Rook => 5,
        PieceType::Queen => 9,
        PieceType::King => 0,
    }
}
