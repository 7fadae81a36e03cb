//! Move log
//!
//! Human-readable record of the moves played, for display. The rules engine's
//! own history is what positions are rebuilt from.

use crate::game::types::{MoveRecord, PieceColor};

/// Ordered move records, append-only during play, truncated by one on undo
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MoveHistory {
    pub moves: Vec<MoveRecord>,
}

impl MoveHistory {
    pub fn add_move(&mut self, record: MoveRecord) {
        self.moves.push(record);
    }

    pub fn pop_move(&mut self) -> Option<MoveRecord> {
        self.moves.pop()
    }

    /// Get the last move made
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    /// Check if there are moves that can be undone
    pub fn can_undo(&self) -> bool {
        !self.moves.is_empty()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Display lines, e.g. `["White: e4", "Black: e5"]`
    pub fn display_lines(&self) -> Vec<String> {
        self.moves.iter().map(MoveRecord::display).collect()
    }

    /// Numbered rows for a two-column move list: `(1, "e4", Some("e5"))`
    ///
    /// Rows count up from `first_move_number`, the full-move number of the
    /// starting position. A game that starts with Black to move gets an empty
    /// White cell first.
    pub fn move_pairs(&self, first_move_number: usize) -> Vec<(usize, String, Option<String>)> {
        let mut rows: Vec<(usize, String, Option<String>)> = Vec::new();
        for record in &self.moves {
            let san = record.san.clone();
            let number = first_move_number + rows.len();
            match record.piece_color {
                PieceColor::Black => match rows.last_mut() {
                    Some(row) if row.2.is_none() => row.2 = Some(san),
                    _ => rows.push((number, String::new(), Some(san))),
                },
                PieceColor::White => rows.push((number, san, None)),
            }
        }
        rows
    }
}
