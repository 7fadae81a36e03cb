//! Selection state for the tap-to-move protocol

use crate::game::rules::LegalTarget;
use crate::game::types::Square;

/// Currently selected square and the legal targets reachable from it
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    pub selected_square: Option<Square>,
    pub possible_moves: Vec<LegalTarget>,
}

impl Selection {
    pub fn select(&mut self, square: Square, possible_moves: Vec<LegalTarget>) {
        self.selected_square = Some(square);
        self.possible_moves = possible_moves;
    }

    pub fn clear(&mut self) {
        self.selected_square = None;
        self.possible_moves.clear();
    }

    pub fn is_selected(&self) -> bool {
        self.selected_square.is_some()
    }

    /// Legal target landing on `square`, if the selection can reach it
    pub fn target(&self, square: Square) -> Option<&LegalTarget> {
        self.possible_moves.iter().find(|t| t.to == square)
    }
}
