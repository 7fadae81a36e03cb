//! Rendering module - board widget seam and per-render square styles
//!
//! The session never draws anything itself. A host board widget implements
//! [`BoardWidget`] and is handed the current position plus a map of square
//! style overrides on every render. The map is rebuilt each time and never kept.
//!
//! # Architecture
//!
//! - `highlights` - builds [`SquareStyles`] from session state and config
//! - `text_board` - [`TextBoard`], a terminal widget used by the `xfboard` binary
//!
//! # Style precedence
//!
//! A square carries at most one style. When several apply, the strongest wins:
//!
//! ```text
//! Check > Selected > CaptureHint / MoveHint > LastMove
//! ```

pub mod highlights;
pub mod text_board;

pub use highlights::build_square_styles;
pub use text_board::TextBoard;

use crate::game::types::Square;
use std::collections::BTreeMap;

/// Visual override for one square
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SquareStyle {
    /// From or to square of the last move
    LastMove,
    /// Empty square the selected piece can move to
    MoveHint,
    /// Opponent-occupied square the selected piece can capture on
    CaptureHint,
    /// The selected piece
    Selected,
    /// King of the side to move while in check or mated
    Check,
}

/// Style overrides for a single render, keyed by square
pub type SquareStyles = BTreeMap<Square, SquareStyle>;

/// A board widget the session renders into
pub trait BoardWidget {
    /// Draw `position` (FEN) with `styles` applied for this render only
    fn render(&mut self, position: &str, styles: &SquareStyles);
}
