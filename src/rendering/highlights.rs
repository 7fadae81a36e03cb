//! Square highlight derivation
//!
//! Recomputed from the session on every render; nothing here is cached.

use super::{SquareStyle, SquareStyles};
use crate::core::config::SessionConfig;
use crate::core::storage::SessionStorage;
use crate::game::rules::RulesEngine;
use crate::game::session::BoardSession;
use crate::game::types::Square;

/// Style overrides for the session's current state
pub fn build_square_styles<E: RulesEngine, S: SessionStorage>(
    session: &BoardSession<E, S>,
    config: &SessionConfig,
) -> SquareStyles {
    let mut styles = SquareStyles::new();

    if config.highlight_last_move {
        if let Some(last) = session.last_move() {
            mark(&mut styles, last.from, SquareStyle::LastMove);
            mark(&mut styles, last.to, SquareStyle::LastMove);
        }
    }

    let selection = session.selection();
    if let Some(selected) = selection.selected_square {
        if config.show_hints {
            let mover = session.turn();
            for target in &selection.possible_moves {
                let style = match session.piece_at(target.to) {
                    Some(piece) if piece.color != mover => SquareStyle::CaptureHint,
                    _ => SquareStyle::MoveHint,
                };
                mark(&mut styles, target.to, style);
            }
        }
        mark(&mut styles, selected, SquareStyle::Selected);
    }

    if let Some(king) = session.king_in_danger() {
        mark(&mut styles, king, SquareStyle::Check);
    }

    styles
}

/// Set `style` on `square` unless a stronger style is already there
fn mark(styles: &mut SquareStyles, square: Square, style: SquareStyle) {
    styles
        .entry(square)
        .and_modify(|current| *current = (*current).max(style))
        .or_insert(style);
}
