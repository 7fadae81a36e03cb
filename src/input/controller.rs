//! Interaction controller
//!
//! Turns board widget gestures into session transitions. The widget reports
//! squares as algebraic strings (`"e2"`); anything that does not parse is logged
//! and treated as a rejected gesture.
//!
//! # Gestures
//!
//! - **Drop** ([`InteractionController::on_drop`]) - a dragged piece was released.
//!   Returns whether the widget should keep the piece where it was dropped.
//!   A move that needs a promotion piece opens the promotion prompt and returns
//!   `false`, so the piece snaps back until the choice is made.
//! - **Click** ([`InteractionController::on_square_click`]) - two-step tap-to-move.
//! - **Buttons** - promotion choice/cancel, undo, reset.

use crate::core::config::SessionConfig;
use crate::core::storage::SessionStorage;
use crate::game::rules::RulesEngine;
use crate::game::session::{BoardSession, MoveOutcome, SquareAction};
use crate::game::types::{MoveRecord, PieceType, Square};
use crate::rendering::{build_square_styles, BoardWidget, SquareStyles};
use tracing::{debug, info, warn};

/// Routes gestures from a board widget into a [`BoardSession`]
#[derive(Debug)]
pub struct InteractionController<E: RulesEngine, S: SessionStorage> {
    session: BoardSession<E, S>,
    config: SessionConfig,
}

impl<E: RulesEngine, S: SessionStorage> InteractionController<E, S> {
    pub fn new(session: BoardSession<E, S>, config: SessionConfig) -> Self {
        Self { session, config }
    }

    /// A piece dragged from `source` was dropped on `target`
    pub fn on_drop(&mut self, source: &str, target: &str) -> bool {
        let (Some(from), Some(to)) = (parse_square(source), parse_square(target)) else {
            return false;
        };

        if self.session.is_game_over() {
            debug!("[INPUT] Drop {}-{} ignored: game over", from, to);
            return false;
        }
        if self.session.pending_promotion().is_some() {
            debug!("[INPUT] Drop {}-{} ignored: promotion pending", from, to);
            return false;
        }
        let mover = self.session.turn();
        if !self
            .session
            .piece_at(from)
            .is_some_and(|piece| piece.color == mover)
        {
            debug!("[INPUT] Drop from {} ignored: not a {} piece", from, mover);
            return false;
        }

        let Some(legal) = self
            .session
            .legal_targets(from)
            .into_iter()
            .find(|t| t.to == to)
        else {
            debug!("[INPUT] Drop {}-{} rejected: illegal", from, to);
            return false;
        };

        if legal.requires_promotion {
            // Snap back; the move is played once a piece is chosen
            self.session.apply_move(from, to, None);
            return false;
        }

        self.session
            .apply_move(from, to, Some(self.config.default_promotion))
            .is_committed()
    }

    /// A square was tapped
    pub fn on_square_click(&mut self, square: &str) -> SquareAction {
        match parse_square(square) {
            Some(square) => self.session.select_square(square),
            None => SquareAction::Ignored,
        }
    }

    /// Promotion prompt answered with a piece code (`"q"`, `"knight"`, ...)
    pub fn on_promotion_choice(&mut self, code: &str) -> MoveOutcome {
        match PieceType::from_code(code) {
            Some(piece) => self.session.resolve_promotion(piece),
            None => {
                warn!("[INPUT] Unknown promotion piece '{}'", code);
                MoveOutcome::Rejected
            }
        }
    }

    pub fn on_promotion_cancel(&mut self) -> bool {
        self.session.cancel_promotion()
    }

    pub fn on_undo(&mut self) -> Option<MoveRecord> {
        self.session.undo()
    }

    pub fn on_reset(&mut self) {
        info!("[INPUT] New game requested");
        self.session.reset();
    }

    /// Style overrides for the next render
    pub fn styles(&self) -> SquareStyles {
        build_square_styles(&self.session, &self.config)
    }

    /// Draw the current position into `widget`
    pub fn render<W: BoardWidget>(&self, widget: &mut W) {
        widget.render(&self.session.fen(), &self.styles());
    }

    pub fn session(&self) -> &BoardSession<E, S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut BoardSession<E, S> {
        &mut self.session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

fn parse_square(text: &str) -> Option<Square> {
    match text.trim().parse::<Square>() {
        Ok(square) => Some(square),
        Err(e) => {
            warn!("[INPUT] Ignoring gesture on invalid square: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStorage;
    use crate::game::rules::ChessRules;
    use crate::game::session::ChessSession;
    use crate::game::types::PieceColor;

    fn controller() -> InteractionController<ChessRules, MemoryStorage> {
        InteractionController::new(
            ChessSession::new(MemoryStorage::default()),
            SessionConfig::default(),
        )
    }

    #[test]
    fn test_drop_legal_move() {
        let mut controller = controller();
        assert!(controller.on_drop("e2", "e4"));
        assert_eq!(controller.session().move_log(), vec!["White: e4"]);
        assert_eq!(controller.session().turn(), PieceColor::Black);
    }

    #[test]
    fn test_drop_rejections() {
        let mut controller = controller();
        assert!(!controller.on_drop("e7", "e5"), "Not White's piece");
        assert!(!controller.on_drop("e3", "e4"), "Empty source square");
        assert!(!controller.on_drop("e2", "e5"), "Illegal target");
        assert!(!controller.on_drop("z9", "e4"), "Malformed square");
        assert!(controller.session().move_log().is_empty());
    }

    #[test]
    fn test_drop_on_finished_game() {
        let mut controller = controller();
        controller
            .session_mut()
            .load_pgn("1. f3 e5 2. g4 Qh4#")
            .unwrap();
        assert!(!controller.on_drop("a2", "a3"));
    }

    #[test]
    fn test_drop_promotion_defers() {
        let mut controller = controller();
        controller
            .session_mut()
            .load_fen("3r4/4P3/8/8/8/8/k7/4K3 w - - 0 1")
            .unwrap();

        assert!(!controller.on_drop("e7", "e8"), "Piece snaps back");
        assert!(controller.session().pending_promotion().is_some());
        assert!(controller.session().move_log().is_empty());

        let outcome = controller.on_promotion_choice("q");
        assert!(outcome.is_committed());
        assert_eq!(controller.session().history().len(), 1);
        assert!(controller.session().pending_promotion().is_none());
    }

    #[test]
    fn test_promotion_choice_unknown_code() {
        let mut controller = controller();
        controller
            .session_mut()
            .load_fen("3r4/4P3/8/8/8/8/k7/4K3 w - - 0 1")
            .unwrap();
        controller.on_drop("e7", "e8");

        assert_eq!(controller.on_promotion_choice("x"), MoveOutcome::Rejected);
        assert!(controller.on_promotion_cancel());
        assert!(controller.session().pending_promotion().is_none());
    }

    #[test]
    fn test_click_flow_and_render() {
        let mut controller = controller();
        assert_eq!(
            controller.on_square_click("g1"),
            SquareAction::Selected("g1".parse().unwrap())
        );
        assert_eq!(controller.styles().len(), 3, "Knight plus two hints");

        let mut board = crate::rendering::TextBoard::new(Vec::new(), PieceColor::White);
        controller.render(&mut board);
        let text = String::from_utf8(board.into_inner()).unwrap();
        assert!(text.contains("[N]"));

        assert!(matches!(
            controller.on_square_click("f3"),
            SquareAction::Move(MoveOutcome::Committed(_))
        ));
        assert_eq!(controller.on_undo().map(|m| m.san), Some("Nf3".to_string()));
    }
}
