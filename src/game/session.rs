//! Board session store
//!
//! [`BoardSession`] is the single owner of a game in progress: one long-lived rules
//! engine handle, the move log, capture lists, selection and pending promotion.
//! It changes only through the transitions below, each of which runs to
//! completion before returning.
//!
//! # Transitions
//!
//! - [`BoardSession::apply_move`] - validate and commit, or open a promotion
//! - [`BoardSession::resolve_promotion`] / [`BoardSession::cancel_promotion`]
//! - [`BoardSession::select_square`] - two-step tap-to-move protocol
//! - [`BoardSession::undo`] - native engine undo, one move
//! - [`BoardSession::reset`] - fresh game, storage slot deleted
//! - [`BoardSession::load_fen`] / [`BoardSession::load_pgn`] - replace the game
//!
//! # Invariants
//!
//! - The displayed position is always `engine.fen()`; no copy is kept
//! - The move log has one entry per engine history entry
//! - A selection and a pending promotion are never active together
//!
//! Every transition that changes the position writes the session into its
//! storage slot before returning.

use crate::core::storage::SessionStorage;
use crate::game::error::GameResult;
use crate::game::persistence::{self, PersistedSession};
use crate::game::resources::{
    CapturedPieces, MoveHistory, PendingPromotion, PromotionRequest, Selection,
};
use crate::game::rules::{ChessRules, LegalTarget, MoveRequest, RulesEngine};
use crate::game::status::{self, GameStatus};
use crate::game::types::{MoveRecord, Piece, PieceColor, PieceType, Square};
use tracing::{debug, info, warn};

/// Result of asking the session to play a move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was played and logged
    Committed(MoveRecord),
    /// The move is legal but needs a promotion piece; nothing was played yet
    PromotionPending(PromotionRequest),
    /// Illegal or not allowed right now; the session is unchanged
    Rejected,
}

impl MoveOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, MoveOutcome::Committed(_))
    }
}

/// What a tap on a square did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareAction {
    /// Nothing changed
    Ignored,
    /// The square's piece is now selected
    Selected(Square),
    /// The selection was dropped
    Cleared,
    /// The tap completed a move attempt from the selected square
    Move(MoveOutcome),
}

/// Session state store over a rules engine `E` and a storage slot `S`
#[derive(Debug)]
pub struct BoardSession<E: RulesEngine, S: SessionStorage> {
    engine: E,
    history: MoveHistory,
    captured: CapturedPieces,
    selection: Selection,
    pending_promotion: PendingPromotion,
    storage: S,
}

/// Session over the shakmaty-backed engine
pub type ChessSession<S> = BoardSession<ChessRules, S>;

impl<E: RulesEngine, S: SessionStorage> BoardSession<E, S> {
    /// Fresh session at the standard starting position
    ///
    /// The storage slot is left as it is until the first change.
    pub fn new(storage: S) -> Self {
        Self {
            engine: E::default(),
            history: MoveHistory::default(),
            captured: CapturedPieces::default(),
            selection: Selection::default(),
            pending_promotion: PendingPromotion::default(),
            storage,
        }
    }

    /// Session restored from the storage slot, or a fresh one
    ///
    /// Any failure to read, parse or replay the slot is logged and yields a fresh
    /// session. Mounting never fails.
    pub fn mount(storage: S) -> Self {
        let snapshot = match persistence::load_snapshot(&storage) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                info!("[SESSION] No saved session found. Starting a new game.");
                return Self::new(storage);
            }
            Err(e) => {
                warn!(
                    "[SESSION] Failed to read saved session: {}. Starting a new game.",
                    e
                );
                return Self::new(storage);
            }
        };

        match persistence::rehydrate::<E>(&snapshot) {
            Ok(restored) => Self {
                engine: restored.engine,
                history: restored.history,
                captured: restored.captured,
                selection: Selection::default(),
                pending_promotion: PendingPromotion::default(),
                storage,
            },
            Err(e) => {
                warn!(
                    "[SESSION] Saved session could not be replayed: {}. Starting a new game.",
                    e
                );
                Self::new(storage)
            }
        }
    }

    // ---------------------------------------------------------------------
    // Transitions
    // ---------------------------------------------------------------------

    /// Play `from` to `to`
    ///
    /// A move that reaches the back rank without `promotion` opens a pending
    /// promotion instead of committing.
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> MoveOutcome {
        if self.pending_promotion.is_active() {
            debug!("[SESSION] Move {}-{} ignored: promotion pending", from, to);
            return MoveOutcome::Rejected;
        }

        let Some(target) = self
            .engine
            .legal_targets(Some(from))
            .into_iter()
            .find(|target| target.to == to)
        else {
            debug!("[SESSION] Rejected illegal move {}-{}", from, to);
            return MoveOutcome::Rejected;
        };

        if target.requires_promotion && promotion.is_none() {
            self.selection.clear();
            self.pending_promotion.start(from, to, self.engine.turn());
            info!("[SESSION] Promotion pending on {}-{}", from, to);
            return match self.pending_promotion.request() {
                Some(request) => MoveOutcome::PromotionPending(request),
                None => MoveOutcome::Rejected,
            };
        }

        self.play(MoveRequest {
            from,
            to,
            promotion,
        })
    }

    /// Finish the pending promotion with `piece`
    ///
    /// No-op without a pending request. A piece that cannot be promoted to
    /// leaves the request pending.
    pub fn resolve_promotion(&mut self, piece: PieceType) -> MoveOutcome {
        let Some(request) = self.pending_promotion.request() else {
            debug!("[SESSION] No promotion pending");
            return MoveOutcome::Rejected;
        };
        if !piece.is_promotion_choice() {
            warn!("[SESSION] Cannot promote to {:?}", piece);
            return MoveOutcome::Rejected;
        }

        self.pending_promotion.clear();
        let outcome = self.play(MoveRequest {
            from: request.from,
            to: request.to,
            promotion: Some(piece),
        });
        if !outcome.is_committed() {
            self.pending_promotion
                .start(request.from, request.to, request.color);
        }
        outcome
    }

    /// Drop the pending promotion; returns whether one was pending
    pub fn cancel_promotion(&mut self) -> bool {
        match self.pending_promotion.take() {
            Some(request) => {
                info!(
                    "[SESSION] Promotion on {}-{} cancelled",
                    request.from, request.to
                );
                true
            }
            None => false,
        }
    }

    /// Tap `square`
    pub fn select_square(&mut self, square: Square) -> SquareAction {
        if self.pending_promotion.is_active() || self.engine.is_game_over() {
            return SquareAction::Ignored;
        }

        let own_piece = self.is_own_piece(square);
        let Some(selected) = self.selection.selected_square else {
            if own_piece {
                self.select(square);
                return SquareAction::Selected(square);
            }
            return SquareAction::Ignored;
        };

        if square == selected {
            self.selection.clear();
            debug!("[SESSION] Deselected {}", square);
            return SquareAction::Cleared;
        }
        if own_piece {
            self.select(square);
            return SquareAction::Selected(square);
        }
        if self.selection.target(square).is_some() {
            return SquareAction::Move(self.apply_move(selected, square, None));
        }

        self.selection.clear();
        SquareAction::Cleared
    }

    /// Take back the last move
    pub fn undo(&mut self) -> Option<MoveRecord> {
        let record = self.engine.undo()?;
        self.history.pop_move();
        if record.captured.is_some() {
            self.captured.remove_last_capture(record.piece_color);
        }
        self.selection.clear();
        self.pending_promotion.clear();

        info!("[SESSION] Undid {}", record.display());
        self.persist();
        Some(record)
    }

    /// Start over from the standard position and delete the storage slot
    pub fn reset(&mut self) {
        self.engine = E::default();
        self.clear_logs();
        persistence::clear(&mut self.storage);
        info!("[SESSION] Reset to starting position");
    }

    /// Start a new game from `fen`; on error the session is unchanged
    pub fn load_fen(&mut self, fen: &str) -> GameResult<()> {
        let mut engine = E::default();
        engine.load_fen(fen)?;

        self.engine = engine;
        self.clear_logs();
        info!("[SESSION] Loaded position {}", self.engine.fen());
        self.persist();
        Ok(())
    }

    /// Replace the game with PGN movetext; on error the session is unchanged
    pub fn load_pgn(&mut self, pgn: &str) -> GameResult<()> {
        let mut engine = E::default();
        let records = engine.load_pgn(pgn)?;

        self.engine = engine;
        self.clear_logs();
        for record in records {
            persistence::record_capture(&mut self.captured, &record);
            self.history.add_move(record);
        }
        info!("[SESSION] Loaded game with {} moves", self.history.len());
        self.persist();
        Ok(())
    }

    fn play(&mut self, request: MoveRequest) -> MoveOutcome {
        match self.engine.apply(request) {
            Ok(record) => {
                self.commit(record.clone());
                MoveOutcome::Committed(record)
            }
            Err(e) => {
                warn!("[SESSION] Engine rejected {}: {}", request, e);
                MoveOutcome::Rejected
            }
        }
    }

    fn commit(&mut self, record: MoveRecord) {
        info!("[SESSION] {}", record.display());
        persistence::record_capture(&mut self.captured, &record);
        self.history.add_move(record);
        self.selection.clear();
        self.pending_promotion.clear();
        self.persist();
    }

    fn select(&mut self, square: Square) {
        let targets = self.engine.legal_targets(Some(square));
        debug!("[SESSION] Selected {} ({} targets)", square, targets.len());
        self.selection.select(square, targets);
    }

    fn clear_logs(&mut self) {
        self.history.clear();
        self.captured.clear();
        self.selection.clear();
        self.pending_promotion.clear();
    }

    fn persist(&mut self) {
        let snapshot = PersistedSession::capture(&self.engine, &self.history, &self.captured);
        persistence::save(&mut self.storage, &snapshot);
    }

    fn is_own_piece(&self, square: Square) -> bool {
        self.engine
            .piece_at(square)
            .is_some_and(|piece| piece.color == self.engine.turn())
    }

    // ---------------------------------------------------------------------
    // Projections
    // ---------------------------------------------------------------------

    /// Current position as FEN
    pub fn fen(&self) -> String {
        self.engine.fen()
    }

    /// Game so far as PGN
    pub fn pgn(&self) -> String {
        self.engine.pgn()
    }

    pub fn turn(&self) -> PieceColor {
        self.engine.turn()
    }

    pub fn status(&self) -> GameStatus {
        GameStatus::derive(&self.engine)
    }

    pub fn is_game_over(&self) -> bool {
        self.engine.is_game_over()
    }

    /// Square of the king to highlight as in danger
    pub fn king_in_danger(&self) -> Option<Square> {
        status::king_in_danger(&self.engine)
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.engine.piece_at(square)
    }

    pub fn legal_targets(&self, from: Square) -> Vec<LegalTarget> {
        self.engine.legal_targets(Some(from))
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Move log lines, e.g. `["White: e4"]`
    pub fn move_log(&self) -> Vec<String> {
        self.history.display_lines()
    }

    /// Two-column move list numbered from the starting position
    pub fn move_pairs(&self) -> Vec<(usize, String, Option<String>)> {
        self.history.move_pairs(self.engine.start_move_number())
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last_move()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn captured(&self) -> &CapturedPieces {
        &self.captured
    }

    pub fn material_advantage(&self) -> i32 {
        self.captured.material_advantage()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn pending_promotion(&self) -> Option<PromotionRequest> {
        self.pending_promotion.request()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
