//! Rules engine test suite
//!
//! Exercises [`ChessRules`] through the [`RulesEngine`] trait only, the same
//! surface the session uses.
//!
//! # Test Organization
//!
//! - `test_targets_*` - legal destination queries
//! - `test_apply_*` - move validation and records
//! - `test_undo_*` - taking moves back
//! - `test_fen_*` / `test_pgn_*` - position and history round-tripping
//! - `test_status_*` - game-over predicates

use super::*;
use crate::game::types::{PieceColor, PieceType, Square};

fn sq(name: &str) -> Square {
    name.parse().expect("valid square in test")
}

fn request(from: &str, to: &str) -> MoveRequest {
    MoveRequest {
        from: sq(from),
        to: sq(to),
        promotion: None,
    }
}

fn play_all(engine: &mut ChessRules, moves: &[(&str, &str)]) {
    for (from, to) in moves {
        engine
            .apply(request(from, to))
            .unwrap_or_else(|e| panic!("{from}-{to} should be legal: {e}"));
    }
}

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const PROMOTION_FEN: &str = "3r4/4P3/8/8/8/8/k7/4K3 w - - 0 1";

// ============================================================================
// Legal Targets
// ============================================================================

#[test]
fn test_targets_initial_position() {
    //! White has 20 moves from the start, two of them from the e2 pawn
    let engine = ChessRules::default();
    assert_eq!(engine.legal_targets(None).len(), 20);

    let pawn_targets: Vec<Square> = engine
        .legal_targets(Some(sq("e2")))
        .iter()
        .map(|t| t.to)
        .collect();
    assert_eq!(pawn_targets.len(), 2);
    assert!(pawn_targets.contains(&sq("e3")));
    assert!(pawn_targets.contains(&sq("e4")));
}

#[test]
fn test_targets_empty_square_and_opponent_piece() {
    let engine = ChessRules::default();
    assert!(engine.legal_targets(Some(sq("e4"))).is_empty());
    assert!(
        engine.legal_targets(Some(sq("e7"))).is_empty(),
        "Black pieces have no moves while White is to move"
    );
}

#[test]
fn test_targets_promotion_collapsed() {
    //! Four promotion moves to one square are reported as a single target
    let engine = ChessRules::from_fen(PROMOTION_FEN).unwrap();
    let targets = engine.legal_targets(Some(sq("e7")));

    assert_eq!(targets.len(), 2, "e8 push and d8 capture");
    assert!(targets.iter().all(|t| t.requires_promotion));
}

#[test]
fn test_targets_castling_reported_as_king_step() {
    let mut engine = ChessRules::default();
    play_all(
        &mut engine,
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("g1", "f3"),
            ("b8", "c6"),
            ("f1", "c4"),
            ("f8", "c5"),
        ],
    );

    let king_targets: Vec<Square> = engine
        .legal_targets(Some(sq("e1")))
        .iter()
        .map(|t| t.to)
        .collect();
    assert!(king_targets.contains(&sq("g1")), "Short castling lands on g1");

    let record = engine.apply(request("e1", "g1")).unwrap();
    assert_eq!(record.san, "O-O");
    assert_eq!(record.to, sq("g1"));
    assert_eq!(
        engine.piece_at(sq("f1")).map(|p| p.piece_type),
        Some(PieceType::Rook)
    );
}

// ============================================================================
// Applying Moves
// ============================================================================

#[test]
fn test_apply_pawn_push() {
    let mut engine = ChessRules::default();
    let record = engine.apply(request("e2", "e4")).unwrap();

    assert_eq!(record.san, "e4");
    assert_eq!(record.piece_color, PieceColor::White);
    assert_eq!(record.piece_type, PieceType::Pawn);
    assert_eq!(record.captured, None);
    assert_eq!(engine.turn(), PieceColor::Black);
    assert_eq!(engine.history_len(), 1);
    assert_eq!(
        engine.fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
    );
}

#[test]
fn test_apply_illegal_move_leaves_position() {
    let mut engine = ChessRules::default();
    let before = engine.fen();

    let result = engine.apply(request("e2", "e5"));
    assert!(matches!(result, Err(RulesError::IllegalMove { .. })));
    assert_eq!(engine.fen(), before);
    assert_eq!(engine.history_len(), 0);
}

#[test]
fn test_apply_capture_records_piece() {
    let mut engine = ChessRules::default();
    play_all(&mut engine, &[("e2", "e4"), ("d7", "d5")]);

    let record = engine.apply(request("e4", "d5")).unwrap();
    assert_eq!(record.san, "exd5");
    assert_eq!(record.captured, Some(PieceType::Pawn));
}

#[test]
fn test_apply_en_passant_records_pawn() {
    let mut engine = ChessRules::default();
    play_all(
        &mut engine,
        &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")],
    );

    let record = engine.apply(request("e5", "d6")).unwrap();
    assert_eq!(record.san, "exd6");
    assert_eq!(record.captured, Some(PieceType::Pawn));
    assert_eq!(engine.piece_at(sq("d5")), None, "Captured pawn leaves d5");
}

#[test]
fn test_apply_promotion_needs_piece() {
    let mut engine = ChessRules::from_fen(PROMOTION_FEN).unwrap();

    let result = engine.apply(request("e7", "e8"));
    assert!(matches!(result, Err(RulesError::PromotionRequired { .. })));
    assert_eq!(engine.history_len(), 0);

    let record = engine
        .apply(MoveRequest {
            promotion: Some(PieceType::Knight),
            ..request("e7", "e8")
        })
        .unwrap();
    assert_eq!(record.san, "e8=N");
    assert_eq!(record.promotion, Some(PieceType::Knight));
    assert_eq!(
        engine.piece_at(sq("e8")).map(|p| p.piece_type),
        Some(PieceType::Knight)
    );
}

#[test]
fn test_apply_promotion_capture() {
    let mut engine = ChessRules::from_fen(PROMOTION_FEN).unwrap();
    let record = engine
        .apply(MoveRequest {
            promotion: Some(PieceType::Queen),
            ..request("e7", "d8")
        })
        .unwrap();

    assert_eq!(record.san, "exd8=Q");
    assert_eq!(record.captured, Some(PieceType::Rook));
}

#[test]
fn test_apply_promotion_to_king_rejected() {
    let mut engine = ChessRules::from_fen(PROMOTION_FEN).unwrap();
    let result = engine.apply(MoveRequest {
        promotion: Some(PieceType::King),
        ..request("e7", "e8")
    });
    assert!(result.is_err());
    assert_eq!(engine.history_len(), 0);
}

#[test]
fn test_apply_check_suffix() {
    let mut engine = ChessRules::default();
    play_all(&mut engine, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4")]);

    let record = engine.apply(request("d8", "h4")).unwrap();
    assert_eq!(record.san, "Qh4#");
}

// ============================================================================
// Undo
// ============================================================================

#[test]
fn test_undo_restores_previous_position() {
    let mut engine = ChessRules::default();
    play_all(&mut engine, &[("e2", "e4"), ("d7", "d5")]);
    let before_capture = engine.fen();

    engine.apply(request("e4", "d5")).unwrap();
    let undone = engine.undo().expect("one move to undo");

    assert_eq!(undone.san, "exd5");
    assert_eq!(engine.fen(), before_capture);
    assert_eq!(engine.history_len(), 2);
}

#[test]
fn test_undo_empty_history() {
    let mut engine = ChessRules::default();
    assert_eq!(engine.undo(), None);
    assert_eq!(engine.fen(), START_FEN);
}

// ============================================================================
// FEN / PGN
// ============================================================================

#[test]
fn test_fen_invalid_rejected() {
    let mut engine = ChessRules::default();
    assert!(matches!(
        engine.load_fen("not a fen"),
        Err(RulesError::InvalidFen { .. })
    ));
    assert!(
        engine.load_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err(),
        "A board without kings is not a legal position"
    );
    assert_eq!(engine.fen(), START_FEN);
}

#[test]
fn test_pgn_round_trip_reproduces_position() {
    //! Replaying the exported history from the start gives the same position
    let mut engine = ChessRules::default();
    play_all(
        &mut engine,
        &[
            ("e2", "e4"),
            ("c7", "c5"),
            ("g1", "f3"),
            ("d7", "d6"),
            ("d2", "d4"),
            ("c5", "d4"),
            ("f3", "d4"),
        ],
    );
    assert_eq!(engine.pgn(), "1. e4 c5 2. Nf3 d6 3. d4 cxd4 4. Nxd4");

    let mut replay = ChessRules::default();
    let records = replay.load_pgn(&engine.pgn()).unwrap();
    assert_eq!(records.len(), 7);
    assert_eq!(records[5].captured, Some(PieceType::Pawn));
    assert_eq!(replay.fen(), engine.fen());
}

#[test]
fn test_pgn_from_custom_start_carries_fen() {
    let mut engine = ChessRules::from_fen(PROMOTION_FEN).unwrap();
    engine
        .apply(MoveRequest {
            promotion: Some(PieceType::Queen),
            ..request("e7", "e8")
        })
        .unwrap();

    let pgn = engine.pgn();
    assert!(pgn.contains(&format!("[FEN \"{PROMOTION_FEN}\"]")));
    assert!(pgn.ends_with("1. e8=Q"));

    let mut replay = ChessRules::default();
    replay.load_pgn(&pgn).unwrap();
    assert_eq!(replay.fen(), engine.fen());
}

#[test]
fn test_pgn_black_to_move_start() {
    let mut engine =
        ChessRules::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1")
            .unwrap();
    play_all(&mut engine, &[("e7", "e5"), ("g1", "f3")]);
    assert!(engine.pgn().ends_with("1... e5 2. Nf3"));
}

#[test]
fn test_pgn_illegal_history_leaves_engine_untouched() {
    let mut engine = ChessRules::default();
    engine.apply(request("d2", "d4")).unwrap();
    let before = engine.fen();

    let result = engine.load_pgn("1. e4 e5 2. Ke3");
    match result {
        Err(RulesError::InvalidHistory { ply, token, .. }) => {
            assert_eq!(ply, 3);
            assert_eq!(token, "Ke3");
        }
        other => panic!("expected InvalidHistory, got {other:?}"),
    }
    assert_eq!(engine.fen(), before);
    assert_eq!(engine.history_len(), 1);
}

// ============================================================================
// Game Status Predicates
// ============================================================================

#[test]
fn test_status_checkmate() {
    let mut engine = ChessRules::default();
    play_all(
        &mut engine,
        &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
    );
    assert!(engine.is_checkmate());
    assert!(engine.is_check());
    assert!(engine.is_game_over());
    assert!(engine.legal_targets(None).is_empty());
}

#[test]
fn test_status_stalemate() {
    let engine = ChessRules::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(engine.is_stalemate());
    assert!(!engine.is_check());
    assert!(!engine.is_draw(), "Stalemate is reported on its own");
    assert!(engine.is_game_over());
}

#[test]
fn test_status_insufficient_material_and_fifty_moves() {
    let bare_kings = ChessRules::from_fen("8/8/8/4k3/8/8/8/K7 w - - 0 1").unwrap();
    assert!(bare_kings.is_draw());

    let fifty = ChessRules::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 80").unwrap();
    assert!(fifty.is_draw());
    assert!(fifty.is_game_over());
}

#[test]
fn test_status_threefold_repetition() {
    //! Knights out and back twice returns to the start position a third time
    let mut engine = ChessRules::default();
    let shuffle = [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")];
    play_all(&mut engine, &shuffle);
    assert!(!engine.is_draw(), "Second occurrence is not yet a draw");

    play_all(&mut engine, &shuffle);
    assert!(engine.is_draw());
}

#[test]
fn test_status_repetition_follows_undo_and_replay() {
    let mut engine = ChessRules::default();
    let shuffle = [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")];
    play_all(&mut engine, &shuffle);
    play_all(&mut engine, &shuffle);
    assert!(engine.is_draw());

    engine.undo().unwrap();
    assert!(!engine.is_draw(), "Taking back the repeating move lifts the draw");
    play_all(&mut engine, &[("f6", "g8")]);
    assert!(engine.is_draw());

    let mut replay = ChessRules::default();
    replay.load_pgn(&engine.pgn()).unwrap();
    assert!(replay.is_draw());
}

#[test]
fn test_status_repetition_from_custom_start() {
    let mut engine = ChessRules::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    let shuffle = [("a1", "a2"), ("e8", "e7"), ("a2", "a1"), ("e7", "e8")];
    play_all(&mut engine, &shuffle);
    assert!(!engine.is_draw());
    play_all(&mut engine, &shuffle);
    assert!(engine.is_draw());
}

#[test]
fn test_pgn_unreadable_text_is_refused() {
    let mut engine = ChessRules::default();
    engine.apply(request("d2", "d4")).unwrap();

    for pgn in ["[Event \"x\" 1. e4", "[Event] 1. e4", "1. 2."] {
        assert!(
            matches!(
                engine.load_pgn(pgn),
                Err(RulesError::InvalidHistory { ply: 0, .. })
            ),
            "{pgn} should be refused"
        );
    }
    assert_eq!(engine.history_len(), 1);
}

#[test]
fn test_pgn_tags_on_move_line() {
    let mut engine = ChessRules::default();
    let records = engine
        .load_pgn(&format!("[SetUp \"1\"] [FEN \"{PROMOTION_FEN}\"] 1. e8=N"))
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].promotion, Some(PieceType::Knight));
}

#[test]
fn test_start_move_number() {
    assert_eq!(ChessRules::default().start_move_number(), 1);

    let mut engine = ChessRules::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 40").unwrap();
    play_all(&mut engine, &[("e8", "d8"), ("e2", "e4")]);
    assert_eq!(engine.start_move_number(), 40, "Moves played do not shift the start");
}

#[test]
fn test_parse_placement() {
    let grid = parse_placement(START_FEN).unwrap();
    assert_eq!(grid, ChessRules::default().grid());

    let grid = parse_placement("4k3/8/8/8/8/8/8/4K3").unwrap();
    assert_eq!(grid.iter().filter(|cell| cell.is_some()).count(), 2);

    assert!(matches!(
        parse_placement("4k3/8/8/8"),
        Err(RulesError::InvalidFen { .. })
    ));
    assert!(parse_placement("").is_err());
}

#[test]
fn test_grid_has_32_pieces_at_start() {
    let engine = ChessRules::default();
    let grid = engine.grid();
    assert_eq!(grid.iter().filter(|cell| cell.is_some()).count(), 32);
    assert_eq!(
        grid[sq("e1").index() as usize],
        Some(crate::game::types::Piece::new(PieceColor::White, PieceType::King))
    );
}
