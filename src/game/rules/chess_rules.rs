//! shakmaty-backed rules engine
//!
//! [`ChessRules`] owns one `shakmaty::Chess` position and mutates it in place.
//! shakmaty positions are immutable values with no history, so the engine keeps
//! its own undo stack of prior positions; taking a move back is a pop, never a
//! replay of the game.
//!
//! # Coordinate System
//!
//! shakmaty numbers squares `a1 = 0 .. h8 = 63`, the same as
//! [`Square::index`], so conversion is a plain index copy.

use super::movetext;
use super::{LegalTarget, MoveRequest, RulesEngine};
use crate::game::error::RulesError;
use crate::game::types::{File, MoveRecord, Piece, PieceColor, PieceType, Rank, Square};
use shakmaty::fen::Fen;
use shakmaty::san::{San, SanPlus};
use shakmaty::{Board, CastlingMode, Chess, Color, EnPassantMode, Move, Position, Role};

/// Position before a move, kept so the move can be taken back
#[derive(Debug, Clone)]
struct UndoEntry {
    previous: Chess,
    /// Repetition key of `previous`
    key: String,
    record: MoveRecord,
}

/// Rules engine over `shakmaty`
#[derive(Debug, Clone)]
pub struct ChessRules {
    position: Chess,
    /// FEN the game started from, `None` for the standard initial position
    start_fen: Option<String>,
    start: Chess,
    undo_stack: Vec<UndoEntry>,
    /// Repetition key of `position`
    key: String,
}

impl Default for ChessRules {
    fn default() -> Self {
        let position = Chess::default();
        Self {
            key: Self::repetition_key(&position),
            start: position.clone(),
            position,
            start_fen: None,
            undo_stack: Vec::new(),
        }
    }
}

impl ChessRules {
    /// Engine starting from `fen`
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let mut rules = Self::default();
        rules.load_fen(fen)?;
        Ok(rules)
    }

    fn parse_fen(fen: &str) -> Result<Chess, RulesError> {
        let invalid = |reason: String| RulesError::InvalidFen {
            fen: fen.to_string(),
            reason,
        };
        let parsed: Fen = fen.trim().parse().map_err(|e| invalid(format!("{e}")))?;
        parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(format!("{e}")))
    }

    fn export_fen(position: &Chess) -> String {
        Fen::from_position(position.clone(), EnPassantMode::Legal).to_string()
    }

    /// Board, side to move, castling rights and en passant square
    fn repetition_key(position: &Chess) -> String {
        Self::export_fen(position)
            .split_whitespace()
            .take(4)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn is_threefold_repetition(&self) -> bool {
        let earlier = self
            .undo_stack
            .iter()
            .filter(|entry| entry.key == self.key)
            .count();
        earlier + 1 >= 3
    }

    /// `(from, to, promotion)` as the board widget sees the move
    fn endpoints(m: &Move) -> Option<(Square, Square, Option<Role>)> {
        match m {
            Move::Normal {
                from,
                to,
                promotion,
                ..
            } => Some((to_square(*from), to_square(*to), *promotion)),
            Move::EnPassant { from, to } => Some((to_square(*from), to_square(*to), None)),
            Move::Castle { king, rook } => {
                let king_to_file = if rook.file() > king.file() { 6 } else { 2 };
                let king_from = to_square(*king);
                let king_to = Square::new(king_to_file, king_from.rank.index())?;
                Some((king_from, king_to, None))
            }
            Move::Put { .. } => None,
        }
    }

    /// Resolve a request to exactly one legal move
    fn find_move(&self, request: MoveRequest) -> Result<Move, RulesError> {
        let candidates: Vec<(Move, Option<Role>)> = self
            .position
            .legal_moves()
            .into_iter()
            .filter_map(|m| {
                let (from, to, promotion) = Self::endpoints(&m)?;
                (from == request.from && to == request.to).then_some((m, promotion))
            })
            .collect();

        let Some((first, first_promotion)) = candidates.first() else {
            return Err(RulesError::IllegalMove {
                from: request.from,
                to: request.to,
            });
        };

        if first_promotion.is_none() {
            // Non-promoting moves ignore any promotion hint
            return Ok(first.clone());
        }

        let Some(wanted) = request.promotion else {
            return Err(RulesError::PromotionRequired {
                from: request.from,
                to: request.to,
            });
        };
        let wanted = to_role(wanted);
        candidates
            .into_iter()
            .find(|(_, promotion)| *promotion == Some(wanted))
            .map(|(m, _)| m)
            .ok_or(RulesError::IllegalMove {
                from: request.from,
                to: request.to,
            })
    }

    /// Play a legal move, record it and push the undo entry
    fn play(&mut self, m: Move) -> Result<MoveRecord, RulesError> {
        let (from, to, _) = Self::endpoints(&m).ok_or_else(|| RulesError::Engine {
            message: "drop moves are not part of standard chess".to_string(),
        })?;
        let color = self.position.turn();
        let san = San::from_move(&self.position, &m).to_string();

        let previous = self.position.clone();
        let next = previous
            .clone()
            .play(&m)
            .map_err(|e| RulesError::Engine {
                message: format!("{e}"),
            })?;

        let suffix = if next.is_checkmate() {
            "#"
        } else if next.is_check() {
            "+"
        } else {
            ""
        };

        let record = MoveRecord {
            piece_type: from_role(m.role()),
            piece_color: from_color(color),
            from,
            to,
            captured: m.capture().map(from_role),
            promotion: m.promotion().map(from_role),
            san: format!("{san}{suffix}"),
        };

        let key = std::mem::replace(&mut self.key, Self::repetition_key(&next));
        self.position = next;
        self.undo_stack.push(UndoEntry {
            previous,
            key,
            record: record.clone(),
        });
        Ok(record)
    }
}

impl RulesEngine for ChessRules {
    fn load_fen(&mut self, fen: &str) -> Result<(), RulesError> {
        let position = Self::parse_fen(fen)?;
        let canonical = Self::export_fen(&position);
        self.start_fen = (canonical != Self::export_fen(&Chess::default())).then_some(canonical);
        self.start = position.clone();
        self.key = Self::repetition_key(&position);
        self.position = position;
        self.undo_stack.clear();
        Ok(())
    }

    fn load_pgn(&mut self, pgn: &str) -> Result<Vec<MoveRecord>, RulesError> {
        let movetext = movetext::parse(pgn);
        if let Some(unreadable) = movetext.unreadable {
            return Err(RulesError::InvalidHistory {
                ply: 0,
                token: unreadable.text,
                reason: unreadable.reason.to_string(),
            });
        }
        let mut replay = match &movetext.fen {
            Some(fen) => ChessRules::from_fen(fen)?,
            None => ChessRules::default(),
        };

        let mut records = Vec::with_capacity(movetext.sans.len());
        for (index, token) in movetext.sans.iter().enumerate() {
            let invalid = |reason: String| RulesError::InvalidHistory {
                ply: index + 1,
                token: token.clone(),
                reason,
            };
            let san: SanPlus = token.parse().map_err(|e| invalid(format!("{e}")))?;
            let m = san
                .san
                .to_move(&replay.position)
                .map_err(|e| invalid(format!("{e}")))?;
            records.push(replay.play(m).map_err(|e| invalid(e.to_string()))?);
        }

        *self = replay;
        Ok(records)
    }

    fn fen(&self) -> String {
        Self::export_fen(&self.position)
    }

    fn pgn(&self) -> String {
        let mut pgn = String::new();
        if let Some(fen) = &self.start_fen {
            pgn.push_str("[SetUp \"1\"]\n");
            pgn.push_str(&format!("[FEN \"{fen}\"]\n\n"));
        }

        let mut move_number = self.start.fullmoves().get();
        let mut turn = self.start.turn();
        let mut parts: Vec<String> = Vec::with_capacity(self.undo_stack.len() * 3 / 2);
        for (index, entry) in self.undo_stack.iter().enumerate() {
            match turn {
                Color::White => parts.push(format!("{move_number}.")),
                Color::Black if index == 0 => parts.push(format!("{move_number}...")),
                Color::Black => {}
            }
            parts.push(entry.record.san.clone());
            if turn == Color::Black {
                move_number += 1;
            }
            turn = !turn;
        }
        pgn.push_str(&parts.join(" "));
        pgn
    }

    fn legal_targets(&self, from: Option<Square>) -> Vec<LegalTarget> {
        let mut targets: Vec<LegalTarget> = Vec::new();
        for m in self.position.legal_moves() {
            let Some((move_from, to, promotion)) = Self::endpoints(&m) else {
                continue;
            };
            if from.is_some_and(|square| square != move_from) {
                continue;
            }
            // Four promotion moves share one destination
            if targets.iter().any(|t| t.from == move_from && t.to == to) {
                continue;
            }
            targets.push(LegalTarget {
                from: move_from,
                to,
                requires_promotion: promotion.is_some(),
            });
        }
        targets
    }

    fn apply(&mut self, request: MoveRequest) -> Result<MoveRecord, RulesError> {
        let m = self.find_move(request)?;
        self.play(m)
    }

    fn undo(&mut self) -> Option<MoveRecord> {
        let entry = self.undo_stack.pop()?;
        self.position = entry.previous;
        self.key = entry.key;
        Some(entry.record)
    }

    fn history_len(&self) -> usize {
        self.undo_stack.len()
    }

    fn start_move_number(&self) -> usize {
        self.start.fullmoves().get() as usize
    }

    fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_stalemate() || self.is_draw()
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn is_draw(&self) -> bool {
        self.position.is_insufficient_material()
            || self.position.halfmoves() >= 100
            || self.is_threefold_repetition()
    }

    fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    fn is_check(&self) -> bool {
        self.position.is_check()
    }

    fn turn(&self) -> PieceColor {
        from_color(self.position.turn())
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position
            .board()
            .piece_at(to_engine_square(square))
            .map(|piece| Piece::new(from_color(piece.color), from_role(piece.role)))
    }
}

/// Pieces of a FEN placement field, indexed by [`Square::index`]
///
/// Only the first field of `position` is read, so a full FEN works too.
pub fn parse_placement(position: &str) -> Result<[Option<Piece>; 64], RulesError> {
    let placement = position.split_whitespace().next().unwrap_or_default();
    let board: Board = placement.parse().map_err(|e| RulesError::InvalidFen {
        fen: position.to_string(),
        reason: format!("{e}"),
    })?;

    let mut grid = [None; 64];
    for square in Square::all() {
        grid[square.index() as usize] = board
            .piece_at(to_engine_square(square))
            .map(|piece| Piece::new(from_color(piece.color), from_role(piece.role)));
    }
    Ok(grid)
}

fn to_square(square: shakmaty::Square) -> Square {
    // shakmaty squares are a fieldless #[repr(u8)] enum numbered 0-63
    let index = square as u8;
    Square {
        rank: Rank(index / 8),
        file: File(index % 8),
    }
}

fn to_engine_square(square: Square) -> shakmaty::Square {
    shakmaty::Square::new(u32::from(square.index()))
}

fn from_color(color: Color) -> PieceColor {
    match color {
        Color::White => PieceColor::White,
        Color::Black => PieceColor::Black,
    }
}

fn from_role(role: Role) -> PieceType {
    match role {
        Role::Pawn => PieceType::Pawn,
        Role::Knight => PieceType::Knight,
        Role::Bishop => PieceType::Bishop,
        Role::Rook => PieceType::Rook,
        Role::Queen => PieceType::Queen,
        Role::King => PieceType::King,
    }
}

fn to_role(piece_type: PieceType) -> Role {
    match piece_type {
        PieceType::Pawn => Role::Pawn,
        PieceType::Knight => Role::Knight,
        PieceType::Bishop => Role::Bishop,
        PieceType::Rook => Role::Rook,
        PieceType::Queen => Role::Queen,
        PieceType::King => Role::King,
    }
}
