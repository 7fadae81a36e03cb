//! Type definitions for board coordinates, pieces and move records
//!
//! Provides newtype patterns for the coordinates the session trades with the
//! board widget and the rules engine, so files and ranks are never mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Board coordinate representing a file (column) on the chessboard
///
/// Values range from 0 (file 'a') to 7 (file 'h').
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct File(pub u8);

impl File {
    /// Create a file from a character ('a'..='h')
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(File(c as u8 - b'a')),
            _ => None,
        }
    }

    /// Convert file to character ('a'..='h')
    pub fn to_char(self) -> char {
        (b'a' + self.0) as char
    }

    /// Get the file index (0-7)
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Board coordinate representing a rank (row) on the chessboard
///
/// Values range from 0 (rank 1) to 7 (rank 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(pub u8);

impl Rank {
    /// Create a rank from a number (1-8)
    pub fn from_number(n: u8) -> Option<Self> {
        if (1..=8).contains(&n) {
            Some(Rank(n - 1))
        } else {
            None
        }
    }

    /// Convert rank to number (1-8)
    pub fn to_number(self) -> u8 {
        self.0 + 1
    }

    /// Get the rank index (0-7)
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Board square (file, rank)
///
/// Squares are numbered `rank * 8 + file`, so `a1` is 0, `h1` is 7 and `h8` is 63.
/// This matches the rules engine's own numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub rank: Rank,
    pub file: File,
}

impl Square {
    /// Create a square from file and rank indices (both 0-7)
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square {
                rank: Rank(rank),
                file: File(file),
            })
        } else {
            None
        }
    }

    /// Create a square from its 0-63 index
    pub fn from_index(index: u8) -> Option<Self> {
        Square::new(index % 8, index / 8)
    }

    /// Square index (0-63)
    pub fn index(self) -> u8 {
        self.rank.0 * 8 + self.file.0
    }

    /// Create a square from algebraic notation (e.g., "e4")
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = File::from_char(chars.next()?)?;
        let rank = Rank::from_number(chars.next()?.to_digit(10)? as u8)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Square { rank, file })
    }

    /// Light squares are the ones where file + rank is odd (a1 is dark)
    pub fn is_light(self) -> bool {
        (self.file.0 + self.rank.0) % 2 == 1
    }

    /// All 64 squares, a1 first, h8 last
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).filter_map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file.to_char(), self.rank.to_number())
    }
}

/// Error returned when a square name cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid square '{0}'")]
pub struct ParseSquareError(pub String);

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s.trim()).ok_or_else(|| ParseSquareError(s.to_string()))
    }
}

/// Side of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    #[default]
    White,
    Black,
}

impl PieceColor {
    pub fn opposite(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceColor::White => "White",
            PieceColor::Black => "Black",
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of chess piece
///
/// Serialized by name (`"queen"`) in config files and by its one-letter code
/// (`'q'`) in the persisted capture lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    #[default]
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

impl PieceType {
    /// Lowercase one-letter code (`p n b r q k`)
    pub fn to_char(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    /// Parse a one-letter code, case-insensitive
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }

    /// Parse either a one-letter code or a full name ("q", "Queen")
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        let mut chars = code.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => PieceType::from_char(c),
            _ => match code.to_ascii_lowercase().as_str() {
                "pawn" => Some(PieceType::Pawn),
                "knight" => Some(PieceType::Knight),
                "bishop" => Some(PieceType::Bishop),
                "rook" => Some(PieceType::Rook),
                "queen" => Some(PieceType::Queen),
                "king" => Some(PieceType::King),
                _ => None,
            },
        }
    }

    /// Pieces a pawn may promote to
    pub fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            PieceType::Queen | PieceType::Rook | PieceType::Bishop | PieceType::Knight
        )
    }
}

/// A piece on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: PieceColor,
    pub piece_type: PieceType,
}

impl Piece {
    pub fn new(color: PieceColor, piece_type: PieceType) -> Self {
        Self { color, piece_type }
    }

    /// FEN letter: uppercase for White, lowercase for Black
    pub fn to_fen_char(self) -> char {
        let c = self.piece_type.to_char();
        match self.color {
            PieceColor::White => c.to_ascii_uppercase(),
            PieceColor::Black => c,
        }
    }
}

/// Move record produced by the rules engine for every accepted move
///
/// Immutable once appended to the move log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub piece_type: PieceType,
    pub piece_color: PieceColor,
    pub from: Square,
    pub to: Square,
    pub captured: Option<PieceType>,
    pub promotion: Option<PieceType>,
    /// Standard algebraic notation including check suffix (`"exd8=Q+"`)
    pub san: String,
}

impl MoveRecord {
    /// Move log line, e.g. `"White: e4"`
    pub fn display(&self) -> String {
        format!("{}: {}", self.piece_color.name(), self.san)
    }
}
