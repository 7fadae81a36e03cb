//! Terminal board widget
//!
//! Draws the board as text, one rank per line, with style markers around each
//! cell:
//!
//! | Style | Marker |
//! |---|---|
//! | `Selected` | `[P]` |
//! | `MoveHint` | ` * ` on an empty square |
//! | `CaptureHint` | `(p)` |
//! | `LastMove` | `<P>` |
//! | `Check` | `!K!` |

use super::{BoardWidget, SquareStyle, SquareStyles};
use crate::game::rules::parse_placement;
use crate::game::types::{Piece, PieceColor, Square};
use std::io::Write;
use tracing::error;

/// Board widget writing to any `io::Write`
pub struct TextBoard<W: Write> {
    out: W,
    orientation: PieceColor,
}

impl<W: Write> TextBoard<W> {
    pub fn new(out: W, orientation: PieceColor) -> Self {
        Self { out, orientation }
    }

    pub fn flip(&mut self) {
        self.orientation = self.orientation.opposite();
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Lines of the board, top rank first from the viewer's side
    ///
    /// A position that does not parse is logged and drawn as an empty board
    /// with a `?` footer.
    pub fn draw(&self, position: &str, styles: &SquareStyles) -> Vec<String> {
        let (cells, readable) = match parse_placement(position) {
            Ok(cells) => (cells, true),
            Err(e) => {
                error!("[RENDER] Cannot draw position: {}", e);
                ([None; 64], false)
            }
        };
        let (ranks, files): (Vec<u8>, Vec<u8>) = match self.orientation {
            PieceColor::White => ((0..8).rev().collect(), (0..8).collect()),
            PieceColor::Black => ((0..8).collect(), (0..8).rev().collect()),
        };

        let mut lines = Vec::with_capacity(10);
        for &rank in &ranks {
            let mut line = format!("{} ", rank + 1);
            for &file in &files {
                let Some(square) = Square::new(file, rank) else {
                    continue;
                };
                let piece = cells[square.index() as usize];
                line.push_str(&cell(piece, square, styles.get(&square).copied()));
            }
            lines.push(line);
        }

        let mut footer = String::from("  ");
        for &file in &files {
            footer.push(' ');
            footer.push(char::from(b'a' + file));
            footer.push(' ');
        }
        if !readable {
            footer.push('?');
        }
        lines.push(footer);
        lines
    }
}

impl<W: Write> BoardWidget for TextBoard<W> {
    fn render(&mut self, position: &str, styles: &SquareStyles) {
        let text = self.draw(position, styles).join("\n");
        if let Err(e) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            error!("[RENDER] Failed to draw board: {}", e);
        }
    }
}

fn cell(piece: Option<Piece>, square: Square, style: Option<SquareStyle>) -> String {
    let empty = if square.is_light() { '.' } else { ':' };
    let glyph = piece.map_or(empty, Piece::to_fen_char);
    match style {
        Some(SquareStyle::Selected) => format!("[{glyph}]"),
        Some(SquareStyle::CaptureHint) => format!("({glyph})"),
        Some(SquareStyle::MoveHint) if piece.is_none() => " * ".to_string(),
        Some(SquareStyle::MoveHint) => format!("({glyph})"),
        Some(SquareStyle::LastMove) => format!("<{glyph}>"),
        Some(SquareStyle::Check) => format!("!{glyph}!"),
        None => format!(" {glyph} "),
    }
}
