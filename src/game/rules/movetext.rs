//! PGN movetext tokenizer
//!
//! Reduces a PGN document to its starting FEN (if any) and the bare SAN tokens
//! of the main line. Comments, variations, NAGs, move numbers and the result
//! marker are dropped. Tag pairs are found by their brackets, so headers and
//! moves may share a line.

use std::str::Chars;

/// Main line of a PGN document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Movetext {
    /// Value of the `[FEN "..."]` header, if present
    pub fen: Option<String>,
    /// SAN tokens in playing order, suffixes and annotations stripped
    pub sans: Vec<String>,
    /// First part of the document that could not be read
    pub unreadable: Option<Unreadable>,
}

/// Text the tokenizer gave up on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unreadable {
    pub text: String,
    pub reason: &'static str,
}

const RESULTS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// Split a PGN document into headers and main-line SAN tokens
pub fn parse(pgn: &str) -> Movetext {
    let mut movetext = Movetext::default();
    let mut cleaned = String::with_capacity(pgn.len());
    let mut variation_depth = 0usize;

    let mut chars = pgn.chars();
    while let Some(c) = chars.next() {
        match c {
            '{' => skip_past(&mut chars, '}'),
            // ';' comments run to the end of the line
            ';' => skip_past(&mut chars, '\n'),
            '(' => variation_depth += 1,
            ')' => variation_depth = variation_depth.saturating_sub(1),
            '[' if variation_depth == 0 => match read_tag(&mut chars) {
                Some(tag) => match parse_tag(&tag) {
                    Some((name, value)) if name.eq_ignore_ascii_case("FEN") => {
                        movetext.fen = Some(value.to_string());
                    }
                    Some(_) => {}
                    None => movetext.mark_unreadable(format!("[{tag}]"), "malformed tag pair"),
                },
                None => movetext.mark_unreadable("[".to_string(), "unterminated tag pair"),
            },
            _ if variation_depth > 0 => {}
            _ => {
                cleaned.push(c);
                continue;
            }
        }
        // Keep tokens on either side of a skipped span apart
        cleaned.push(' ');
    }

    let mut first_token: Option<&str> = None;
    let mut has_result = false;
    for token in cleaned.split_whitespace() {
        if RESULTS.contains(&token) {
            has_result = true;
            continue;
        }
        if token.starts_with('$') {
            continue;
        }
        first_token.get_or_insert(token);
        let san = strip_move_number(token).trim_end_matches(['!', '?']);
        if !san.is_empty() {
            movetext.sans.push(san.to_string());
        }
    }

    if let Some(token) = first_token {
        if movetext.sans.is_empty() && !has_result {
            movetext.mark_unreadable(token.to_string(), "movetext has no moves");
        }
    }
    movetext
}

impl Movetext {
    fn mark_unreadable(&mut self, text: String, reason: &'static str) {
        self.unreadable.get_or_insert(Unreadable { text, reason });
    }
}

fn skip_past(chars: &mut Chars<'_>, end: char) {
    for c in chars.by_ref() {
        if c == end {
            break;
        }
    }
}

/// Text up to the closing `]` outside quotes; `None` when it never closes
fn read_tag(chars: &mut Chars<'_>) -> Option<String> {
    let mut tag = String::new();
    let mut quoted = false;
    for c in chars.by_ref() {
        match c {
            '"' => quoted = !quoted,
            ']' if !quoted => return Some(tag),
            _ => {}
        }
        tag.push(c);
    }
    None
}

/// `Name "Value"` -> `(Name, Value)`
fn parse_tag(inner: &str) -> Option<(&str, &str)> {
    let (name, rest) = inner.trim().split_once(char::is_whitespace)?;
    let value = rest.trim().strip_prefix('"')?.strip_suffix('"')?;
    Some((name, value))
}

/// `"12."` -> `""`, `"3...Nf6"` -> `"Nf6"`, `"e4"` -> `"e4"`
fn strip_move_number(token: &str) -> &str {
    let after_digits = token.trim_start_matches(|c: char| c.is_ascii_digit());
    if after_digits.len() == token.len() || !after_digits.starts_with('.') {
        return token;
    }
    after_digits.trim_start_matches('.')
}
