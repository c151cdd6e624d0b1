//! Space-separated movetext tokens.
//!
//! Tokens come from splitting on single spaces, so empty tokens are kept and
//! joining with `' '` restores the line. Brace comments and parenthesised
//! variations may span several tokens; every token they cover is tagged.

use crate::error_table::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Produced by consecutive spaces.
    Empty,
    /// `12.` (White to move) or `12...` (Black to move).
    MoveNumber { number: u32, side: Side },
    Move,
    /// `1-0`, `0-1`, `1/2-1/2` or `*`.
    Result,
    Comment,
    Variation,
    /// Numeric annotation glyph such as `$2`.
    Nag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
}

pub const RESULTS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

pub fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut in_comment = false;
    let mut depth = 0usize;

    for text in line.split(' ') {
        let kind = if depth > 0 {
            TokenKind::Variation
        } else if in_comment {
            TokenKind::Comment
        } else if text.starts_with('{') {
            TokenKind::Comment
        } else if text.starts_with('(') {
            TokenKind::Variation
        } else {
            classify(text)
        };

        if matches!(kind, TokenKind::Comment | TokenKind::Variation) {
            scan_delimiters(text, &mut in_comment, &mut depth);
        }
        tokens.push(Token { text, kind });
    }

    tokens
}

/// Classify a token that is not inside a comment or variation.
pub fn classify(text: &str) -> TokenKind {
    if text.is_empty() {
        return TokenKind::Empty;
    }
    if RESULTS.contains(&text) {
        return TokenKind::Result;
    }
    if let Some(digits) = text.strip_prefix('$') {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return TokenKind::Nag;
        }
    }
    if let Some(kind) = move_number(text) {
        return kind;
    }
    TokenKind::Move
}

fn move_number(text: &str) -> Option<TokenKind> {
    let (digits, side) = match text.strip_suffix("...") {
        Some(d) => (d, Side::Black),
        None => (text.strip_suffix('.')?, Side::White),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let number = digits.parse().ok()?;
    Some(TokenKind::MoveNumber { number, side })
}

fn scan_delimiters(text: &str, in_comment: &mut bool, depth: &mut usize) {
    for c in text.chars() {
        match c {
            '{' => *in_comment = true,
            '}' => *in_comment = false,
            '(' if !*in_comment => *depth += 1,
            ')' if !*in_comment => *depth = depth.saturating_sub(1),
            _ => {}
        }
    }
}

/// Move text with trailing `?`/`!` glyphs removed.
pub fn strip_glyphs(text: &str) -> &str {
    text.trim_end_matches(['?', '!'])
}
