//! Merge of an [`ErrorTable`] into a game's move-list line.

use serde::Serialize;

use crate::error_table::{ErrorTable, Severity, Side};
use crate::pgn::GameBlock;
use crate::tokens::{strip_glyphs, tokenize, Token, TokenKind};

/// How a table record is matched to a move token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Move number and side only.
    #[default]
    NumberAndSide,
    /// Move number and side, and the token (glyphs stripped) must equal the record's move.
    VerifyMoveText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MergeStats {
    pub annotated: usize,
    /// Moves that already carried a severity comment from an earlier run.
    pub already_annotated: usize,
    /// Records rejected under [`MatchPolicy::VerifyMoveText`].
    pub mismatched: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub line: String,
    pub stats: MergeStats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedGame {
    pub game: GameBlock,
    pub stats: MergeStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
    InMoveSequence,
    Terminated,
}

/// Annotate a game by move number and side.
///
/// Games without a review URL or without a move-list line come back unchanged.
pub fn annotate(game: &GameBlock, table: &ErrorTable) -> GameBlock {
    annotate_with(game, table, MatchPolicy::default()).game
}

pub fn annotate_with(game: &GameBlock, table: &ErrorTable, policy: MatchPolicy) -> AnnotatedGame {
    let unchanged = || AnnotatedGame {
        game: game.clone(),
        stats: MergeStats::default(),
    };

    if game.reference_url().is_none() {
        return unchanged();
    }
    let Some(line) = game.move_list_line() else {
        return unchanged();
    };

    let outcome = merge_move_line(line, table, policy);
    AnnotatedGame {
        game: game.with_move_list_line(&outcome.line),
        stats: outcome.stats,
    }
}

/// Walk a move-list line and append `{Severity}` after every flagged move,
/// placed after any NAGs that directly follow the move.
///
/// Move numbers only change on marker tokens; the side flips after each move.
/// Everything from the result token on is copied as is.
pub fn merge_move_line(line: &str, table: &ErrorTable, policy: MatchPolicy) -> MergeOutcome {
    let tokens = tokenize(line);
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    let mut stats = MergeStats::default();

    let mut state = WalkState::InMoveSequence;
    let mut move_number = 1u32;
    let mut side = Side::White;
    // Token index the pending severity comment is appended to.
    let mut pending: Option<(usize, Severity)> = None;

    for (i, token) in tokens.iter().enumerate() {
        if state == WalkState::Terminated {
            out.push(token.text.to_string());
            continue;
        }

        match token.kind {
            TokenKind::MoveNumber { number, side: marker_side } => {
                move_number = number;
                side = marker_side;
            }
            TokenKind::Result => {
                state = WalkState::Terminated;
            }
            TokenKind::Move => {
                let anchor = i + nag_run(&tokens[i + 1..]);
                match table.get(move_number, side) {
                    Some(_) if has_severity_suffix(&tokens[anchor + 1..]) => {
                        stats.already_annotated += 1;
                    }
                    Some(record)
                        if policy == MatchPolicy::VerifyMoveText
                            && strip_glyphs(token.text) != record.move_text =>
                    {
                        stats.mismatched += 1;
                    }
                    Some(record) => {
                        stats.annotated += 1;
                        pending = Some((anchor, record.severity));
                    }
                    None => {}
                }
                side = side.flip();
            }
            TokenKind::Empty | TokenKind::Comment | TokenKind::Variation | TokenKind::Nag => {}
        }

        match pending {
            Some((at, severity)) if at == i => {
                out.push(format!("{} {}", token.text, severity.comment()));
                pending = None;
            }
            _ => out.push(token.text.to_string()),
        }
    }

    MergeOutcome {
        line: out.join(" "),
        stats,
    }
}

/// Number of NAG tokens directly after a move.
fn nag_run(rest: &[Token<'_>]) -> usize {
    rest.iter().take_while(|t| t.kind == TokenKind::Nag).count()
}

/// Whether the next non-empty token is a `{Severity}` comment.
fn has_severity_suffix(rest: &[Token<'_>]) -> bool {
    rest.iter()
        .find(|t| t.kind != TokenKind::Empty)
        .is_some_and(|t| Severity::from_comment(t.text).is_some())
}
