//! Error extraction from an annotated move list.
//!
//! The review page prints flagged moves as
//! `12. Qh5?? { (0.30 → -3.20) Blunder. Nf3 was best. }` for White and
//! `12... Nd4?! { (-0.10 → 0.60) Inaccuracy. ... }` for Black.

use std::sync::LazyLock;

use regex::Regex;

use crate::error_table::{ErrorRecord, ErrorTable, Severity, Side};

/// Number, side marker, move, glyph, category.
/// The move excludes `?`/`!` so the glyph is captured whole.
static FLAGGED_MOVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(\d+)(\.\.\.|\.)\s+([^\s?!]+)(\?\?|\?!|\?)\s+\{\s+\([^)]+\)\s+(Inaccuracy|Mistake|Blunder)\.",
    )
    .unwrap()
});

/// Build the error table for one game from the review page's move list.
///
/// Matches are inserted in text order, so a repeated `(number, side)` keeps the
/// last one; repeats are listed in [`ErrorTable::overwritten`].
pub fn extract_errors(annotated_text: &str) -> ErrorTable {
    let mut table = ErrorTable::new();

    for cap in FLAGGED_MOVE_RE.captures_iter(annotated_text) {
        let Ok(move_number) = cap[1].parse::<u32>() else {
            continue;
        };
        let side = if &cap[2] == "..." { Side::Black } else { Side::White };
        let Ok(severity) = cap[5].parse::<Severity>() else {
            continue;
        };

        table.insert(
            move_number,
            ErrorRecord {
                side,
                move_text: cap[3].to_string(),
                severity,
                symbol: cap[4].to_string(),
            },
        );
    }

    table
}
