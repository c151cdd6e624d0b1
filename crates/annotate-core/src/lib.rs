//! Move-quality annotation for PGN batches.
//!
//! `extract` turns a review page's annotated move list into an [`ErrorTable`];
//! `annotate` merges that table into a game's move-list line. Nothing here does
//! I/O or logging.

pub mod annotate;
pub mod error_table;
pub mod extract;
pub mod pgn;
pub mod tokens;

pub use annotate::{annotate, annotate_with, merge_move_line, AnnotatedGame, MatchPolicy, MergeStats};
pub use error_table::{ErrorKey, ErrorRecord, ErrorTable, MoveErrors, Severity, Side};
pub use extract::extract_errors;
pub use pgn::{split_games, GameBlock, PgnBatch};
