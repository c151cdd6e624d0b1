//! Batch driver: split, fetch, merge, reassemble.
//!
//! Games are handled one at a time in input order. A game that cannot be
//! annotated is copied through unchanged and the batch carries on.

use std::future::Future;
use std::path::Path;

use annotate_core::{
    annotate_with, extract_errors, split_games, ErrorTable, GameBlock, MatchPolicy, MergeStats,
};
use serde::Serialize;

use crate::error::{AnnotatorError, FetchFailure, GameSkip};

/// Supplies the annotated move list behind a review URL.
pub trait ReviewSource {
    fn fetch_annotated_text(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<String, FetchFailure>> + Send;
}

/// Receives per-game progress from [`annotate_batch`].
pub trait Reporter {
    fn game_started(&mut self, index: usize, game: &GameBlock);
    fn game_skipped(&mut self, index: usize, reason: &GameSkip);
    /// Called once the review page has been parsed, before the merge.
    fn table_extracted(&mut self, index: usize, url: &str, table: &ErrorTable);
    fn game_annotated(&mut self, index: usize, url: &str, table_size: usize, stats: &MergeStats);
}

/// Reports through `tracing`.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn game_started(&mut self, index: usize, game: &GameBlock) {
        tracing::info!("----------------------------");
        tracing::info!(
            game = index,
            lines = game.lines().len(),
            event = game.extract_header("Event").unwrap_or("?"),
            white = game.extract_header("White").unwrap_or("?"),
            black = game.extract_header("Black").unwrap_or("?"),
            "Processing game"
        );
        if let Some(line) = game.move_list_line() {
            tracing::debug!(game = index, "Line of interest: {line}");
        }
    }

    fn game_skipped(&mut self, index: usize, reason: &GameSkip) {
        tracing::warn!(game = index, reason = %reason, "Game left unannotated");
    }

    fn table_extracted(&mut self, index: usize, url: &str, table: &ErrorTable) {
        tracing::debug!(game = index, url, "Errors by move: {}", table.to_json());
        for key in table.overwritten() {
            tracing::debug!(
                game = index,
                move_number = key.move_number,
                side = %key.side,
                "Duplicate review entry replaced"
            );
        }
    }

    fn game_annotated(&mut self, index: usize, url: &str, table_size: usize, stats: &MergeStats) {
        tracing::info!(
            game = index,
            url,
            flagged = table_size,
            annotated = stats.annotated,
            already_annotated = stats.already_annotated,
            mismatched = stats.mismatched,
            "Game annotated"
        );
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub games: usize,
    pub annotated_games: usize,
    pub annotated_moves: usize,
    #[serde(skip)]
    pub skipped: Vec<(usize, GameSkip)>,
}

/// Annotate every game in `pgn` and return the rewritten batch.
pub async fn annotate_batch<S, R>(
    pgn: &str,
    source: &S,
    reporter: &mut R,
    policy: MatchPolicy,
) -> (String, BatchSummary)
where
    S: ReviewSource,
    R: Reporter,
{
    let batch = split_games(pgn);
    let mut summary = BatchSummary {
        games: batch.games.len(),
        ..Default::default()
    };
    let mut output = String::with_capacity(pgn.len());

    for (index, game) in batch.games.iter().enumerate() {
        reporter.game_started(index, game);

        match annotate_game(index, game, source, reporter, policy).await {
            Ok((annotated, url, table_size, stats)) => {
                reporter.game_annotated(index, &url, table_size, &stats);
                summary.annotated_games += 1;
                summary.annotated_moves += stats.annotated;
                output.push_str(&annotated.to_pgn());
            }
            Err(reason) => {
                reporter.game_skipped(index, &reason);
                summary.skipped.push((index, reason));
                output.push_str(&game.to_pgn());
            }
        }
    }

    (output, summary)
}

async fn annotate_game<S: ReviewSource, R: Reporter>(
    index: usize,
    game: &GameBlock,
    source: &S,
    reporter: &mut R,
    policy: MatchPolicy,
) -> Result<(GameBlock, String, usize, MergeStats), GameSkip> {
    let url = game.reference_url().ok_or(GameSkip::NoReferenceFound)?;
    if game.move_list_index().is_none() {
        return Err(GameSkip::NoMoveListFound);
    }

    let text = source.fetch_annotated_text(url).await?;
    let table = extract_errors(&text);
    reporter.table_extracted(index, url, &table);

    let annotated = annotate_with(game, &table, policy);
    Ok((annotated.game, url.to_string(), table.len(), annotated.stats))
}

/// Read `input`, annotate it, write `output`. Only file errors are returned.
pub async fn run<S, R>(
    input: &Path,
    output: &Path,
    source: &S,
    reporter: &mut R,
    policy: MatchPolicy,
) -> Result<BatchSummary, AnnotatorError>
where
    S: ReviewSource,
    R: Reporter,
{
    tracing::info!("Reading from: {}", input.display());
    let pgn = tokio::fs::read_to_string(input)
        .await
        .map_err(|source| AnnotatorError::Read {
            path: input.to_path_buf(),
            source,
        })?;

    let (annotated, summary) = annotate_batch(&pgn, source, reporter, policy).await;

    tracing::info!("Writing the annotated file to: {}", output.display());
    tokio::fs::write(output, annotated)
        .await
        .map_err(|source| AnnotatorError::Write {
            path: output.to_path_buf(),
            source,
        })?;

    Ok(summary)
}
