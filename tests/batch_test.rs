//! End-to-end batch runs against a stub review source.

use annotate_core::MatchPolicy;
use annotator::error::{AnnotatorError, FetchFailure, GameSkip};
use annotator::pipeline::{annotate_batch, run, TracingReporter};

mod common;
use common::*;

#[tokio::test]
async fn test_batch_annotates_in_input_order() {
    let source = StubSource::new()
        .with_page(GAME_ONE_URL, GAME_ONE_REVIEW)
        .with_page(GAME_THREE_URL, GAME_THREE_REVIEW);
    let mut reporter = TracingReporter;

    let (out, summary) = annotate_batch(BATCH, &source, &mut reporter, MatchPolicy::default()).await;

    assert_eq!(summary.games, 3);
    assert_eq!(summary.annotated_games, 2);
    assert_eq!(summary.annotated_moves, 4);
    assert_eq!(summary.skipped, vec![(1, GameSkip::NoReferenceFound)]);

    // Only reviewed games are fetched, in order.
    assert_eq!(source.requested(), vec![GAME_ONE_URL, GAME_THREE_URL]);

    let expected = BATCH
        .replace(
            "4. Nxe5 Qg5 5. Nxf7 Qxg2 6. Rf1 Qxe4+ 7. Be2 Nf3#",
            "4. Nxe5 {Inaccuracy} Qg5 5. Nxf7 {Blunder} Qxg2 6. Rf1 Qxe4+ 7. Be2 {Blunder} Nf3#",
        )
        .replace("7. f4 Qb6 1-0", "7. f4 Qb6 {Inaccuracy} 1-0");
    assert_eq!(out, expected);
}

#[tokio::test]
async fn test_unreachable_review_leaves_game_untouched() {
    let source = StubSource::new()
        .with_page(GAME_ONE_URL, GAME_ONE_REVIEW)
        .with_failure(GAME_THREE_URL, FetchFailure::Status(503));
    let mut reporter = TracingReporter;

    let (out, summary) = annotate_batch(BATCH, &source, &mut reporter, MatchPolicy::default()).await;

    assert_eq!(summary.annotated_games, 1);
    assert_eq!(
        summary.skipped,
        vec![
            (1, GameSkip::NoReferenceFound),
            (2, GameSkip::Fetch(FetchFailure::Status(503))),
        ]
    );
    assert!(out.contains("7. f4 Qb6 1-0"));
    assert!(out.contains("7. Be2 {Blunder} Nf3# 0-1"));
}

#[tokio::test]
async fn test_batch_without_reviews_is_byte_identical() {
    let source = StubSource::new();
    let mut reporter = TracingReporter;

    let (out, summary) = annotate_batch(BATCH, &source, &mut reporter, MatchPolicy::default()).await;

    assert_eq!(out, BATCH);
    assert_eq!(summary.annotated_games, 0);
    assert_eq!(summary.skipped.len(), 3);
}

#[tokio::test]
async fn test_header_text_inside_comment_is_not_a_game_boundary() {
    let pgn = "[Event \"Study\"]\n[Site \"https://lichess.org/q7ZvsdUF\"]\n\n\
1. e4 e5 2. Nf3 Nc6 3. Bc4 Nd4 4. Nxe5 { pasted notes:\n\
\n\
[Event \"Not a game\"]\n\
end } Qg5 0-1\n";
    let source = StubSource::new().with_page(GAME_ONE_URL, GAME_ONE_REVIEW);
    let mut reporter = TracingReporter;

    let (out, summary) = annotate_batch(pgn, &source, &mut reporter, MatchPolicy::default()).await;

    assert_eq!(summary.games, 1);
    assert!(out.starts_with(
        "[Event \"Study\"]\n[Site \"https://lichess.org/q7ZvsdUF\"]\n\n\
         1. e4 e5 2. Nf3 Nc6 3. Bc4 Nd4 4. Nxe5 {Inaccuracy} { pasted notes:\n"
    ));
    assert!(out.ends_with("[Event \"Not a game\"]\nend } Qg5 0-1\n"));
}

#[tokio::test]
async fn test_run_writes_output_file() {
    let dir = std::env::temp_dir();
    let input = dir.join(format!("pgn_annotator_in_{}.pgn", unique_suffix()));
    let output = dir.join(format!("pgn_annotator_out_{}.pgn", unique_suffix()));
    std::fs::write(&input, BATCH).unwrap();

    let source = StubSource::new().with_page(GAME_ONE_URL, GAME_ONE_REVIEW);
    let mut reporter = TracingReporter;
    let summary = run(&input, &output, &source, &mut reporter, MatchPolicy::default())
        .await
        .unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(summary.annotated_games, 1);
    assert!(written.contains("5. Nxf7 {Blunder} Qxg2"));

    let _ = std::fs::remove_file(&input);
    let _ = std::fs::remove_file(&output);
}

#[tokio::test]
async fn test_run_reports_unwritable_output() {
    let dir = std::env::temp_dir();
    let input = dir.join(format!("pgn_annotator_in_{}.pgn", unique_suffix()));
    std::fs::write(&input, BATCH).unwrap();
    let output = dir.join("no_such_dir_for_annotator").join("out.pgn");

    let source = StubSource::new();
    let mut reporter = TracingReporter;
    let err = run(&input, &output, &source, &mut reporter, MatchPolicy::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AnnotatorError::Write { .. }));
    let _ = std::fs::remove_file(&input);
}

#[tokio::test]
async fn test_header_only_game_is_skipped_and_next_game_annotated() {
    let pgn = "[Event \"Aborted\"]\n[Site \"https://lichess.org/aaaa1111\"]\n[Result \"*\"]\n\n\
[Event \"Rated\"]\n[Site \"https://lichess.org/q7ZvsdUF\"]\n\n\
1. e4 e5 2. Nf3 Nc6 3. Bc4 Nd4 4. Nxe5 Qg5 0-1\n";
    let source = StubSource::new().with_page(GAME_ONE_URL, GAME_ONE_REVIEW);
    let mut reporter = TracingReporter;

    let (out, summary) = annotate_batch(pgn, &source, &mut reporter, MatchPolicy::default()).await;

    assert_eq!(summary.games, 2);
    assert_eq!(summary.annotated_games, 1);
    assert_eq!(summary.skipped, vec![(0, GameSkip::NoMoveListFound)]);
    assert_eq!(source.requested(), vec![GAME_ONE_URL]);
    assert_eq!(out, pgn.replace("4. Nxe5 Qg5", "4. Nxe5 {Inaccuracy} Qg5"));
}
