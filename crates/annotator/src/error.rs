//! Annotator error types

use std::path::PathBuf;

use thiserror::Error;

/// Why a review page could not supply an annotated move list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("Request error: {0}")]
    Request(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Could not find PGN content in the page")]
    MissingMoveList,
}

/// A game left unannotated. None of these stop the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameSkip {
    #[error("No review URL found")]
    NoReferenceFound,

    #[error("No move list found")]
    NoMoveListFound,

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchFailure),
}

/// Failures that abort the whole run.
#[derive(Error, Debug)]
pub enum AnnotatorError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    Client(String),
}
