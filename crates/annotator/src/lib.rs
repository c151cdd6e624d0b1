//! PGN annotator: fetches review pages and writes move-quality labels into games.

pub mod clients;
pub mod config;
pub mod error;
pub mod pipeline;

pub use annotate_core;
