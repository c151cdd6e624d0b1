//! Annotate a PGN file with Inaccuracy / Mistake / Blunder labels taken from
//! each game's Lichess analysis page.
//!
//! Usage: pgn-annotator <input_file> <output_file> [--log-level INFO] [--verify-moves]

use std::path::PathBuf;

use annotator::annotate_core::MatchPolicy;
use annotator::clients::lichess::LichessClient;
use annotator::config::Config;
use annotator::pipeline::{self, TracingReporter};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pgn-annotator",
    about = "Reads a PGN file and marks each move the review page flags as an Inaccuracy, Mistake or Blunder"
)]
struct Args {
    /// Path to the input PGN file
    input_file: PathBuf,

    /// Path to save the annotated PGN file
    output_file: PathBuf,

    /// Set the logging level
    #[arg(long, value_enum, ignore_case = true, default_value = "INFO")]
    log_level: LogLevel,

    /// Only annotate a move when its text matches the flagged move on the review page
    #[arg(long)]
    verify_moves: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "UPPER")]
enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| args.log_level.directive().into()),
        )
        .init();

    let config = Config::from_env();
    let client = LichessClient::new(&config)?;
    let policy = if args.verify_moves {
        MatchPolicy::VerifyMoveText
    } else {
        MatchPolicy::NumberAndSide
    };

    let mut reporter = TracingReporter;
    let summary = pipeline::run(
        &args.input_file,
        &args.output_file,
        &client,
        &mut reporter,
        policy,
    )
    .await?;

    tracing::info!(
        games = summary.games,
        annotated_games = summary.annotated_games,
        annotated_moves = summary.annotated_moves,
        skipped = summary.skipped.len(),
        "Done"
    );
    tracing::debug!("Summary: {}", serde_json::to_string(&summary)?);
    for (index, reason) in &summary.skipped {
        tracing::debug!(game = index, reason = %reason, "Skipped");
    }

    Ok(())
}
