#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use annotator::error::FetchFailure;
use annotator::pipeline::ReviewSource;

/// Serves canned review pages and records which URLs were requested.
pub struct StubSource {
    pages: HashMap<String, Result<String, FetchFailure>>,
    pub requested: Mutex<Vec<String>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn with_page(mut self, url: &str, text: &str) -> Self {
        self.pages.insert(url.to_string(), Ok(text.to_string()));
        self
    }

    pub fn with_failure(mut self, url: &str, failure: FetchFailure) -> Self {
        self.pages.insert(url.to_string(), Err(failure));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl ReviewSource for StubSource {
    async fn fetch_annotated_text(&self, url: &str) -> Result<String, FetchFailure> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .unwrap_or(Err(FetchFailure::Status(404)))
    }
}

/// Generate a unique suffix based on timestamp to avoid file collisions.
pub fn unique_suffix() -> String {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}", ts % 1_000_000_000)
}

pub const GAME_ONE_URL: &str = "https://lichess.org/q7ZvsdUF";
pub const GAME_THREE_URL: &str = "https://lichess.org/Rk2pWm9a";

/// Three games: a reviewed one, a manually entered one, and a reviewed one
/// whose page will fail to load in some tests.
pub const BATCH: &str = "[Event \"Rated Blitz game\"]
[Site \"https://lichess.org/q7ZvsdUF\"]
[Date \"2024.03.02\"]
[White \"alice\"]
[Black \"bob\"]
[Result \"0-1\"]

1. e4 e5 2. Nf3 Nc6 3. Bc4 Nd4 4. Nxe5 Qg5 5. Nxf7 Qxg2 6. Rf1 Qxe4+ 7. Be2 Nf3# 0-1

[Event \"Club night\"]
[Site \"Town hall\"]
[White \"carol\"]
[Black \"dave\"]
[Result \"1/2-1/2\"]

1. d4 d5 2. c4 c6 1/2-1/2

[Event \"Rated Rapid game\"]
[Site \"https://lichess.org/Rk2pWm9a\"]
[White \"erin\"]
[Black \"frank\"]
[Result \"1-0\"]

1. e4 c5 2. Nf3 d6 3. d4 cxd4 4. Nxd4 Nf6 5. Nc3 a6 6. Bg5 e6 7. f4 Qb6 1-0
";

/// Review page move list for the first game.
pub const GAME_ONE_REVIEW: &str = "[Event \"Rated Blitz game\"]
[Site \"https://lichess.org/q7ZvsdUF\"]

1. e4 e5 2. Nf3 Nc6 3. Bc4 Nd4 4. Nxe5?! { (0.35 → -0.40) Inaccuracy. Nxd4 was best. } 4... Qg5 \
5. Nxf7?? { (-0.50 → -6.10) Blunder. O-O was best. } 5... Qxg2 6. Rf1 Qxe4+ 7. Be2?? { (-6.30 → #-1) Blunder. Qe2 was best. } 7... Nf3# 0-1";

/// Review page move list for the third game.
pub const GAME_THREE_REVIEW: &str = "1. e4 c5 2. Nf3 d6 3. d4 cxd4 4. Nxd4 Nf6 5. Nc3 a6 6. Bg5 e6 7. f4 \
7... Qb6?! { (0.30 → 0.95) Inaccuracy. Be7 was best. } 1-0";
