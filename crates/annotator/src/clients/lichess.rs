use std::sync::LazyLock;

use reqwest::Client;
use scraper::{Html, Selector};

use crate::config::Config;
use crate::error::{AnnotatorError, FetchFailure};
use crate::pipeline::ReviewSource;

static PGN_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.pgn").unwrap());

pub struct LichessClient {
    client: Client,
    fetch_delay: std::time::Duration,
}

impl LichessClient {
    pub fn new(config: &Config) -> Result<Self, AnnotatorError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AnnotatorError::Client(e.to_string()))?;
        Ok(Self {
            client,
            fetch_delay: config.fetch_delay(),
        })
    }

    /// Fetch a game page and return the text of its annotated move list.
    pub async fn fetch_annotated_text(&self, url: &str) -> Result<String, FetchFailure> {
        // Rate limit
        if !self.fetch_delay.is_zero() {
            tokio::time::sleep(self.fetch_delay).await;
        }

        tracing::info!("Making a HTTP call to {url}");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchFailure::Request(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FetchFailure::Status(resp.status().as_u16()));
        }

        let html = resp
            .text()
            .await
            .map_err(|e| FetchFailure::Request(format!("Body read error: {e}")))?;

        extract_move_list(&html).ok_or(FetchFailure::MissingMoveList)
    }
}

impl ReviewSource for LichessClient {
    async fn fetch_annotated_text(&self, url: &str) -> Result<String, FetchFailure> {
        LichessClient::fetch_annotated_text(self, url).await
    }
}

/// Text content of the page's `div.pgn` container.
pub fn extract_move_list(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let container = document.select(&PGN_SELECTOR).next()?;
    Some(container.text().collect())
}
