use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Pause before each review page request. 0 disables it.
    pub fetch_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: "PgnAnnotator/1.0".to_string(),
            request_timeout_secs: 30,
            fetch_delay_ms: 1000,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            user_agent: env::var("ANNOTATOR_USER_AGENT").unwrap_or(defaults.user_agent),
            request_timeout_secs: env::var("ANNOTATOR_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            fetch_delay_ms: env::var("ANNOTATOR_FETCH_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.fetch_delay_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }
}
