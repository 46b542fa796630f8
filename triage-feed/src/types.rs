use std::env;
use std::time::Duration;

// Use the interfaces crate for core types
pub use interfaces::defs::{Article, ArticleId, Category, Impact};
pub use interfaces::defs::{ArticleSource, SummaryRequest, SummarySender};

/// Tunables for the per-card swipe gesture.
#[derive(Debug, Clone)]
pub struct GestureConfig {
    /// Horizontal travel, in logical pixels, needed to commit a swipe.
    pub commit_threshold_px: f64,
    /// Delay between commit and the dismiss/save callback (exit animation).
    pub commit_delay: Duration,
    /// How long the "saved" flash stays visible after a save commit.
    pub saved_flash: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            commit_threshold_px: 80.0,
            commit_delay: Duration::from_millis(300),
            saved_flash: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub api_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            user_agent: "Triage-Feed/1.0".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            retry_delay_seconds: 1,
        }
    }
}

impl FetchConfig {
    /// Defaults overridden by `TRIAGE_API_URL`, `TRIAGE_TIMEOUT_SECONDS` and
    /// `TRIAGE_MAX_RETRIES`. Unparseable numbers keep their default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(api_url) = env::var("TRIAGE_API_URL") {
            config.api_url = api_url;
        }
        if let Some(timeout) = env::var("TRIAGE_TIMEOUT_SECONDS").ok().and_then(|v| v.parse().ok()) {
            config.timeout_seconds = timeout;
        }
        if let Some(retries) = env::var("TRIAGE_MAX_RETRIES").ok().and_then(|v| v.parse().ok()) {
            config.max_retries = retries;
        }

        config
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown sort key: {0}")]
    InvalidSortKey(String),

    #[error("Unknown category: {0}")]
    InvalidCategory(String),

    #[error("Unknown view mode: {0}")]
    InvalidViewMode(String),

    #[error("Fetch failed after {attempts} attempts: {reason}")]
    FetchFailed { attempts: u32, reason: String },

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, TriageError>;
