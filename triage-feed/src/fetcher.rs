use crate::transform::{transform_articles, RawArticle};
use crate::types::{Article, ArticleSource, FetchConfig, Result, TriageError};
use async_trait::async_trait;
use backoff::{backoff::Backoff, exponential::ExponentialBackoff, SystemClock};
use reqwest::{Client, Response};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// Pulls the article collection from the backend API.
pub struct ArticleFetcher {
    client: Client,
    config: FetchConfig,
    endpoint: Url,
}

impl ArticleFetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        let endpoint = Url::parse(&config.api_url)?.join("all")?;

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch and decode the raw records, retrying with exponential backoff on
    /// transport errors and non-success statuses.
    pub async fn fetch_raw(&self) -> Result<Vec<RawArticle>> {
        let start_time = Instant::now();
        let mut backoff = retry_backoff(&self.config);
        let mut attempts = 0;

        let response = loop {
            attempts += 1;
            debug!("Fetching articles from {} (attempt {})", self.endpoint, attempts);

            let reason = match self.get_once().await {
                Ok(response) => break response,
                Err(reason) => reason,
            };

            let delay = if attempts <= self.config.max_retries {
                backoff.next_backoff()
            } else {
                None
            };
            let Some(delay) = delay else {
                return Err(TriageError::FetchFailed { attempts, reason });
            };
            warn!(
                "Attempt {} failed for {}: {}, retrying in {:?}",
                attempts, self.endpoint, reason, delay
            );
            tokio::time::sleep(delay).await;
        };

        let records: Vec<RawArticle> = response.json().await?;
        info!(
            "Fetched {} article records in {}ms",
            records.len(),
            start_time.elapsed().as_millis()
        );
        Ok(records)
    }

    /// One GET against the endpoint; a failure comes back as the reason to log.
    async fn get_once(&self) -> std::result::Result<Response, String> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ))
        }
    }

    pub async fn fetch(&self) -> Result<Vec<Article>> {
        let records = self.fetch_raw().await?;
        Ok(transform_articles(records))
    }
}

/// Delays between attempts start at `retry_delay_seconds` and double up to
/// 32 times that, giving up once a minute per second of base delay has passed.
fn retry_backoff(config: &FetchConfig) -> ExponentialBackoff<SystemClock> {
    let base = Duration::from_secs(config.retry_delay_seconds);
    ExponentialBackoff {
        current_interval: base,
        initial_interval: base,
        max_interval: base * 32,
        multiplier: 2.0,
        max_elapsed_time: Some(base * 60),
        ..Default::default()
    }
}

#[async_trait]
impl ArticleSource for ArticleFetcher {
    fn source_name(&self) -> String {
        self.endpoint.to_string()
    }

    async fn fetch_articles(&self) -> anyhow::Result<Vec<Article>> {
        Ok(self.fetch().await?)
    }
}
