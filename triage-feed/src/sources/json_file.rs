use crate::transform::{transform_articles, RawArticle};
use crate::types::{Article, ArticleSource, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// Reads a dump of the `/all` endpoint from disk.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn load(&self) -> Result<Vec<Article>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let records: Vec<RawArticle> = serde_json::from_str(&content)?;
        info!("Loaded {} article records from {}", records.len(), self.path.display());
        Ok(transform_articles(records))
    }
}

#[async_trait]
impl ArticleSource for JsonFileSource {
    fn source_name(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_articles(&self) -> anyhow::Result<Vec<Article>> {
        Ok(self.load().await?)
    }
}
