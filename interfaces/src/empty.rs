use anyhow::Result;
use async_trait::async_trait;

use crate::defs::Article;
use crate::defs::ArticleSource;
use crate::defs::SummaryRequest;
use crate::defs::SummarySender;

pub struct EmptySummarySender;

#[async_trait]
impl SummarySender for EmptySummarySender {
    async fn send_summary(&self, _request: &SummaryRequest) -> Result<()> {
        // Nobody is listening, the ideal delivery is no delivery.
        Ok(())
    }
}

pub struct EmptyArticleSource;

#[async_trait]
impl ArticleSource for EmptyArticleSource {
    fn source_name(&self) -> String {
        "empty".to_owned()
    }

    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        Ok(vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn empty_collaborators_succeed_without_content() {
        let articles = EmptyArticleSource.fetch_articles().await.unwrap();
        assert!(articles.is_empty());

        let request = SummaryRequest {
            generated_at: Utc::now(),
            saved: vec![],
            dismissed_count: 0,
            text: String::new(),
        };
        EmptySummarySender.send_summary(&request).await.unwrap();
    }
}
