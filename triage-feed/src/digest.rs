use crate::types::{Article, SummaryRequest, SummarySender};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

/// Render the end-of-session digest.
pub fn compose_summary(saved: &[Article], dismissed_count: usize, generated_at: DateTime<Utc>) -> String {
    let mut digest = String::new();
    digest.push_str(&format!(
        "News Triage Summary ({})\n\n",
        generated_at.format("%d.%m.%y %H:%M")
    ));
    digest.push_str(&format!(
        "Dismissed: {}, saved for later: {}\n\n",
        dismissed_count,
        saved.len()
    ));

    if saved.is_empty() {
        digest.push_str("No saved articles.\n");
        return digest;
    }

    for (i, article) in saved.iter().enumerate() {
        digest.push_str(&format!("{}. {}\n", i + 1, article.title));
        digest.push_str(&format!("   Source: {} ({})\n", article.source, article.link));
        digest.push_str(&format!(
            "   Category: {}, Impact: {}\n",
            article.category, article.impact
        ));
        if !article.snippet.is_empty() {
            digest.push_str(&format!("   {}\n", article.snippet));
        }
        digest.push('\n');
    }

    digest
}

/// Summary collaborator that only writes the digest to the log.
pub struct LogSummarySender;

#[async_trait]
impl SummarySender for LogSummarySender {
    async fn send_summary(&self, request: &SummaryRequest) -> anyhow::Result<()> {
        info!(
            "Summary requested: {} saved, {} dismissed",
            request.saved.len(),
            request.dismissed_count
        );
        info!("{}", request.text);
        Ok(())
    }
}
