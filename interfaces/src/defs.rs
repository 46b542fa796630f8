use std::collections::BTreeSet;
use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque article identifier, unique and stable for one session.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub String);

impl ArticleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArticleId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Regulatory,
    Competition,
    Technology,
    Market,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Regulatory,
        Category::Competition,
        Category::Technology,
        Category::Market,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Regulatory => "Regulatory",
            Category::Competition => "Competition",
            Category::Technology => "Technology",
            Category::Market => "Market",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editorial impact. Ordered so that `High > Medium > Low`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn rank(&self) -> u8 {
        match self {
            Impact::High => 3,
            Impact::Medium => 2,
            Impact::Low => 1,
        }
    }
}

impl PartialOrd for Impact {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Impact {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Impact::High => "High",
            Impact::Medium => "Medium",
            Impact::Low => "Low",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub source: String,
    pub link: String,
    pub category: Category,
    pub title: String,
    pub snippet: String,
    pub summary: String,
    pub published_at: DateTime<Utc>,
    pub impact: Impact,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Article {
    pub fn has_any_tag(&self, tags: &BTreeSet<String>) -> bool {
        tags.iter().any(|tag| self.tags.contains(tag))
    }
}

/// Payload handed to the summary collaborator once the feed is caught up.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub generated_at: DateTime<Utc>,
    pub saved: Vec<Article>,
    pub dismissed_count: usize,
    pub text: String,
}

// Object style note:
// Collaborators live outside the triage core. The core only ever sees a
// resolved `Vec<Article>` and emits fire-and-forget summary requests, so
// neither trait reports anything the core has to react to beyond logging.

/// Resolves once to the article collection for a session.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    fn source_name(&self) -> String;

    async fn fetch_articles(&self) -> Result<Vec<Article>>;
}

/// Receives "send me a summary" requests. No response contract.
#[async_trait]
pub trait SummarySender: Send + Sync {
    async fn send_summary(&self, request: &SummaryRequest) -> Result<()>;
}
