use crate::types::{Article, ArticleId, Category, Impact};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;
use url::Url;

const SNIPPET_MAX_CHARS: usize = 150;
const SNIPPET_CUT_CHARS: usize = 147;

/// Article record as served by the backend `/all` endpoint. Every field is
/// optional; `transform_articles` supplies the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawArticle {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub link: Option<String>,
    pub source: Option<String>,
    pub category: Option<String>,
    pub importance_score: Option<f64>,
    pub text: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub date_published: Option<String>,
    pub published: Option<String>,
    pub tags: Option<Vec<String>>,
    pub keywords: Option<Vec<String>>,
}

pub fn transform_articles(raw: Vec<RawArticle>) -> Vec<Article> {
    transform_articles_at(raw, Utc::now())
}

/// Same as [`transform_articles`], with `now` used for undated records.
pub fn transform_articles_at(raw: Vec<RawArticle>, now: DateTime<Utc>) -> Vec<Article> {
    raw.into_iter()
        .enumerate()
        .map(|(index, record)| transform_article(index, record, now))
        .collect()
}

fn transform_article(index: usize, raw: RawArticle, now: DateTime<Utc>) -> Article {
    let id = present(&raw.id)
        .map(ArticleId::new)
        .unwrap_or_else(|| ArticleId::new(format!("article-{}", index)));

    let published_at = present(&raw.date_published)
        .or_else(|| present(&raw.published))
        .and_then(parse_timestamp)
        .unwrap_or(now);

    let link_source = present(&raw.url).or_else(|| present(&raw.link));
    let source = link_source
        .and_then(source_domain)
        .or_else(|| present(&raw.source).map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string());

    let full_snippet = present(&raw.text)
        .or_else(|| present(&raw.summary))
        .unwrap_or("No description available.");
    let summary = present(&raw.content)
        .or_else(|| present(&raw.summary))
        .or_else(|| present(&raw.text))
        .unwrap_or(full_snippet)
        .to_string();

    let tags: BTreeSet<String> = raw
        .tags
        .or(raw.keywords)
        .unwrap_or_default()
        .into_iter()
        .collect();

    Article {
        id,
        source,
        link: link_source.unwrap_or("#").to_string(),
        category: normalize_category(raw.category.as_deref()),
        title: present(&raw.title).unwrap_or("Untitled").to_string(),
        snippet: truncate_snippet(full_snippet),
        summary,
        published_at,
        impact: impact_from_score(raw.importance_score),
        tags,
    }
}

/// Map backend categories onto the four feed categories. Unknown or missing
/// categories land in `Market`.
pub fn normalize_category(category: Option<&str>) -> Category {
    match category.map(str::trim) {
        Some("Regulation") | Some("Regulatory") => Category::Regulatory,
        Some("5G") | Some("Technology") => Category::Technology,
        Some("Investment") | Some("Market") => Category::Market,
        Some("Competition") => Category::Competition,
        other => {
            debug!("Unmapped category {:?}, using Market", other);
            Category::Market
        }
    }
}

/// `>= 8` is High, `>= 5` is Medium, anything else (including missing) Low.
pub fn impact_from_score(score: Option<f64>) -> Impact {
    match score {
        Some(s) if s >= 8.0 => Impact::High,
        Some(s) if s >= 5.0 => Impact::Medium,
        _ => Impact::Low,
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn source_domain(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    let host = url.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn truncate_snippet(snippet: &str) -> String {
    if snippet.chars().count() > SNIPPET_MAX_CHARS {
        let cut: String = snippet.chars().take(SNIPPET_CUT_CHARS).collect();
        format!("{}...", cut)
    } else {
        snippet.to_string()
    }
}
