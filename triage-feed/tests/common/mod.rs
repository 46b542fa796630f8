#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use triage_feed::{Article, ArticleId, Category, Impact};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, d, 9, 0, 0).unwrap()
}

pub fn article(id: &str, title: &str, category: Category, impact: Impact, published_at: DateTime<Utc>, tags: &[&str]) -> Article {
    Article {
        id: ArticleId::new(id),
        source: "telecompaper.com".to_string(),
        link: format!("https://telecompaper.com/{}", id),
        category,
        title: title.to_string(),
        snippet: format!("Snippet for {}", title),
        summary: format!("Summary for {}", title),
        published_at,
        impact,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// A small telecom-news fixture with mixed categories, impacts and tags.
pub fn sample_articles() -> Vec<Article> {
    vec![
        article("1", "EU Data Act: telco data-sharing rules finalized", Category::Regulatory, Impact::High, day(1), &["Regulation"]),
        article("2", "Orange drops 5G premium on new plans", Category::Technology, Impact::Medium, day(3), &["Pricing", "5G"]),
        article("3", "Play and UPC consolidation gathers pace", Category::Competition, Impact::High, day(2), &["M&A"]),
        article("4", "Tower operator signs network sharing deal", Category::Market, Impact::Low, day(4), &["Partnership"]),
        article("5", "Spectrum auction timetable slips", Category::Regulatory, Impact::Medium, day(2), &[]),
    ]
}

pub fn ids(articles: &[&Article]) -> Vec<String> {
    articles.iter().map(|a| a.id.to_string()).collect()
}

pub fn owned_ids(articles: &[Article]) -> Vec<String> {
    articles.iter().map(|a| a.id.to_string()).collect()
}
