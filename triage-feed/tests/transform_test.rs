mod common;

use chrono::{TimeZone, Utc};
use common::init_tracing;
use triage_feed::transform::{impact_from_score, normalize_category, transform_articles_at, RawArticle};
use triage_feed::{Category, FeedController, FilterCriteria, Impact};

fn records() -> Vec<RawArticle> {
    let json = r#"[
        {
            "_id": "665f1c2e9b1d4a0012ab34cd",
            "title": "Orange drops 5G premium on new plans",
            "url": "https://www.telecompaper.com/news/orange-5g",
            "source": "Telecompaper",
            "category": "5G",
            "importance_score": 8.5,
            "text": "Orange removes the surcharge for 5G access.",
            "content": "Full article body.",
            "date_published": "2025-09-03T07:30:00Z",
            "keywords": ["5G", "Pricing"]
        },
        {
            "title": "UKE opens consultation on spectrum fees",
            "link": "not a url",
            "source": "uke.gov.pl",
            "category": "Regulation",
            "importance_score": 5,
            "summary": "Consultation summary.",
            "published": "2025-09-02 12:00:00",
            "tags": ["Regulation"]
        },
        {
            "category": "Sports"
        }
    ]"#;
    serde_json::from_str(json).unwrap()
}

#[test]
fn full_record_is_mapped_field_by_field() {
    init_tracing();
    let now = Utc.with_ymd_and_hms(2025, 9, 10, 0, 0, 0).unwrap();
    let articles = transform_articles_at(records(), now);
    let a = &articles[0];

    assert_eq!(a.id.as_str(), "665f1c2e9b1d4a0012ab34cd");
    assert_eq!(a.source, "telecompaper.com");
    assert_eq!(a.link, "https://www.telecompaper.com/news/orange-5g");
    assert_eq!(a.category, Category::Technology);
    assert_eq!(a.impact, Impact::High);
    assert_eq!(a.snippet, "Orange removes the surcharge for 5G access.");
    assert_eq!(a.summary, "Full article body.");
    assert_eq!(a.published_at, Utc.with_ymd_and_hms(2025, 9, 3, 7, 30, 0).unwrap());
    assert!(a.tags.contains("Pricing"));
}

#[test]
fn fallbacks_apply_for_sparse_records() {
    let now = Utc.with_ymd_and_hms(2025, 9, 10, 0, 0, 0).unwrap();
    let articles = transform_articles_at(records(), now);

    let b = &articles[1];
    assert_eq!(b.id.as_str(), "article-1");
    assert_eq!(b.source, "uke.gov.pl");
    assert_eq!(b.link, "not a url");
    assert_eq!(b.category, Category::Regulatory);
    assert_eq!(b.impact, Impact::Medium);
    assert_eq!(b.snippet, "Consultation summary.");
    assert_eq!(b.summary, "Consultation summary.");
    assert_eq!(b.published_at, Utc.with_ymd_and_hms(2025, 9, 2, 12, 0, 0).unwrap());

    let c = &articles[2];
    assert_eq!(c.id.as_str(), "article-2");
    assert_eq!(c.title, "Untitled");
    assert_eq!(c.source, "unknown");
    assert_eq!(c.link, "#");
    assert_eq!(c.category, Category::Market);
    assert_eq!(c.impact, Impact::Low);
    assert_eq!(c.snippet, "No description available.");
    assert_eq!(c.summary, "No description available.");
    assert_eq!(c.published_at, now);
    assert!(c.tags.is_empty());
}

#[test]
fn impact_thresholds() {
    assert_eq!(impact_from_score(Some(10.0)), Impact::High);
    assert_eq!(impact_from_score(Some(8.0)), Impact::High);
    assert_eq!(impact_from_score(Some(7.9)), Impact::Medium);
    assert_eq!(impact_from_score(Some(5.0)), Impact::Medium);
    assert_eq!(impact_from_score(Some(4.99)), Impact::Low);
    assert_eq!(impact_from_score(None), Impact::Low);
}

#[test]
fn category_mapping() {
    assert_eq!(normalize_category(Some("Regulation")), Category::Regulatory);
    assert_eq!(normalize_category(Some("Investment")), Category::Market);
    assert_eq!(normalize_category(Some("Competition")), Category::Competition);
    assert_eq!(normalize_category(Some("5G")), Category::Technology);
    assert_eq!(normalize_category(None), Category::Market);
}

#[test]
fn transformed_articles_feed_the_controller() {
    let now = Utc.with_ymd_and_hms(2025, 9, 10, 0, 0, 0).unwrap();
    let controller = FeedController::new(transform_articles_at(records(), now));

    let hits = controller.main_feed(&FilterCriteria::new().with_search("5g"));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Orange drops 5G premium on new plans");
}
