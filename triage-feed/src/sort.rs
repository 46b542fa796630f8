use crate::criteria::SortKey;
use crate::types::Article;
use std::cmp::Ordering;

/// Comparator for a sort key. Equal elements compare `Equal`, so a stable
/// sort keeps them in input order.
pub fn comparator(key: SortKey) -> fn(&Article, &Article) -> Ordering {
    match key {
        SortKey::DateAsc => |a: &Article, b: &Article| a.published_at.cmp(&b.published_at),
        SortKey::DateDesc => |a: &Article, b: &Article| b.published_at.cmp(&a.published_at),
        SortKey::ImpactAsc => |a: &Article, b: &Article| a.impact.cmp(&b.impact),
        SortKey::ImpactDesc => |a: &Article, b: &Article| b.impact.cmp(&a.impact),
    }
}

/// Stable sort of borrowed articles.
pub fn sort_articles(articles: &mut [&Article], key: SortKey) {
    let cmp = comparator(key);
    articles.sort_by(|a, b| cmp(a, b));
}
