use crate::criteria::FilterCriteria;
use crate::digest::compose_summary;
use crate::pipeline::{self, ViewMode, Visibility};
use crate::types::{Article, ArticleId, SummaryRequest};
use chrono::Utc;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Session state for one user's feed: the current article collection plus
/// which ids have been dismissed or saved.
///
/// Every operation is infallible. Ids that are not part of the current
/// collection are ignored, and repeating a dismiss or save is a no-op.
#[derive(Debug, Default)]
pub struct FeedController {
    articles: Vec<Article>,
    known: HashSet<ArticleId>,
    visibility: Visibility,
}

impl FeedController {
    pub fn new(articles: Vec<Article>) -> Self {
        let mut controller = Self::default();
        controller.set_articles(articles);
        controller
    }

    /// Replace the collection after a successful fetch. Visibility survives;
    /// later duplicates of an id are dropped.
    pub fn set_articles(&mut self, articles: Vec<Article>) {
        let mut known = HashSet::with_capacity(articles.len());
        let mut unique = Vec::with_capacity(articles.len());

        for article in articles {
            if known.insert(article.id.clone()) {
                unique.push(article);
            } else {
                warn!("Dropping duplicate article id {}", article.id);
            }
        }

        info!("Loaded {} articles into the feed", unique.len());
        self.articles = unique;
        self.known = known;
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn contains(&self, id: &ArticleId) -> bool {
        self.known.contains(id)
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn is_dismissed(&self, id: &ArticleId) -> bool {
        self.visibility.is_dismissed(id)
    }

    pub fn is_saved(&self, id: &ArticleId) -> bool {
        self.visibility.is_saved(id)
    }

    /// Returns true when the id was newly dismissed.
    pub fn dismiss(&mut self, id: &ArticleId) -> bool {
        if !self.contains(id) {
            debug!("Ignoring dismiss for unknown article {}", id);
            return false;
        }
        let changed = self.visibility.dismissed.insert(id.clone());
        if changed {
            debug!("Dismissed article {}", id);
        }
        changed
    }

    /// Returns true when the id was newly saved.
    pub fn save(&mut self, id: &ArticleId) -> bool {
        if !self.contains(id) {
            debug!("Ignoring save for unknown article {}", id);
            return false;
        }
        let changed = self.visibility.saved.insert(id.clone());
        if changed {
            debug!("Saved article {}", id);
        }
        changed
    }

    pub fn main_feed(&self, criteria: &FilterCriteria) -> Vec<&Article> {
        pipeline::apply(&self.articles, criteria, &self.visibility, ViewMode::MainView)
    }

    pub fn saved_feed(&self, criteria: &FilterCriteria) -> Vec<&Article> {
        pipeline::apply(&self.articles, criteria, &self.visibility, ViewMode::SavedView)
    }

    pub fn feed(&self, criteria: &FilterCriteria, mode: ViewMode) -> Vec<&Article> {
        pipeline::apply(&self.articles, criteria, &self.visibility, mode)
    }

    /// "All caught up": nothing left in the filtered main feed.
    pub fn is_empty(&self, criteria: &FilterCriteria) -> bool {
        self.main_feed(criteria).is_empty()
    }

    /// Articles not yet dismissed, ignoring every filter.
    pub fn global_remaining(&self) -> usize {
        self.articles
            .iter()
            .filter(|article| !self.visibility.is_dismissed(&article.id))
            .count()
    }

    pub fn dismissed_count(&self) -> usize {
        self.articles
            .iter()
            .filter(|article| self.visibility.is_dismissed(&article.id))
            .count()
    }

    /// Build the digest sent to the summary collaborator. Saved articles are
    /// listed newest first regardless of the active criteria.
    pub fn summary_request(&self) -> SummaryRequest {
        let saved: Vec<Article> = self
            .saved_feed(&FilterCriteria::default())
            .into_iter()
            .cloned()
            .collect();
        let dismissed_count = self.dismissed_count();
        let generated_at = Utc::now();
        let text = compose_summary(&saved, dismissed_count, generated_at);

        SummaryRequest {
            generated_at,
            saved,
            dismissed_count,
            text,
        }
    }

    /// Forget every dismiss and save. The article collection is kept.
    pub fn reset(&mut self) {
        info!("Resetting feed session state");
        self.visibility.clear();
    }
}
