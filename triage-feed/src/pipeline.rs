use crate::criteria::FilterCriteria;
use crate::sort::sort_articles;
use crate::types::{Article, ArticleId, Result, TriageError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Which derived list is being computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    MainView,
    SavedView,
}

impl FromStr for ViewMode {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "main" | "mainview" | "feed" => Ok(ViewMode::MainView),
            "saved" | "savedview" => Ok(ViewMode::SavedView),
            _ => Err(TriageError::InvalidViewMode(s.to_string())),
        }
    }
}

/// Dismissed/saved membership for the session. The two sets may overlap;
/// dismissal always wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    pub dismissed: HashSet<ArticleId>,
    pub saved: HashSet<ArticleId>,
}

impl Visibility {
    pub fn is_dismissed(&self, id: &ArticleId) -> bool {
        self.dismissed.contains(id)
    }

    pub fn is_saved(&self, id: &ArticleId) -> bool {
        self.saved.contains(id)
    }

    pub fn is_visible(&self, id: &ArticleId, mode: ViewMode) -> bool {
        match mode {
            ViewMode::MainView => !self.is_dismissed(id) && !self.is_saved(id),
            ViewMode::SavedView => self.is_saved(id) && !self.is_dismissed(id),
        }
    }

    pub fn clear(&mut self) {
        self.dismissed.clear();
        self.saved.clear();
    }
}

/// Derive the displayed list for `mode`.
///
/// Predicates run in order (visibility, title search, category, tags), then a
/// stable sort by `criteria.sort_key`. The source slice is never reordered.
pub fn apply<'a>(
    articles: &'a [Article],
    criteria: &FilterCriteria,
    visibility: &Visibility,
    mode: ViewMode,
) -> Vec<&'a Article> {
    let needle = criteria.search_needle();

    let mut selected: Vec<&Article> = articles
        .iter()
        .filter(|article| visibility.is_visible(&article.id, mode))
        .filter(|article| match &needle {
            Some(needle) => article.title.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .filter(|article| criteria.category.matches(article.category))
        .filter(|article| criteria.tags.is_empty() || article.has_any_tag(&criteria.tags))
        .collect();

    sort_articles(&mut selected, criteria.sort_key);
    selected
}
