use crate::types::{Category, Result, TriageError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .map(CategoryFilter::Only)
            .ok_or_else(|| TriageError::InvalidCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    DateAsc,
    #[default]
    DateDesc,
    ImpactAsc,
    ImpactDesc,
}

impl SortKey {
    /// Like `from_str`, but an unknown key falls back to `DateDesc`.
    /// Criteria are user-facing UI state, so a bad value must not break the feed.
    pub fn parse_lenient(s: &str) -> Self {
        match s.parse() {
            Ok(key) => key,
            Err(e) => {
                warn!("{}, falling back to {}", e, SortKey::default());
                SortKey::default()
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateAsc => "date-asc",
            SortKey::DateDesc => "date-desc",
            SortKey::ImpactAsc => "impact-asc",
            SortKey::ImpactDesc => "impact-desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "dateasc" => Ok(SortKey::DateAsc),
            "datedesc" => Ok(SortKey::DateDesc),
            "impactasc" => Ok(SortKey::ImpactAsc),
            "impactdesc" => Ok(SortKey::ImpactDesc),
            _ => Err(TriageError::InvalidSortKey(s.to_string())),
        }
    }
}

/// What the user currently wants to see. Replaced wholesale on every change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search_text: String,
    pub category: CategoryFilter,
    pub tags: BTreeSet<String>,
    pub sort_key: SortKey,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_sort(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    /// Lowercased, trimmed search needle, or `None` when search is inactive.
    pub fn search_needle(&self) -> Option<String> {
        let trimmed = self.search_text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_accepts_common_spellings() {
        assert_eq!("DateAsc".parse::<SortKey>().unwrap(), SortKey::DateAsc);
        assert_eq!("date-desc".parse::<SortKey>().unwrap(), SortKey::DateDesc);
        assert_eq!("impact_asc".parse::<SortKey>().unwrap(), SortKey::ImpactAsc);
        assert_eq!(" IMPACT DESC ".parse::<SortKey>().unwrap(), SortKey::ImpactDesc);
    }

    #[test]
    fn unknown_sort_key_fails_closed() {
        assert!("relevance".parse::<SortKey>().is_err());
        assert_eq!(SortKey::parse_lenient("relevance"), SortKey::DateDesc);
    }

    #[test]
    fn category_filter_parses_all_and_members() {
        assert_eq!("All".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "technology".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Technology)
        );
        assert!("Pricing".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn blank_search_is_inactive() {
        assert_eq!(FilterCriteria::new().with_search("   ").search_needle(), None);
        assert_eq!(
            FilterCriteria::new().with_search("  5G ").search_needle(),
            Some("5g".to_string())
        );
    }
}
