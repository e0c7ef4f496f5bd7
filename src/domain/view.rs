use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Topic;

/// Category filter. `All` keeps every topic; `Category` keeps topics whose
/// `policy_type` equals the name exactly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterCategory {
    #[default]
    All,
    Category(String),
}

impl FilterCategory {
    /// Build a filter from the key a pill carries; `"all"` selects every topic.
    pub fn from_key(key: &str) -> Self {
        if key == "all" {
            FilterCategory::All
        } else {
            FilterCategory::Category(key.to_string())
        }
    }

    pub fn key(&self) -> &str {
        match self {
            FilterCategory::All => "all",
            FilterCategory::Category(name) => name,
        }
    }

    pub fn matches(&self, topic: &Topic) -> bool {
        match self {
            FilterCategory::All => true,
            FilterCategory::Category(name) => topic.policy_type.as_deref() == Some(name.as_str()),
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Trending,
    Recent,
}

impl SortMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Trending => "trending",
            SortMode::Recent => "recent",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Trending => "Trending",
            SortMode::Recent => "Recent",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trending" => Ok(SortMode::Trending),
            "recent" => Ok(SortMode::Recent),
            _ => Err(format!("Unknown sort mode: {} (expected trending or recent)", s)),
        }
    }
}

/// The mutable view over the feed: filter, sort, search and page depth.
///
/// Every change to filter, sort or search resets the page depth to 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub filter: FilterCategory,
    pub sort: SortMode,
    pub search_query: String,
    pub page_depth: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            filter: FilterCategory::All,
            sort: SortMode::Trending,
            search_query: String::new(),
            page_depth: 1,
        }
    }
}

impl ViewState {
    pub fn set_filter(&mut self, filter: FilterCategory) {
        self.filter = filter;
        self.page_depth = 1;
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
        self.page_depth = 1;
    }

    pub fn set_search(&mut self, query: &str) {
        self.search_query = query.trim().to_string();
        self.page_depth = 1;
    }

    pub fn advance_page(&mut self) {
        self.page_depth = self.page_depth.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_state() {
        let view = ViewState::default();
        assert_eq!(view.filter, FilterCategory::All);
        assert_eq!(view.sort, SortMode::Trending);
        assert_eq!(view.search_query, "");
        assert_eq!(view.page_depth, 1);
    }

    #[test]
    fn test_changes_reset_page_depth() {
        let mut view = ViewState::default();
        view.advance_page();
        view.advance_page();
        assert_eq!(view.page_depth, 3);

        view.set_filter(FilterCategory::from_key("Privacy"));
        assert_eq!(view.page_depth, 1);

        view.advance_page();
        view.set_sort(SortMode::Recent);
        assert_eq!(view.page_depth, 1);

        view.advance_page();
        view.set_search("  acme  ");
        assert_eq!(view.page_depth, 1);
        assert_eq!(view.search_query, "acme");
    }

    #[test]
    fn test_filter_matches_exact_case() {
        let mut topic = Topic::new("t");
        topic.policy_type = Some("Privacy".into());

        assert!(FilterCategory::All.matches(&topic));
        assert!(FilterCategory::from_key("Privacy").matches(&topic));
        assert!(!FilterCategory::from_key("privacy").matches(&topic));

        topic.policy_type = None;
        assert!(!FilterCategory::from_key("Privacy").matches(&topic));
    }

    #[test]
    fn test_sort_mode_parse() {
        assert_eq!("trending".parse::<SortMode>().unwrap(), SortMode::Trending);
        assert_eq!("Recent".parse::<SortMode>().unwrap(), SortMode::Recent);
        assert!("oldest".parse::<SortMode>().is_err());
    }
}
