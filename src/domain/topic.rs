use serde::{Deserialize, Serialize};

/// An aggregated trending topic. Its identity is its position in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub label: String,
    #[serde(default)]
    pub policy_type: Option<String>,
    #[serde(default, deserialize_with = "crate::domain::feed::count_or_zero")]
    pub article_count: u64,
    #[serde(default)]
    pub latest_date: Option<String>,
    #[serde(default)]
    pub is_trending: bool,
    #[serde(default)]
    pub is_new_policy: bool,
    #[serde(default)]
    pub key_entities: Vec<String>,
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl Topic {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            policy_type: None,
            article_count: 0,
            latest_date: None,
            is_trending: false,
            is_new_policy: false,
            key_entities: Vec::new(),
            articles: Vec::new(),
        }
    }

    /// Case-insensitive substring match against the label or any key entity.
    /// `needle` must already be lowercased.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.label.to_lowercase().contains(needle)
            || self
                .key_entities
                .iter()
                .any(|e| e.to_lowercase().contains(needle))
    }

    /// Sort key for the `recent` mode; absent dates compare lowest.
    pub fn latest_date_key(&self) -> &str {
        self.latest_date.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub summary: Option<String>,
}
