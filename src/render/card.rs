//! Structured view of a topic card, shared by the HTML and terminal renderers.

use chrono::{DateTime, Utc};

use crate::domain::{Article, Topic};
use crate::render::format::format_timestamp;

/// Articles shown before the "show more" control.
pub const VISIBLE_ARTICLES: usize = 5;
/// Entity tags considered per card.
pub const MAX_ENTITIES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge<'a> {
    Trending,
    New,
    Type(&'a str),
}

impl<'a> Badge<'a> {
    pub fn label(&self) -> &'a str {
        match self {
            Badge::Trending => "Trending",
            Badge::New => "New",
            Badge::Type(name) => *name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleView<'a> {
    pub url: &'a str,
    pub title: &'a str,
    pub source: &'a str,
    pub date: String,
    pub summary: Option<&'a str>,
    pub hidden: bool,
}

impl<'a> ArticleView<'a> {
    fn new(article: &'a Article, index: usize, now: DateTime<Utc>) -> Self {
        Self {
            url: &article.url,
            title: &article.title,
            source: &article.source,
            date: format_timestamp(Some(&article.date), now),
            summary: article.summary.as_deref().filter(|s| !s.is_empty()),
            hidden: index >= VISIBLE_ARTICLES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView<'a> {
    pub label: &'a str,
    pub policy_type: Option<&'a str>,
    pub is_new_policy: bool,
    pub badges: Vec<Badge<'a>>,
    /// Reported by the feed, shown verbatim.
    pub article_count: u64,
    pub latest: String,
    pub entities: Vec<&'a str>,
    pub articles: Vec<ArticleView<'a>>,
    /// Count behind the "show more" control; 0 means no control.
    pub hidden_articles: usize,
    pub expanded: bool,
}

impl<'a> CardView<'a> {
    pub fn from_topic(topic: &'a Topic, now: DateTime<Utc>) -> Self {
        let mut badges = Vec::with_capacity(3);
        if topic.is_trending {
            badges.push(Badge::Trending);
        }
        if topic.is_new_policy {
            badges.push(Badge::New);
        }
        if let Some(policy_type) = topic.policy_type.as_deref() {
            badges.push(Badge::Type(policy_type));
        }

        let entities = topic
            .key_entities
            .iter()
            .take(MAX_ENTITIES)
            .map(String::as_str)
            .filter(|e| e.chars().count() > 1)
            .collect();

        let articles = topic
            .articles
            .iter()
            .enumerate()
            .map(|(index, article)| ArticleView::new(article, index, now))
            .collect();

        Self {
            label: &topic.label,
            policy_type: topic.policy_type.as_deref(),
            is_new_policy: topic.is_new_policy,
            badges,
            article_count: topic.article_count,
            latest: format_timestamp(topic.latest_date.as_deref(), now),
            entities,
            articles,
            hidden_articles: topic.articles.len().saturating_sub(VISIBLE_ARTICLES),
            expanded: false,
        }
    }

    /// Reveal every hidden article and drop the "show more" control.
    pub fn reveal_all(&mut self) {
        for article in &mut self.articles {
            article.hidden = false;
        }
        self.hidden_articles = 0;
    }

    pub fn visible_articles(&self) -> impl Iterator<Item = &ArticleView<'a>> {
        self.articles.iter().filter(|a| !a.hidden)
    }

    pub fn show_more_label(&self) -> Option<String> {
        (self.hidden_articles > 0).then(|| format!("+ {} more articles", self.hidden_articles))
    }
}
