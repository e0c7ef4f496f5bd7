//! HTML markup for cards, pills and whole pages.
//!
//! Every value taken from the feed goes through [`escape`] or
//! [`escape_attr`] before it reaches markup.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use url::Url;

use crate::app::Result;
use crate::controller::{FrameBody, RenderFrame, RenderSink};
use crate::domain::{FilterCategory, SortMode, Theme, Topic};
use crate::engine::FilterPill;
use crate::render::card::{Badge, CardView};

const TRENDING_ICON: &str = r#"<svg class="sf-icon" viewBox="0 0 24 24"><path d="M8.5 14.5A2.5 2.5 0 0 0 11 12c0-1.38-.5-2-1-3-1.072-2.143-.224-4.054 2-6 .5 2.5 2 4.9 4 6.5 2 1.6 3 3.5 3 5.5a7 7 0 1 1-14 0c0-1.1.2-2.2.5-3.3.3.9.7 1.8 1.5 2.8z"/></svg>"#;
const NEW_ICON: &str = r#"<svg class="sf-icon" viewBox="0 0 24 24"><path d="M12 2l3.09 6.26L22 9.27l-5 4.87 1.18 6.88L12 17.77l-6.18 3.25L7 14.14 2 9.27l6.91-1.01L12 2z"/></svg>"#;
const CHEVRON_ICON: &str = r#"<svg class="sf-icon" viewBox="0 0 24 24" style="width:1em;height:1em"><path d="m6 9 6 6 6-6"/></svg>"#;

pub fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_safe(text)
}

pub fn escape_attr(text: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(text)
}

/// Link target for an article. Only http(s) URLs are emitted, in their
/// normalized (percent-encoded) form.
fn article_href(url: &str) -> Cow<'_, str> {
    match Url::parse(url) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {
            Cow::Owned(escape_attr(parsed.as_str()).into_owned())
        }
        _ => Cow::Borrowed("#"),
    }
}

fn render_badge(badge: &Badge<'_>) -> String {
    match badge {
        Badge::Trending => format!(r#"<span class="badge badge-trending">{} Trending</span>"#, TRENDING_ICON),
        Badge::New => format!(r#"<span class="badge badge-new">{} New</span>"#, NEW_ICON),
        Badge::Type(name) => format!(
            r#"<span class="badge badge-type" data-type="{}">{}</span>"#,
            escape_attr(name),
            escape(name)
        ),
    }
}

/// Markup for one card, including its current expanded/revealed state.
pub fn render_card(card: &CardView<'_>) -> String {
    let badges: String = card.badges.iter().map(render_badge).collect();

    let entities: String = card
        .entities
        .iter()
        .map(|e| format!(r#"<span class="entity-tag">{}</span>"#, escape(e)))
        .collect();

    let articles: String = card
        .articles
        .iter()
        .map(|a| {
            let summary = a
                .summary
                .map(|s| {
                    format!(
                        r#"<div class="article-summary"><strong>Why flagged:</strong> {}</div>"#,
                        escape(s)
                    )
                })
                .unwrap_or_default();
            format!(
                concat!(
                    r#"<div class="article-item{}">"#,
                    r#"<a href="{}" class="article-title" target="_blank" rel="noopener">{}</a>"#,
                    r#"<div class="article-meta">{} &bull; {}</div>"#,
                    "{}</div>"
                ),
                if a.hidden { " hidden" } else { "" },
                article_href(a.url),
                escape(a.title),
                escape(a.source),
                escape(&a.date),
                summary
            )
        })
        .collect();

    let show_more = card
        .show_more_label()
        .map(|label| {
            format!(
                r#"<div class="show-more-wrapper"><button class="show-more-btn">{}</button></div>"#,
                label
            )
        })
        .unwrap_or_default();

    let mut classes = String::from("topic-card");
    if card.is_new_policy {
        classes.push_str(" new-policy");
    }
    if card.expanded {
        classes.push_str(" expanded");
    }

    format!(
        concat!(
            r#"<div class="{}" data-type="{}">"#,
            r#"<div class="topic-header"><div class="topic-badges">{}</div>"#,
            r#"<div class="article-count"><strong>{}</strong> articles</div></div>"#,
            r#"<h3 class="topic-title">{}</h3>"#,
            r#"<div class="topic-meta">Latest: {}</div>"#,
            r#"<div class="topic-entities">{}</div>"#,
            r#"<button class="expand-toggle">{} View {} articles</button>"#,
            r#"<div class="topic-articles"><div class="topic-articles-inner">{}{}</div></div>"#,
            "</div>"
        ),
        classes,
        escape_attr(card.policy_type.unwrap_or("")),
        badges,
        card.article_count,
        escape(card.label),
        escape(&card.latest),
        entities,
        CHEVRON_ICON,
        card.article_count,
        articles,
        show_more
    )
}

/// Markup for a topic in its initial (collapsed, unrevealed) state.
pub fn render_topic_card(topic: &Topic, now: DateTime<Utc>) -> String {
    render_card(&CardView::from_topic(topic, now))
}

pub fn render_pills(pills: &[FilterPill], active: &FilterCategory) -> String {
    pills
        .iter()
        .map(|pill| {
            let class = if &pill.filter == active {
                "filter-pill active"
            } else {
                "filter-pill"
            };
            let count = pill
                .count
                .map(|c| format!(r#" <span class="pill-count">{}</span>"#, c))
                .unwrap_or_default();
            format!(
                r#"<button class="{}" data-filter="{}">{}{}</button>"#,
                class,
                escape_attr(pill.filter.key()),
                escape(&pill.label),
                count
            )
        })
        .collect()
}

fn render_sort(active: SortMode) -> String {
    [SortMode::Trending, SortMode::Recent]
        .iter()
        .map(|mode| {
            format!(
                r#"<button class="sort-btn{}" data-sort="{}">{}</button>"#,
                if *mode == active { " active" } else { "" },
                mode.as_str(),
                mode.label()
            )
        })
        .collect()
}

pub fn render_error(message: &str) -> String {
    format!(
        r#"<div class="empty-state"><span class="empty-icon">&#9888;&#65039;</span><p class="empty-text">{}</p></div>"#,
        escape(message)
    )
}

/// The list region: cards, error message, or nothing.
pub fn render_list(body: &FrameBody<'_>) -> String {
    match body {
        FrameBody::Error(message) => render_error(message),
        FrameBody::Cards { cards, .. } => cards.iter().map(render_card).collect(),
        FrameBody::Loading | FrameBody::Empty => String::new(),
    }
}

/// A standalone HTML document for `frame`, themed by the root marker.
pub fn render_page(frame: &RenderFrame<'_>, theme: Theme) -> String {
    let stat = |value: Option<&String>| {
        value
            .map(|v| escape(v).into_owned())
            .unwrap_or_else(|| "--".to_string())
    };
    let stats = frame.stats.as_ref();

    let empty_style = if frame.body.show_empty_state() {
        "block"
    } else {
        "none"
    };
    let (load_more_style, load_more_count) = match frame.body.load_more() {
        Some(remaining) => ("block", format!("({} more)", remaining)),
        None => ("none", String::new()),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en" data-theme="{theme}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Trend Alert</title>
</head>
<body>
<header class="header">
<h1>Trend Alert</h1>
<div class="stats">
<div class="stat"><span class="stat-value" id="statScanned">{scanned}</span> <span class="stat-label">Screened</span></div>
<div class="stat"><span class="stat-value" id="statTopics">{topics}</span> <span class="stat-label">Topics</span></div>
<div class="stat"><span class="stat-value" id="statTrending">{trending}</span> <span class="stat-label">Trending</span></div>
<div class="stat"><span class="stat-value" id="statNew">{new}</span> <span class="stat-label">New policies</span></div>
</div>
<p class="last-updated">Updated <span id="lastUpdated">{updated}</span></p>
</header>
<main>
<div class="controls">
<input type="search" id="searchInput" placeholder="Search topics or entities" value="{query}">
<div class="filter-pills" id="filterPills">{pills}</div>
<div class="sort-buttons">{sort}</div>
</div>
<div class="topics-list" id="topicsList">{list}</div>
<div class="empty-state" id="emptyState" style="display: {empty_style}"><p class="empty-text">No topics match your filters.</p></div>
<div class="load-more" id="loadMoreContainer" style="display: {load_more_style}"><button id="loadMoreBtn">Load more <span id="loadMoreCount">{load_more_count}</span></button></div>
</main>
</body>
</html>
"#,
        theme = theme.as_str(),
        scanned = stat(stats.map(|s| &s.screened)),
        topics = stat(stats.map(|s| &s.topics)),
        trending = stat(stats.map(|s| &s.trending)),
        new = stat(stats.map(|s| &s.new_policies)),
        updated = escape(frame.last_updated),
        query = escape_attr(frame.search_query),
        pills = render_pills(frame.pills, frame.active_filter),
        sort = render_sort(frame.sort),
        list = render_list(&frame.body),
        empty_style = empty_style,
        load_more_style = load_more_style,
        load_more_count = load_more_count,
    )
}

/// Collects the last presented frame as a complete HTML document.
#[derive(Debug)]
pub struct HtmlSink {
    theme: Theme,
    document: String,
}

impl HtmlSink {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            document: String::new(),
        }
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn into_document(self) -> String {
        self.document
    }
}

impl RenderSink for HtmlSink {
    fn present(&mut self, frame: &RenderFrame<'_>) -> Result<()> {
        self.document = render_page(frame, self.theme);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Article;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_label_script_is_escaped() {
        let topic = Topic::new("<script>alert(1)</script>");
        let html = render_topic_card(&topic, now());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)"));
    }

    #[test]
    fn test_feed_values_are_escaped_everywhere() {
        let mut topic = Topic::new("ok");
        topic.policy_type = Some(r#"x" onmouseover="evil"#.into());
        topic.key_entities = vec!["<b>Acme</b>".into()];
        topic.articles = vec![Article {
            url: r#"https://example.com/?a="><script>"#.into(),
            title: "<img src=x onerror=alert(1)>".into(),
            source: "<i>Wire</i>".into(),
            date: "2024-03-15".into(),
            summary: Some("<iframe>".into()),
        }];
        let html = render_topic_card(&topic, now());
        assert!(!html.contains("<b>"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("<i>"));
        assert!(!html.contains("<iframe>"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains(r#"" onmouseover"#));
    }

    #[test]
    fn test_non_http_link_is_neutralized() {
        let mut topic = Topic::new("t");
        topic.articles = vec![Article {
            url: "javascript:alert(1)".into(),
            title: "t".into(),
            source: "s".into(),
            date: "".into(),
            summary: None,
        }];
        let html = render_topic_card(&topic, now());
        assert!(html.contains(r##"href="#""##));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn test_hidden_articles_and_show_more() {
        let mut topic = Topic::new("t");
        topic.article_count = 8;
        topic.articles = (0..8)
            .map(|i| Article {
                url: format!("https://example.com/{}", i),
                title: format!("A{}", i),
                source: "Wire".into(),
                date: "2024-03-14".into(),
                summary: Some("flagged".into()),
            })
            .collect();
        let html = render_topic_card(&topic, now());
        assert_eq!(html.matches(r#"class="article-item""#).count(), 5);
        assert_eq!(html.matches(r#"class="article-item hidden""#).count(), 3);
        assert!(html.contains("+ 3 more articles"));
        assert!(html.contains("Why flagged:"));
        assert!(html.contains("Yesterday"));

        let mut card = CardView::from_topic(&topic, now());
        card.reveal_all();
        let html = render_card(&card);
        assert!(!html.contains("hidden"));
        assert!(!html.contains("show-more-btn"));
    }

    #[test]
    fn test_badge_markup() {
        let mut topic = Topic::new("t");
        topic.is_trending = true;
        topic.is_new_policy = true;
        topic.policy_type = Some("Privacy".into());
        let html = render_topic_card(&topic, now());
        let trending = html.find("badge-trending").unwrap();
        let new = html.find("badge-new").unwrap();
        let kind = html.find("badge-type").unwrap();
        assert!(trending < new && new < kind);
        assert!(html.contains("topic-card new-policy"));
    }

    #[test]
    fn test_pills_mark_active() {
        let pills = vec![
            FilterPill {
                label: "All".into(),
                count: None,
                filter: FilterCategory::All,
            },
            FilterPill {
                label: "Privacy".into(),
                count: Some(10),
                filter: FilterCategory::from_key("Privacy"),
            },
        ];
        let html = render_pills(&pills, &FilterCategory::from_key("Privacy"));
        assert_eq!(html.matches("filter-pill active").count(), 1);
        assert!(html.contains(r#"<button class="filter-pill active" data-filter="Privacy">Privacy"#));
    }

    #[test]
    fn test_error_markup() {
        let html = render_error(crate::app::LOAD_ERROR_MESSAGE);
        assert!(html.contains("Please run the backend pipeline first."));
    }
}
