use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use trend_alert::app::{AppContext, Result, TrendAlertError, LOAD_ERROR_MESSAGE};
use trend_alert::config::Config;
use trend_alert::controller::{FrameBody, Interaction, InteractionController, Outcome, RenderSink};
use trend_alert::domain::{FilterCategory, SortMode, Theme, Topic, ViewState};
use trend_alert::engine::{compute_visible, paginate};
use trend_alert::fetcher::Fetcher;
use trend_alert::render::{render_topic_card, HtmlSink, TextSink};

enum Response {
    Body(String),
    Status(u16),
}

struct MockFetcher(Response);

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, source: &str) -> Result<Vec<u8>> {
        match &self.0 {
            Response::Body(body) => Ok(body.clone().into_bytes()),
            Response::Status(status) => Err(TrendAlertError::Status {
                url: source.to_string(),
                status: *status,
            }),
        }
    }
}

fn now_utc() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

fn context(response: Response) -> AppContext {
    AppContext::with_fetcher(
        Config::default(),
        Some("https://example.com/alerts.json".to_string()),
        Arc::new(MockFetcher(response)),
    )
}

fn load(feed: Value) -> InteractionController {
    let ctx = context(Response::Body(feed.to_string()));
    tokio_test::block_on(ctx.load_controller())
}

fn topic_json(label: &str, policy_type: &str, article_count: u64, latest_date: &str) -> Value {
    json!({
        "label": label,
        "policy_type": policy_type,
        "article_count": article_count,
        "latest_date": latest_date,
        "is_trending": false,
        "is_new_policy": false,
        "key_entities": [],
        "articles": []
    })
}

fn feed(topics: Vec<Value>) -> Value {
    json!({
        "generated_at": "2024-03-15T06:00:00Z",
        "stats": {
            "screened_items": 12034,
            "total_topics": topics.len(),
            "trending_topics": 3,
            "new_policies": 1,
            "by_type": {"Privacy": 10, "Other": 2, "Security": 7}
        },
        "topics": topics
    })
}

fn fixture_topics() -> Vec<Topic> {
    let mut acme = Topic::new("Acme Corp Policy Update");
    acme.policy_type = Some("Privacy".into());
    acme.article_count = 4;
    acme.latest_date = Some("2024-03-10".into());

    let mut entity = Topic::new("Cloud storage rules");
    entity.policy_type = Some("Security".into());
    entity.article_count = 9;
    entity.latest_date = Some("2024-03-12".into());
    entity.key_entities = vec!["ACME".into(), "EU".into()];

    let mut neither = Topic::new("Data broker registry");
    neither.policy_type = Some("Privacy".into());
    neither.article_count = 6;
    neither.key_entities = vec!["FTC".into()];

    let mut dated = Topic::new("Export controls");
    dated.policy_type = Some("Trade".into());
    dated.article_count = 6;
    dated.latest_date = Some("2024-03-14".into());

    vec![acme, entity, neither, dated]
}

#[test]
fn test_default_view_pages_25_topics() {
    let topics = (0..25)
        .map(|i| topic_json(&format!("Topic {i}"), "Privacy", 100 - i, "2024-03-01"))
        .collect();
    let mut controller = load(feed(topics));

    let frame = controller.frame(now_utc());
    assert_eq!(frame.body.cards().len(), 20);
    assert_eq!(frame.body.load_more(), Some(5));

    controller.handle(Interaction::LoadMore, Instant::now());
    let frame = controller.frame(now_utc());
    assert_eq!(frame.body.cards().len(), 25);
    assert_eq!(frame.body.load_more(), None);

    let mut sink = HtmlSink::new(Theme::Dark);
    controller.render(&mut sink, now_utc()).unwrap();
    assert!(sink
        .document()
        .contains(r#"id="loadMoreContainer" style="display: none""#));
}

#[test]
fn test_pill_order_puts_other_last() {
    let controller = load(feed(vec![]));
    let labels: Vec<&str> = controller.pills().iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["All", "Privacy", "Security", "Other"]);
}

#[test]
fn test_show_more_reveals_all_articles() {
    let mut topic = topic_json("Eight articles", "Privacy", 8, "2024-03-14");
    topic["articles"] = (0..8)
        .map(|i| {
            json!({
                "url": format!("https://news.example.com/{i}"),
                "title": format!("Story {i}"),
                "source": "Wire",
                "date": "2024-03-14"
            })
        })
        .collect();
    let mut controller = load(feed(vec![topic]));

    {
        let frame = controller.frame(now_utc());
        let card = &frame.body.cards()[0];
        assert_eq!(card.visible_articles().count(), 5);
        assert_eq!(card.show_more_label().as_deref(), Some("+ 3 more articles"));
    }

    controller.handle(Interaction::ShowMoreArticles(0), Instant::now());
    let frame = controller.frame(now_utc());
    let card = &frame.body.cards()[0];
    assert_eq!(card.visible_articles().count(), 8);
    assert_eq!(card.show_more_label(), None);
}

#[test]
fn test_failed_fetch_shows_fixed_error() {
    let ctx = context(Response::Status(500));
    let controller = tokio_test::block_on(ctx.load_controller());

    let frame = controller.frame(now_utc());
    assert_eq!(frame.body, FrameBody::Error(LOAD_ERROR_MESSAGE));
    assert!(frame.stats.is_none());
    assert!(frame.pills.is_empty());

    let mut sink = HtmlSink::new(Theme::Dark);
    controller.render(&mut sink, now_utc()).unwrap();
    assert!(sink.document().contains(LOAD_ERROR_MESSAGE));
}

#[test]
fn test_malformed_feed_shows_fixed_error() {
    let ctx = context(Response::Body("<html>not json</html>".into()));
    let controller = tokio_test::block_on(ctx.load_controller());
    assert_eq!(controller.load_error(), Some(LOAD_ERROR_MESSAGE));
}

#[test]
fn test_search_matches_label_and_entity() {
    let topics = fixture_topics()
        .into_iter()
        .map(|t| {
            json!({
                "label": t.label,
                "policy_type": t.policy_type,
                "article_count": t.article_count,
                "latest_date": t.latest_date,
                "key_entities": t.key_entities
            })
        })
        .collect();
    let mut controller = load(feed(topics));

    let start = Instant::now();
    controller.handle(Interaction::SearchInput("acme".into()), start);
    assert_eq!(
        controller.tick(start + Duration::from_millis(100)),
        Outcome::Unchanged
    );
    assert_eq!(
        controller.tick(start + Duration::from_millis(300)),
        Outcome::Rerender
    );

    let mut labels: Vec<&str> = controller
        .visible_topics()
        .iter()
        .map(|t| t.label.as_str())
        .collect();
    labels.sort();
    assert_eq!(labels, vec!["Acme Corp Policy Update", "Cloud storage rules"]);
}

#[test]
fn test_filter_only_returns_category() {
    let topics = fixture_topics();
    let mut view = ViewState::default();
    view.set_filter(FilterCategory::Category("Privacy".into()));

    let visible = compute_visible(&topics, &view);
    assert_eq!(visible.len(), 2);
    assert!(visible
        .iter()
        .all(|t| t.policy_type.as_deref() == Some("Privacy")));
}

#[test]
fn test_sorts_are_monotonic_and_leave_input_alone() {
    let topics = fixture_topics();
    let before = topics.clone();

    let mut view = ViewState::default();
    let trending = compute_visible(&topics, &view);
    assert!(trending
        .windows(2)
        .all(|w| w[0].article_count >= w[1].article_count));

    view.set_sort(SortMode::Recent);
    let recent = compute_visible(&topics, &view);
    assert!(recent
        .windows(2)
        .all(|w| w[0].latest_date_key() >= w[1].latest_date_key()));
    assert_eq!(recent.last().map(|t| t.label.as_str()), Some("Data broker registry"));

    assert_eq!(topics, before);
}

#[test]
fn test_paginator_grows_until_exhausted() {
    let items: Vec<u32> = (0..7).collect();

    assert_eq!(paginate(&items, 1, 3), paginate(&items, 1, 3));

    let mut last = 0;
    for depth in 1..=3 {
        let page = paginate(&items, depth, 3);
        assert!(page.visible().len() > last);
        last = page.visible().len();
    }
    assert_eq!(paginate(&items, 3, 3).remaining(), 0);
    assert_eq!(items, (0..7).collect::<Vec<u32>>());
}

#[test]
fn test_script_label_renders_as_text() {
    let topic = Topic::new("<script>alert('x')</script>");
    let html = render_topic_card(&topic, now_utc());
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn test_text_listing() {
    let controller = load(feed(vec![
        topic_json("Alpha", "Privacy", 12, "2024-03-15"),
        topic_json("Beta", "Security", 3, "2024-03-14"),
    ]));

    let mut sink = TextSink::new(Vec::new());
    sink.present(&controller.frame(now_utc())).unwrap();
    let output = String::from_utf8(sink.into_inner()).unwrap();

    let alpha = output.find("Alpha").unwrap();
    let beta = output.find("Beta").unwrap();
    assert!(alpha < beta);
    assert!(output.contains("Today"));
}
