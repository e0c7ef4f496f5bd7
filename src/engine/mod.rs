//! Pure derivations over the feed: which topics are visible, in what order,
//! which filter pills exist, and how the ordered list is paged.

pub mod paginator;
pub mod pills;

pub use paginator::{paginate, Page, DEFAULT_PAGE_SIZE};
pub use pills::{derive_pills, FilterPill};

use crate::domain::{SortMode, Topic, ViewState};

/// Positions (into `topics`) of the topics visible under `view`, in display order.
///
/// Pipeline: category filter, then search filter, then a stable sort.
/// The input slice is never reordered; the sort works on the index list.
pub fn visible_indices(topics: &[Topic], view: &ViewState) -> Vec<usize> {
    let needle = view.search_query.trim().to_lowercase();

    let mut indices: Vec<usize> = topics
        .iter()
        .enumerate()
        .filter(|(_, topic)| view.filter.matches(topic))
        .filter(|(_, topic)| needle.is_empty() || topic.matches_query(&needle))
        .map(|(index, _)| index)
        .collect();

    match view.sort {
        SortMode::Trending => {
            indices.sort_by(|&a, &b| topics[b].article_count.cmp(&topics[a].article_count))
        }
        SortMode::Recent => indices.sort_by(|&a, &b| {
            topics[b]
                .latest_date_key()
                .cmp(topics[a].latest_date_key())
        }),
    }

    indices
}

/// Topics visible under `view`, in display order.
pub fn compute_visible<'a>(topics: &'a [Topic], view: &ViewState) -> Vec<&'a Topic> {
    visible_indices(topics, view)
        .into_iter()
        .map(|index| &topics[index])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FilterCategory;

    fn topic(label: &str, policy_type: Option<&str>, count: u64, date: Option<&str>) -> Topic {
        let mut t = Topic::new(label);
        t.policy_type = policy_type.map(String::from);
        t.article_count = count;
        t.latest_date = date.map(String::from);
        t
    }

    fn fixture() -> Vec<Topic> {
        let mut acme_entity = topic("Data retention rules", Some("Privacy"), 4, Some("2024-02-01"));
        acme_entity.key_entities = vec!["EU".into(), "ACME".into()];
        vec![
            topic("Acme Corp Policy Update", Some("Privacy"), 2, Some("2024-03-01")),
            acme_entity,
            topic("Zero trust mandate", Some("Security"), 9, None),
            topic("Broadband subsidies", None, 4, Some("2024-01-15")),
            topic("Chip export controls", Some("Security"), 1, Some("2024-03-02")),
        ]
    }

    #[test]
    fn test_default_view_sorts_by_article_count() {
        let topics = fixture();
        let visible = compute_visible(&topics, &ViewState::default());
        let counts: Vec<u64> = visible.iter().map(|t| t.article_count).collect();
        assert_eq!(counts, vec![9, 4, 4, 2, 1]);
    }

    #[test]
    fn test_trending_ties_keep_source_order() {
        let topics = fixture();
        let visible = compute_visible(&topics, &ViewState::default());
        assert_eq!(visible[1].label, "Data retention rules");
        assert_eq!(visible[2].label, "Broadband subsidies");
    }

    #[test]
    fn test_category_filter_is_exact() {
        let topics = fixture();
        let mut view = ViewState::default();
        view.set_filter(FilterCategory::from_key("Security"));

        let visible = compute_visible(&topics, &view);
        assert_eq!(visible.len(), 2);
        assert!(visible
            .iter()
            .all(|t| t.policy_type.as_deref() == Some("Security")));

        view.set_filter(FilterCategory::from_key("security"));
        assert!(compute_visible(&topics, &view).is_empty());
    }

    #[test]
    fn test_search_matches_label_or_entity() {
        let topics = fixture();
        let mut view = ViewState::default();
        view.set_search("acme");

        let labels: Vec<&str> = compute_visible(&topics, &view)
            .iter()
            .map(|t| t.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Data retention rules", "Acme Corp Policy Update"]);
    }

    #[test]
    fn test_whitespace_query_matches_everything() {
        let topics = fixture();
        let view = ViewState {
            search_query: "   ".into(),
            ..ViewState::default()
        };
        assert_eq!(compute_visible(&topics, &view).len(), topics.len());
    }

    #[test]
    fn test_filter_then_search() {
        let topics = fixture();
        let mut view = ViewState::default();
        view.set_filter(FilterCategory::from_key("Security"));
        view.set_search("acme");
        assert!(compute_visible(&topics, &view).is_empty());
    }

    #[test]
    fn test_recent_sorts_absent_dates_last() {
        let topics = fixture();
        let mut view = ViewState::default();
        view.set_sort(SortMode::Recent);

        let dates: Vec<&str> = compute_visible(&topics, &view)
            .iter()
            .map(|t| t.latest_date_key())
            .collect();
        assert_eq!(
            dates,
            vec!["2024-03-02", "2024-03-01", "2024-02-01", "2024-01-15", ""]
        );
    }

    #[test]
    fn test_source_is_not_reordered() {
        let topics = fixture();
        let before = topics.clone();

        let mut view = ViewState::default();
        compute_visible(&topics, &view);
        view.set_sort(SortMode::Recent);
        compute_visible(&topics, &view);

        assert_eq!(topics, before);
        view.set_filter(FilterCategory::All);
        view.set_sort(SortMode::Trending);
        assert_eq!(visible_indices(&topics, &view), vec![2, 1, 3, 0, 4]);
    }

    #[test]
    fn test_deterministic() {
        let topics = fixture();
        let mut view = ViewState::default();
        view.set_sort(SortMode::Recent);
        assert_eq!(
            visible_indices(&topics, &view),
            visible_indices(&topics, &view)
        );
    }
}
