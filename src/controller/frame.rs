use crate::app::Result;
use crate::domain::{FilterCategory, SortMode, StatsSummary};
use crate::engine::FilterPill;
use crate::render::card::CardView;
use crate::render::format::format_number;

/// The four header counters, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatLine {
    pub screened: String,
    pub topics: String,
    pub trending: String,
    pub new_policies: String,
}

impl StatLine {
    pub fn from_stats(stats: &StatsSummary) -> Self {
        Self {
            screened: format_number(stats.screened_items),
            topics: format_number(stats.total_topics),
            trending: format_number(stats.trending_topics),
            new_policies: format_number(stats.new_policies),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameBody<'a> {
    /// Feed not loaded yet.
    Loading,
    /// Feed failed to load; the message replaces the list.
    Error(&'a str),
    /// Nothing matches the current view.
    Empty,
    Cards {
        cards: Vec<CardView<'a>>,
        /// `Some(remaining)` while a "load more" control should be shown.
        load_more: Option<usize>,
    },
}

impl FrameBody<'_> {
    pub fn show_empty_state(&self) -> bool {
        matches!(self, FrameBody::Empty)
    }

    pub fn load_more(&self) -> Option<usize> {
        match self {
            FrameBody::Cards { load_more, .. } => *load_more,
            _ => None,
        }
    }

    pub fn cards(&self) -> &[CardView<'_>] {
        match self {
            FrameBody::Cards { cards, .. } => cards,
            _ => &[],
        }
    }
}

/// Everything a front end needs to draw one state of the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFrame<'a> {
    /// `None` until a feed has loaded successfully.
    pub stats: Option<StatLine>,
    pub last_updated: &'a str,
    pub pills: &'a [FilterPill],
    pub active_filter: &'a FilterCategory,
    pub sort: SortMode,
    pub search_query: &'a str,
    pub body: FrameBody<'a>,
}

/// A front end that can present frames (HTML document, terminal, text).
pub trait RenderSink {
    fn present(&mut self, frame: &RenderFrame<'_>) -> Result<()>;
}
