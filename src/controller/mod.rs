//! Interaction state machine over [`ViewState`].
//!
//! Front ends feed [`Interaction`]s in and draw [`RenderFrame`]s out; all
//! derivation goes through the pure functions in [`crate::engine`].

pub mod debounce;
pub mod frame;

pub use debounce::{Debouncer, DEFAULT_SEARCH_DEBOUNCE};
pub use frame::{FrameBody, RenderFrame, RenderSink, StatLine};

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::app::{Result, LOAD_ERROR_MESSAGE};
use crate::domain::{FilterCategory, SortMode, Topic, ViewState};
use crate::engine::{derive_pills, paginate, visible_indices, FilterPill, Page, DEFAULT_PAGE_SIZE};
use crate::fetcher::LoadedFeed;
use crate::render::card::CardView;
use crate::render::format::DATE_PLACEHOLDER;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    SelectFilter(FilterCategory),
    SelectSort(SortMode),
    /// Raw search box contents after a keystroke.
    SearchInput(String),
    LoadMore,
    /// Click on a card (not on a link or the "show more" control).
    ToggleCard(usize),
    ShowMoreArticles(usize),
}

/// What a handled interaction changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    /// A search commit is waiting on the debounce timer.
    SearchPending,
    /// The visible list must be redrawn.
    Rerender,
    /// Only the card at this visible position changed.
    CardChanged(usize),
}

/// Per-card UI state. Not part of the view; cleared on every list redraw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardState {
    pub expanded: bool,
    pub revealed: bool,
}

pub struct InteractionController {
    feed: Option<LoadedFeed>,
    load_error: Option<String>,
    view: ViewState,
    ordered: Vec<usize>,
    pills: Vec<FilterPill>,
    cards: HashMap<usize, CardState>,
    search: Debouncer<String>,
    page_size: usize,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_DEBOUNCE)
    }
}

impl InteractionController {
    pub fn new(page_size: usize, search_debounce: Duration) -> Self {
        Self {
            feed: None,
            load_error: None,
            view: ViewState::default(),
            ordered: Vec::new(),
            pills: Vec::new(),
            cards: HashMap::new(),
            search: Debouncer::new(search_debounce),
            page_size: page_size.max(1),
        }
    }

    /// Install the outcome of the startup load. A failure leaves stats,
    /// pills and topics unset and replaces the list with the error message.
    pub fn on_loaded(&mut self, result: Result<LoadedFeed>) {
        match result {
            Ok(feed) => {
                self.pills = derive_pills(&feed.document.stats.by_type);
                self.feed = Some(feed);
                self.load_error = None;
                self.view.page_depth = 1;
                self.recompute();
            }
            Err(e) => {
                tracing::warn!("Feed unavailable: {}", e);
                self.load_error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn pills(&self) -> &[FilterPill] {
        &self.pills
    }

    pub fn is_loaded(&self) -> bool {
        self.feed.is_some()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    pub fn card_state(&self, position: usize) -> CardState {
        self.cards.get(&position).copied().unwrap_or_default()
    }

    fn topics(&self) -> &[Topic] {
        self.feed
            .as_ref()
            .map(|f| f.document.topics.as_slice())
            .unwrap_or(&[])
    }

    /// Topics on screen, in display order.
    pub fn visible_topics(&self) -> Vec<&Topic> {
        let topics = self.topics();
        paginate(&self.ordered, self.view.page_depth, self.page_size)
            .visible()
            .iter()
            .map(|&index| &topics[index])
            .collect()
    }

    pub fn visible_topic(&self, position: usize) -> Option<&Topic> {
        self.visible_topics().get(position).copied()
    }

    pub fn handle(&mut self, interaction: Interaction, now: Instant) -> Outcome {
        match interaction {
            Interaction::SelectFilter(filter) => {
                tracing::debug!("Filter -> {}", filter);
                self.view.set_filter(filter);
                self.recompute();
                Outcome::Rerender
            }
            Interaction::SelectSort(sort) => {
                tracing::debug!("Sort -> {}", sort);
                self.view.set_sort(sort);
                self.recompute();
                Outcome::Rerender
            }
            Interaction::SearchInput(text) => {
                // Back to the committed query: drop the pending commit.
                if text.trim() == self.view.search_query {
                    self.search.cancel();
                    return Outcome::Unchanged;
                }
                self.search.schedule(text, now);
                Outcome::SearchPending
            }
            Interaction::LoadMore => {
                let page = paginate(&self.ordered, self.view.page_depth, self.page_size);
                if !page.has_more() {
                    return Outcome::Unchanged;
                }
                self.view.advance_page();
                self.cards.clear();
                Outcome::Rerender
            }
            Interaction::ToggleCard(position) => {
                if position >= self.visible_len() {
                    return Outcome::Unchanged;
                }
                let state = self.cards.entry(position).or_default();
                state.expanded = !state.expanded;
                Outcome::CardChanged(position)
            }
            Interaction::ShowMoreArticles(position) => {
                let has_hidden = self
                    .visible_topic(position)
                    .is_some_and(|t| t.articles.len() > crate::render::card::VISIBLE_ARTICLES);
                let state = self.card_state(position);
                if !has_hidden || state.revealed {
                    return Outcome::Unchanged;
                }
                self.cards.entry(position).or_default().revealed = true;
                Outcome::CardChanged(position)
            }
        }
    }

    /// Commit a pending search once its debounce window has elapsed.
    pub fn tick(&mut self, now: Instant) -> Outcome {
        match self.search.poll(now) {
            Some(query) => {
                tracing::debug!("Search -> {:?}", query.trim());
                self.view.set_search(&query);
                self.recompute();
                Outcome::Rerender
            }
            None => Outcome::Unchanged,
        }
    }

    fn visible_len(&self) -> usize {
        paginate(&self.ordered, self.view.page_depth, self.page_size)
            .visible()
            .len()
    }

    fn recompute(&mut self) {
        self.ordered = visible_indices(self.topics(), &self.view);
        self.cards.clear();
    }

    /// Build the frame for the current state. `now` anchors relative dates.
    pub fn frame(&self, now: DateTime<Utc>) -> RenderFrame<'_> {
        let body = if let Some(message) = self.load_error.as_deref() {
            FrameBody::Error(message)
        } else if self.feed.is_none() {
            FrameBody::Loading
        } else {
            let topics = self.topics();
            match paginate(&self.ordered, self.view.page_depth, self.page_size) {
                Page::Empty => FrameBody::Empty,
                Page::Items { visible, remaining } => {
                    let cards = visible
                        .iter()
                        .enumerate()
                        .map(|(position, &index)| {
                            let mut card = CardView::from_topic(&topics[index], now);
                            let state = self.card_state(position);
                            card.expanded = state.expanded;
                            if state.revealed {
                                card.reveal_all();
                            }
                            card
                        })
                        .collect();
                    FrameBody::Cards {
                        cards,
                        load_more: (remaining > 0).then_some(remaining),
                    }
                }
            }
        };

        RenderFrame {
            stats: self
                .feed
                .as_ref()
                .map(|f| StatLine::from_stats(&f.document.stats)),
            last_updated: self
                .feed
                .as_ref()
                .map(|f| f.last_updated.as_str())
                .unwrap_or(DATE_PLACEHOLDER),
            pills: &self.pills,
            active_filter: &self.view.filter,
            sort: self.view.sort,
            search_query: &self.view.search_query,
            body,
        }
    }

    pub fn render<S: RenderSink + ?Sized>(&self, sink: &mut S, now: DateTime<Utc>) -> Result<()> {
        sink.present(&self.frame(now))
    }
}
