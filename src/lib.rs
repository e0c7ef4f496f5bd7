//! # Trend Alert
//!
//! A viewer for a precomputed feed of trending policy topics.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Loader → Engine → Controller → RenderSink (HTML / text / TUI)
//! ```
//!
//! - [`fetcher`]: loads the feed document over HTTP or from disk
//! - [`engine`]: filtering, search, ordering, pills and pagination
//! - [`controller`]: interaction state machine producing render frames
//! - [`render`]: escaped HTML markup and plain-text output
//! - [`tui`]: terminal front end built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Browse interactively
//! trend-alert --source data/alerts.json
//!
//! # Static page of the second page of Tax topics, newest first
//! trend-alert render --filter Tax --sort recent --pages 2 -o trends.html
//!
//! # Switch theme
//! trend-alert theme toggle
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together config,
/// the feed loader and the theme store.
pub mod app;

/// Command-line interface using clap.
///
/// - `tui` - Launch the TUI (default)
/// - `render` - Write a static HTML page
/// - `list` - Plain-text listing
/// - `stats` - Header stats and categories
/// - `theme [show|toggle|set]` - Theme preference
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/trend-alert/config.toml`, supporting:
/// - Feed source, timeout, page size and search debounce
/// - Dark and light palettes (named or hex colors)
/// - Custom keybindings
pub mod config;

/// Interaction state machine and the [`RenderSink`](controller::RenderSink) seam.
pub mod controller;

/// Core domain models.
///
/// - [`FeedDocument`](domain::FeedDocument): the loaded feed
/// - [`Topic`](domain::Topic) and [`Article`](domain::Article)
/// - [`ViewState`](domain::ViewState): filter, sort, search and page depth
pub mod domain;

/// Pure derivations over the topic list.
pub mod engine;

/// Feed fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait for fetching raw bytes
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
/// - [`FileFetcher`](fetcher::FileFetcher): local files
/// - [`FeedLoader`](fetcher::FeedLoader): fetch and parse
pub mod fetcher;

pub mod render;

/// Persisted dark/light preference.
pub mod theme;

/// Terminal user interface.
///
/// Header stats, search box, filter pills and sort toggle above a
/// scrollable card list. Keybindings: j/k navigate, Tab cycles filters,
/// t/r sort, / search, Enter expands, n loads more, o opens in browser,
/// T toggles theme, q quits.
pub mod tui;
