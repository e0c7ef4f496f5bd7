pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{SortMode, Theme};

#[derive(Parser)]
#[command(name = "trend-alert")]
#[command(about = "Browse trending policy topics from a precomputed feed", long_about = None)]
pub struct Cli {
    /// Feed URL or path (overrides [feed].source)
    #[arg(short, long, global = true)]
    pub source: Option<String>,

    /// Config file to use instead of ~/.config/trend-alert/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default)
    Tui,
    /// Write the current view as a static HTML page
    Render {
        #[command(flatten)]
        view: ViewArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the visible topics as plain text
    List {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Show header stats and filter categories
    Stats,
    /// Show or change the color theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

/// View options shared by `render` and `list`.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Category to show ("all" for every category)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Sort order
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Case-insensitive search over labels and key entities
    #[arg(long)]
    pub search: Option<String>,

    /// Number of pages to show
    #[arg(short, long, default_value_t = 1)]
    pub pages: usize,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArg {
    Trending,
    Recent,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Trending => SortMode::Trending,
            SortArg::Recent => SortMode::Recent,
        }
    }
}

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between dark and light
    Toggle,
    /// Set the theme explicitly
    Set {
        /// dark or light
        theme: Theme,
    },
}
