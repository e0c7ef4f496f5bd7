//! Configuration management for Trend Alert.
//!
//! Configuration is read from `~/.config/trend-alert/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::{ColorConfig, ThemePalettes};
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::engine::DEFAULT_PAGE_SIZE;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub colors: ThemePalettes,
    pub keybindings: KeybindingConfig,
}

/// Where the feed comes from and how it is paged.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// URL or filesystem path of the feed document.
    pub source: String,
    pub timeout_secs: u64,
    pub page_size: usize,
    pub search_debounce_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            source: "data/alerts.json".to_string(),
            timeout_secs: 10,
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: 300,
        }
    }
}

impl FeedConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/trend-alert/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("trend-alert").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, Self::default_config_content()).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> &'static str {
        r##"# Trend Alert Configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "/"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"

[feed]
# URL (http/https/file) or path of the feed produced by the pipeline
source = "data/alerts.json"
# Request timeout in seconds
timeout_secs = 10
# Topics per page
page_size = 20
# Quiet period before a search is applied (milliseconds)
search_debounce_ms = 300

[colors.dark]
background = "Reset"
text = "White"
muted = "DarkGray"
border = "DarkGray"
accent = "Cyan"
selection_bg = "Cyan"
selection_fg = "Black"
badge_trending = "LightRed"
badge_new = "LightGreen"
badge_type = "LightBlue"
entity = "Yellow"
link = "Blue"
error = "Red"
status_fg = "White"
status_bg = "DarkGray"

[colors.light]
background = "White"
text = "Black"
muted = "Gray"
border = "Gray"
accent = "Blue"
selection_bg = "Blue"
selection_fg = "White"
badge_trending = "Red"
badge_new = "Green"
badge_type = "Blue"
entity = "Magenta"
link = "Blue"
error = "Red"
status_fg = "Black"
status_bg = "Gray"

[keybindings]
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_filter = ["l", "Right", "Tab"]
prev_filter = ["h", "Left", "BackTab"]
sort_trending = ["t"]
sort_recent = ["r"]
search = ["/"]
load_more = ["n", "PageDown"]
toggle_card = ["Enter", "Space"]
show_more = ["m"]
open_article = ["o"]
toggle_theme = ["T"]
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
