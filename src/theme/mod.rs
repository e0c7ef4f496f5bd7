//! Dark/light theme preference, persisted across sessions.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::app::{Result, TrendAlertError};
use crate::domain::Theme;

/// Key-value storage for the theme preference.
pub trait ThemeStore {
    fn load(&self) -> Result<Option<Theme>>;
    fn save(&self, theme: Theme) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    theme: Option<Theme>,
}

/// Stores the preference as TOML, by default in
/// `<data_dir>/trend-alert/preferences.toml`.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| TrendAlertError::Config("Could not find data directory".into()))?;
        Ok(data_dir.join("trend-alert").join("preferences.toml"))
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Result<Option<Theme>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let prefs: Preferences = toml::from_str(&content)
            .map_err(|e| TrendAlertError::Theme(format!("{}: {}", self.path.display(), e)))?;
        Ok(prefs.theme)
    }

    fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string(&Preferences { theme: Some(theme) })
            .map_err(|e| TrendAlertError::Theme(e.to_string()))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// In-process store, used where nothing should touch the disk.
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    theme: Mutex<Option<Theme>>,
}

impl MemoryThemeStore {
    pub fn new(initial: Option<Theme>) -> Self {
        Self {
            theme: Mutex::new(initial),
        }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<Theme>> {
        self.theme
            .lock()
            .map(|t| *t)
            .map_err(|e| TrendAlertError::Theme(e.to_string()))
    }

    fn save(&self, theme: Theme) -> Result<()> {
        let mut slot = self
            .theme
            .lock()
            .map_err(|e| TrendAlertError::Theme(e.to_string()))?;
        *slot = Some(theme);
        Ok(())
    }
}

/// Two-state theme toggle. Storage failures are logged and never block a
/// transition.
pub struct ThemeController {
    store: Box<dyn ThemeStore + Send + Sync>,
    current: Theme,
}

impl ThemeController {
    pub fn init(store: Box<dyn ThemeStore + Send + Sync>) -> Self {
        let current = match store.load() {
            Ok(theme) => theme.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Could not read theme preference: {}", e);
                Theme::default()
            }
        };
        Self { store, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn toggle(&mut self) -> Theme {
        self.set(self.current.toggled())
    }

    pub fn set(&mut self, theme: Theme) -> Theme {
        self.current = theme;
        if let Err(e) = self.store.save(theme) {
            tracing::warn!("Could not save theme preference: {}", e);
        }
        self.current
    }
}
