use std::sync::Arc;

use crate::app::Result;
use crate::config::Config;
use crate::controller::InteractionController;
use crate::fetcher::{FeedLoader, Fetcher, SourceFetcher};
use crate::theme::{FileThemeStore, MemoryThemeStore, ThemeController};

pub struct AppContext {
    pub config: Arc<Config>,
    /// Feed URL or path in effect (config value unless overridden).
    pub source: String,
    pub loader: Arc<FeedLoader>,
}

impl AppContext {
    pub fn new(config: Config, source: Option<String>) -> Result<Self> {
        let fetcher = SourceFetcher::shared(config.feed.timeout_secs)?;
        Ok(Self::with_fetcher(config, source, fetcher))
    }

    pub fn with_fetcher(
        config: Config,
        source: Option<String>,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
    ) -> Self {
        let source = source.unwrap_or_else(|| config.feed.source.clone());
        Self {
            config: Arc::new(config),
            source,
            loader: Arc::new(FeedLoader::new(fetcher)),
        }
    }

    /// A fresh controller with the configured paging and debounce.
    pub fn controller(&self) -> InteractionController {
        InteractionController::new(
            self.config.feed.page_size,
            self.config.feed.search_debounce(),
        )
    }

    /// Fetch the feed once and hand the outcome to a fresh controller.
    pub async fn load_controller(&self) -> InteractionController {
        let mut controller = self.controller();
        controller.on_loaded(self.loader.load(&self.source).await);
        controller
    }

    pub fn theme_controller(&self) -> ThemeController {
        match FileThemeStore::default_path() {
            Ok(path) => ThemeController::init(Box::new(FileThemeStore::new(path))),
            Err(e) => {
                tracing::warn!("Theme preference will not persist: {}", e);
                ThemeController::init(Box::new(MemoryThemeStore::default()))
            }
        }
    }
}
