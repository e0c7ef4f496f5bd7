pub mod file_fetcher;
pub mod http_fetcher;
pub mod loader;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::app::Result;

pub use file_fetcher::FileFetcher;
pub use http_fetcher::HttpFetcher;
pub use loader::{FeedLoader, LoadedFeed};

/// Where the feed document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Http(Url),
    File(PathBuf),
}

impl FeedSource {
    /// Interpret `source` as an http(s) or file URL, falling back to a
    /// filesystem path (the default `data/alerts.json` is relative).
    pub fn parse(source: &str) -> Result<Self> {
        match Url::parse(source) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                Ok(FeedSource::Http(url))
            }
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(FeedSource::File)
                .map_err(|_| crate::app::TrendAlertError::Other(format!("Invalid file URL: {}", source))),
            _ => Ok(FeedSource::File(PathBuf::from(source))),
        }
    }
}

#[async_trait]
pub trait Fetcher {
    /// Fetch the raw feed body. Any non-success status is an error.
    async fn fetch(&self, source: &str) -> Result<Vec<u8>>;
}

/// Dispatches to HTTP or the filesystem depending on the source.
pub struct SourceFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl SourceFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            http: HttpFetcher::new(timeout_secs)?,
            file: FileFetcher::new(),
        })
    }

    pub fn shared(timeout_secs: u64) -> Result<Arc<dyn Fetcher + Send + Sync>> {
        Ok(Arc::new(Self::new(timeout_secs)?))
    }
}

#[async_trait]
impl Fetcher for SourceFetcher {
    async fn fetch(&self, source: &str) -> Result<Vec<u8>> {
        match FeedSource::parse(source)? {
            FeedSource::Http(_) => self.http.fetch(source).await,
            FeedSource::File(_) => self.file.fetch(source).await,
        }
    }
}
