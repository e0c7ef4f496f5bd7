use async_trait::async_trait;

use crate::app::{Result, TrendAlertError};
use crate::fetcher::{FeedSource, Fetcher};

/// Reads the feed from the local filesystem, e.g. the default
/// `data/alerts.json` written next to the pipeline output.
#[derive(Debug, Default, Clone)]
pub struct FileFetcher;

impl FileFetcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Fetcher for FileFetcher {
    async fn fetch(&self, source: &str) -> Result<Vec<u8>> {
        let path = match FeedSource::parse(source)? {
            FeedSource::File(path) => path,
            FeedSource::Http(url) => {
                return Err(TrendAlertError::Other(format!(
                    "{} is not a local feed source",
                    url
                )))
            }
        };
        Ok(tokio::fs::read(&path).await?)
    }
}
