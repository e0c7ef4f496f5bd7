use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::app::Result;
use crate::domain::FeedDocument;
use crate::fetcher::Fetcher;
use crate::render::format::format_timestamp;

/// A successfully loaded feed plus its "last updated" display string.
#[derive(Debug, Clone)]
pub struct LoadedFeed {
    pub document: FeedDocument,
    pub last_updated: String,
}

impl LoadedFeed {
    pub fn from_document(document: FeedDocument, now: DateTime<Utc>) -> Self {
        let last_updated = format_timestamp(document.generated_at.as_deref(), now);
        Self {
            document,
            last_updated,
        }
    }
}

/// Fetches and parses the feed document in one shot. No retries.
pub struct FeedLoader {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
}

impl FeedLoader {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self { fetcher }
    }

    pub async fn load(&self, source: &str) -> Result<LoadedFeed> {
        tracing::info!("Loading feed from {}", source);

        let body = self.fetcher.fetch(source).await.inspect_err(|e| {
            tracing::error!("Error loading data from {}: {}", source, e);
        })?;

        let document = parse_document(&body).inspect_err(|e| {
            tracing::error!("Error parsing feed from {}: {}", source, e);
        })?;

        tracing::info!("Loaded {} topics", document.topics.len());
        Ok(LoadedFeed::from_document(document, Utc::now()))
    }
}

/// Parse a feed body. A body that is not the expected shape is a parse failure.
pub fn parse_document(body: &[u8]) -> Result<FeedDocument> {
    let document: FeedDocument = serde_json::from_slice(body)?;

    for (index, topic) in document.topics.iter().enumerate() {
        if topic.article_count != topic.articles.len() as u64 {
            tracing::debug!(
                "Topic {} ({}) reports {} articles but carries {}",
                index,
                topic.label,
                topic.article_count,
                topic.articles.len()
            );
        }
    }

    Ok(document)
}
