use crate::types::{FeedSource, FetchedFeed, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Trait for retrieving and parsing a single feed
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetch the feed behind `source` and return its metadata and items.
    /// An error here only drops this feed from the run.
    async fn fetch(&self, source: &FeedSource) -> Result<FetchedFeed>;
}

/// Turns a timestamp into the string used for date headings
pub trait DateFormatter {
    fn format(&self, timestamp: &DateTime<Utc>) -> String;
}
