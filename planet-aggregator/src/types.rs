use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One subscribed feed as it appears in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    #[serde(default)]
    pub name: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Metadata of a feed that was fetched successfully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedMetadata {
    /// Display title: the feed's own title, or the configured name when the feed has none.
    pub title: String,
    /// Site link advertised by the feed.
    pub link: String,
    pub description: Option<String>,
    /// URL the feed was fetched from.
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub name: String,
    pub email: String,
}

/// An item exactly as the fetch collaborator produced it.
#[derive(Debug, Clone, Default)]
pub struct RawFeedItem {
    pub title: String,
    pub link: String,
    pub author: Author,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub encoded_content: Option<String>,
}

/// Result of fetching one feed: its metadata plus items in document order.
#[derive(Debug, Clone)]
pub struct FetchedFeed {
    pub metadata: FeedMetadata,
    pub items: Vec<RawFeedItem>,
}

/// A feed item with a resolved timestamp, ready for the timeline.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedPost {
    pub title: String,
    pub link: String,
    pub author: Author,
    pub description: Option<String>,
    pub published: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub effective_timestamp: DateTime<Utc>,
    pub formatted_date: String,
    pub is_first_in_timeline: bool,
    pub starts_new_date_group: bool,
    pub content: String,
    pub feed: Arc<FeedMetadata>,
}

/// The bounded snapshot handed to every output collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct RenderView {
    pub title: String,
    pub posts: Vec<NormalizedPost>,
    pub feeds: Vec<Arc<FeedMetadata>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub url: String,
    pub error: String,
}

/// What happened during one pipeline run, beyond the view itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub feeds_requested: usize,
    pub feeds_fetched: usize,
    pub failures: Vec<FetchFailure>,
    /// Items dropped because neither `published` nor `updated` resolved.
    pub skipped_items: usize,
    pub timeline_len: usize,
}

#[derive(Debug, Clone)]
pub struct PlanetRun {
    pub view: RenderView,
    pub report: RunReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_feed_size_mb: usize,
    pub follow_redirects: bool,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Planet-Aggregator/1.0".to_string(),
            timeout_seconds: 30,
            max_feed_size_mb: 10,
            follow_redirects: true,
            max_redirects: 5,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlanetError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Feed size exceeds limit: {size_mb}MB")]
    FeedTooLarge { size_mb: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("max_posts must be non-negative, got {0}")]
    InvalidMaxPosts(i64),

    #[error("Invalid date format {format:?}: {reason}")]
    DateFormat { format: String, reason: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error("RSS serialization error: {0}")]
    Rss(String),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlanetError>;
