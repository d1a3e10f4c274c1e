use crate::types::{FeedMetadata, NormalizedPost, RawFeedItem};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

/// Canonical timestamps of an item after the published/updated fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTimestamps {
    pub published: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl ResolvedTimestamps {
    pub fn effective(&self) -> DateTime<Utc> {
        self.published
    }
}

/// Resolve an item's timestamps. `None` means the item has no usable time
/// and must stay out of the timeline.
pub fn resolve_timestamps(
    published: Option<DateTime<Utc>>,
    updated: Option<DateTime<Utc>>,
) -> Option<ResolvedTimestamps> {
    match (published, updated) {
        (None, None) => None,
        (None, Some(updated)) => Some(ResolvedTimestamps {
            published: updated,
            updated,
        }),
        (Some(published), None) => Some(ResolvedTimestamps {
            published,
            updated: published,
        }),
        (Some(published), Some(updated)) => Some(ResolvedTimestamps { published, updated }),
    }
}

/// Build a post from a raw item. Date fields are left for the bucketing pass.
pub fn normalize_item(item: &RawFeedItem, feed: &Arc<FeedMetadata>) -> Option<NormalizedPost> {
    let Some(times) = resolve_timestamps(item.published, item.updated) else {
        debug!(
            "Skipping item without timestamps: {:?} ({}) from {}",
            item.title, item.link, feed.url
        );
        return None;
    };

    let content = item
        .encoded_content
        .clone()
        .or_else(|| item.content.clone())
        .unwrap_or_default();

    Some(NormalizedPost {
        title: item.title.clone(),
        link: item.link.clone(),
        author: item.author.clone(),
        description: item.description.clone(),
        published: times.published,
        updated: times.updated,
        effective_timestamp: times.effective(),
        formatted_date: String::new(),
        is_first_in_timeline: false,
        starts_new_date_group: false,
        content,
        feed: Arc::clone(feed),
    })
}
