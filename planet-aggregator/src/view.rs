use crate::catalog::FeedCatalog;
use crate::timeline::Timeline;
use crate::types::{PlanetError, RenderView, Result};
use tracing::debug;

/// Check a configured post limit and turn it into a slice bound.
pub fn validate_max_posts(max_posts: i64) -> Result<usize> {
    usize::try_from(max_posts).map_err(|_| PlanetError::InvalidMaxPosts(max_posts))
}

impl RenderView {
    /// Keep the `max_posts` newest posts of the timeline and attach the
    /// full catalog. Posts beyond the limit are dropped here.
    pub fn build(
        title: &str,
        timeline: Timeline,
        catalog: FeedCatalog,
        max_posts: i64,
    ) -> Result<Self> {
        let limit = validate_max_posts(max_posts)?;
        let mut posts = timeline.into_posts();
        let total = posts.len();
        posts.truncate(limit);

        debug!("Selected {} of {} posts for rendering", posts.len(), total);

        Ok(Self {
            title: title.to_string(),
            posts,
            feeds: catalog.into_feeds(),
        })
    }
}
