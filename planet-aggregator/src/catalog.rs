use crate::types::FeedMetadata;
use std::sync::Arc;

/// Successfully fetched feeds, ordered by display title.
#[derive(Debug, Clone, Default)]
pub struct FeedCatalog {
    feeds: Vec<Arc<FeedMetadata>>,
}

impl FeedCatalog {
    /// Sort feeds by title with plain byte ordering. Equal titles keep the
    /// order they were fetched in.
    pub fn new(feeds: impl IntoIterator<Item = FeedMetadata>) -> Self {
        let mut feeds: Vec<Arc<FeedMetadata>> = feeds.into_iter().map(Arc::new).collect();
        feeds.sort_by(|a, b| a.title.cmp(&b.title));
        Self { feeds }
    }

    pub fn feeds(&self) -> &[Arc<FeedMetadata>] {
        &self.feeds
    }

    pub fn into_feeds(self) -> Vec<Arc<FeedMetadata>> {
        self.feeds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(title: &str, url: &str) -> FeedMetadata {
        FeedMetadata {
            title: title.to_string(),
            link: String::new(),
            description: None,
            url: url.to_string(),
        }
    }

    #[test]
    fn orders_by_title_case_sensitively() {
        let catalog = FeedCatalog::new(vec![
            meta("beta", "1"),
            meta("Alpha", "2"),
            meta("alpha", "3"),
            meta("Zeta", "4"),
        ]);
        let titles: Vec<&str> = catalog.feeds().iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "Zeta", "alpha", "beta"]);
    }

    #[test]
    fn equal_titles_keep_fetch_order() {
        let catalog = FeedCatalog::new(vec![meta("Same", "first"), meta("Same", "second")]);
        assert_eq!(catalog.feeds()[0].url, "first");
        assert_eq!(catalog.feeds()[1].url, "second");
    }
}
