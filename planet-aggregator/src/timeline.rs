use crate::normalize::normalize_item;
use crate::traits::DateFormatter;
use crate::types::{FetchedFeed, NormalizedPost};
use std::sync::Arc;
use tracing::info;

/// All posts across all feeds, newest first, with date groups assigned.
///
/// Only constructed through [`Timeline::build`], which sorts before it
/// buckets, so the date flags always describe the final order.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    posts: Vec<NormalizedPost>,
    skipped: usize,
}

impl Timeline {
    /// Normalize, merge and bucket the items of every fetched feed.
    /// Feeds are taken in the order given; that order breaks timestamp ties.
    pub fn build(feeds: &[FetchedFeed], formatter: &dyn DateFormatter) -> Self {
        let (mut posts, skipped) = merge(feeds);
        assign_date_groups(&mut posts, formatter);

        info!(
            "Built timeline with {} posts from {} feeds ({} items skipped)",
            posts.len(),
            feeds.len(),
            skipped
        );

        Self { posts, skipped }
    }

    pub fn posts(&self) -> &[NormalizedPost] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Number of items dropped for lack of a usable timestamp.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub(crate) fn into_posts(self) -> Vec<NormalizedPost> {
        self.posts
    }
}

/// Concatenate every feed's usable items and sort them newest first.
///
/// `sort_by` is stable, so equal timestamps keep feed order, then item order.
/// Items sharing a link across feeds are all kept.
pub fn merge(feeds: &[FetchedFeed]) -> (Vec<NormalizedPost>, usize) {
    let mut posts = Vec::new();
    let mut skipped = 0;

    for feed in feeds {
        let metadata = Arc::new(feed.metadata.clone());
        for item in &feed.items {
            match normalize_item(item, &metadata) {
                Some(post) => posts.push(post),
                None => skipped += 1,
            }
        }
    }

    posts.sort_by(|a, b| b.effective_timestamp.cmp(&a.effective_timestamp));

    (posts, skipped)
}

/// Single pass over an already sorted timeline that marks the first post and
/// every post whose formatted date differs from its predecessor's.
pub fn assign_date_groups(posts: &mut [NormalizedPost], formatter: &dyn DateFormatter) {
    let mut previous: Option<String> = None;

    for (i, post) in posts.iter_mut().enumerate() {
        post.formatted_date = formatter.format(&post.effective_timestamp);
        post.is_first_in_timeline = i == 0;
        post.starts_new_date_group = previous.as_deref() != Some(post.formatted_date.as_str());
        previous = Some(post.formatted_date.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::DateFormat;
    use crate::types::{FeedMetadata, RawFeedItem};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    fn item(title: &str, published: Option<DateTime<Utc>>) -> RawFeedItem {
        RawFeedItem {
            title: title.to_string(),
            link: format!("https://example.com/{}", title),
            published,
            ..Default::default()
        }
    }

    fn feed(title: &str, items: Vec<RawFeedItem>) -> FetchedFeed {
        FetchedFeed {
            metadata: FeedMetadata {
                title: title.to_string(),
                link: String::new(),
                description: None,
                url: format!("https://{}.example.com/feed", title),
            },
            items,
        }
    }

    fn titles(posts: &[NormalizedPost]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn sorts_newest_first_regardless_of_feed_order() {
        let feeds = vec![
            feed("a", vec![item("a1", Some(at(1, 8))), item("a2", Some(at(3, 8)))]),
            feed("b", vec![item("b1", Some(at(2, 8))), item("b2", Some(at(4, 8)))]),
        ];
        let (posts, skipped) = merge(&feeds);
        assert_eq!(skipped, 0);
        assert_eq!(titles(&posts), vec!["b2", "a2", "b1", "a1"]);
        for pair in posts.windows(2) {
            assert!(pair[0].effective_timestamp >= pair[1].effective_timestamp);
        }
    }

    #[test]
    fn ties_keep_feed_then_item_order() {
        let same = Some(at(2, 12));
        let feeds = vec![
            feed("a", vec![item("a1", same), item("a2", same)]),
            feed("b", vec![item("b1", same)]),
        ];
        let (posts, _) = merge(&feeds);
        assert_eq!(titles(&posts), vec!["a1", "a2", "b1"]);
    }

    #[test]
    fn undated_items_are_counted_not_merged() {
        let feeds = vec![feed(
            "a",
            vec![item("dated", Some(at(2, 1))), item("undated", None)],
        )];
        let (posts, skipped) = merge(&feeds);
        assert_eq!(titles(&posts), vec!["dated"]);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn mirrored_items_are_not_deduplicated() {
        let shared = item("shared", Some(at(2, 1)));
        let feeds = vec![feed("a", vec![shared.clone()]), feed("b", vec![shared])];
        let (posts, _) = merge(&feeds);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].feed.title, "a");
        assert_eq!(posts[1].feed.title, "b");
    }

    #[test]
    fn date_groups_follow_final_order() {
        let feeds = vec![feed(
            "a",
            vec![
                item("day1", Some(at(1, 9))),
                item("day2-late", Some(at(2, 20))),
                item("day2-early", Some(at(2, 7))),
            ],
        )];
        let format = DateFormat::parse("2006-01-02").unwrap();
        let timeline = Timeline::build(&feeds, &format);
        let posts = timeline.posts();

        assert_eq!(titles(posts), vec!["day2-late", "day2-early", "day1"]);
        assert!(posts[0].is_first_in_timeline && posts[0].starts_new_date_group);
        assert!(!posts[1].is_first_in_timeline && !posts[1].starts_new_date_group);
        assert!(posts[2].starts_new_date_group);
        assert_eq!(posts[2].formatted_date, "2024-01-01");

        for i in 1..posts.len() {
            assert_eq!(
                posts[i].starts_new_date_group,
                posts[i].formatted_date != posts[i - 1].formatted_date
            );
        }
    }

    #[test]
    fn empty_timeline_is_fine() {
        let format = DateFormat::parse("2006-01-02").unwrap();
        let timeline = Timeline::build(&[], &format);
        assert!(timeline.is_empty());
        assert_eq!(timeline.skipped(), 0);
    }
}
