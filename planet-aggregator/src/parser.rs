use crate::types::{Author, FeedMetadata, FeedSource, FetchedFeed, PlanetError, RawFeedItem, Result};
use feed_rs::parser;
use tracing::{debug, info};

pub struct FeedParser;

impl FeedParser {
    /// Parse RSS, Atom or JSON Feed bytes into feed metadata and raw items.
    /// Dates that feed-rs cannot parse come back as `None`.
    pub fn parse_feed(source: &FeedSource, content: &[u8]) -> Result<FetchedFeed> {
        debug!("Parsing feed {} ({} bytes)", source.url, content.len());

        let feed = parser::parse(content)
            .map_err(|e| PlanetError::Parse(format!("Failed to parse {}: {}", source.url, e)))?;

        let title = feed
            .title
            .map(|t| t.content.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| source.name.clone());
        let link = feed
            .links
            .first()
            .map(|l| l.href.clone())
            .unwrap_or_default();
        let description = feed.description.map(|d| d.content);

        let items: Vec<RawFeedItem> = feed.entries.into_iter().map(Self::parse_entry).collect();

        info!("Parsed feed {} with {} entries", source.url, items.len());

        Ok(FetchedFeed {
            metadata: FeedMetadata {
                title,
                link,
                description,
                url: source.url.clone(),
            },
            items,
        })
    }

    fn parse_entry(entry: feed_rs::model::Entry) -> RawFeedItem {
        let title = entry.title.map(|t| t.content).unwrap_or_default();
        let link = entry
            .links
            .first()
            .map(|l| l.href.clone())
            .unwrap_or_default();

        let author = entry
            .authors
            .first()
            .map(|a| Author {
                name: a.name.clone(),
                email: a.email.clone().unwrap_or_default(),
            })
            .unwrap_or_default();

        let description = entry.summary.map(|s| s.content);
        let encoded_content = entry.content.and_then(|c| c.body);

        RawFeedItem {
            title,
            link,
            author,
            published: entry.published,
            updated: entry.updated,
            content: description.clone(),
            description,
            encoded_content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Example Blog</title>
    <link>https://blog.example.com/</link>
    <description>Posts about things</description>
    <item>
      <title>First post</title>
      <link>https://blog.example.com/first</link>
      <description>Short summary</description>
      <content:encoded><![CDATA[<p>Full body</p>]]></content:encoded>
      <pubDate>Tue, 02 Jan 2024 10:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Undated post</title>
      <link>https://blog.example.com/undated</link>
      <description>No date here</description>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_rss_channel_and_items() {
        let source = FeedSource::new("Configured", "https://blog.example.com/feed.xml");
        let feed = FeedParser::parse_feed(&source, RSS.as_bytes()).unwrap();

        assert_eq!(feed.metadata.title, "Example Blog");
        assert_eq!(feed.metadata.url, "https://blog.example.com/feed.xml");
        assert_eq!(feed.items.len(), 2);

        let first = &feed.items[0];
        assert_eq!(first.title, "First post");
        assert_eq!(first.link, "https://blog.example.com/first");
        assert_eq!(
            first.published,
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap())
        );
        assert_eq!(first.description.as_deref(), Some("Short summary"));
        assert!(first
            .encoded_content
            .as_deref()
            .is_some_and(|c| c.contains("Full body")));

        assert_eq!(feed.items[1].published, None);
    }

    #[test]
    fn unparseable_date_is_absent() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>Dates</title><link>https://d.example.com/</link><description>d</description>
<item><title>Bad</title><link>https://d.example.com/bad</link><pubDate>not a date at all</pubDate></item>
</channel></rss>"#;
        let source = FeedSource::new("", "https://d.example.com/feed");
        let feed = FeedParser::parse_feed(&source, xml.as_bytes()).unwrap();
        assert_eq!(feed.items.len(), 1);
        assert_eq!(feed.items[0].title, "Bad");
        assert_eq!(feed.items[0].published, None);
    }

    #[test]
    fn falls_back_to_configured_name() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title></title><link>https://x.example.com/</link><description>d</description></channel></rss>"#;
        let source = FeedSource::new("Configured", "https://x.example.com/feed");
        let feed = FeedParser::parse_feed(&source, xml.as_bytes()).unwrap();
        assert_eq!(feed.metadata.title, "Configured");
        assert!(feed.items.is_empty());
    }

    #[test]
    fn rejects_garbage() {
        let source = FeedSource::new("", "https://x.example.com/feed");
        let err = FeedParser::parse_feed(&source, b"this is not a feed").unwrap_err();
        assert!(matches!(err, PlanetError::Parse(_)));
    }
}
