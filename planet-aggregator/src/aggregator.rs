use crate::catalog::FeedCatalog;
use crate::config::dedup_sources;
use crate::dates::DateFormat;
use crate::timeline::Timeline;
use crate::traits::FeedFetcher;
use crate::types::{FeedSource, FetchFailure, FetchedFeed, PlanetRun, RenderView, Result, RunReport};
use crate::view::validate_max_posts;
use futures::future::join_all;
use tracing::{info, warn};

/// Drives one run: fetch every feed, then merge, bucket and truncate.
pub struct PlanetAggregator<F> {
    fetcher: F,
}

impl<F: FeedFetcher> PlanetAggregator<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Build the render view for `sources`.
    ///
    /// `max_posts` and `date_format` are checked before anything is fetched.
    /// A feed that fails to fetch is logged and recorded in the report; the
    /// remaining feeds still make up the view.
    pub async fn build_view(
        &self,
        sources: &[FeedSource],
        max_posts: i64,
        date_format: &str,
        title: &str,
    ) -> Result<PlanetRun> {
        validate_max_posts(max_posts)?;
        let format = DateFormat::parse(date_format)?;

        let sources = dedup_sources(sources.to_vec());
        let mut report = RunReport {
            feeds_requested: sources.len(),
            ..Default::default()
        };

        let fetched = self.fetch_all(&sources, &mut report).await;
        report.feeds_fetched = fetched.len();

        let timeline = Timeline::build(&fetched, &format);
        report.skipped_items = timeline.skipped();
        report.timeline_len = timeline.len();

        let catalog = FeedCatalog::new(fetched.into_iter().map(|feed| feed.metadata));
        let view = RenderView::build(title, timeline, catalog, max_posts)?;

        info!(
            "Built view {:?}: {} posts, {} feeds, {} fetch failures",
            view.title,
            view.posts.len(),
            view.feeds.len(),
            report.failures.len()
        );

        Ok(PlanetRun { view, report })
    }

    /// Fetch all sources concurrently. Results come back in source order,
    /// which is what keeps timestamp ties deterministic.
    async fn fetch_all(&self, sources: &[FeedSource], report: &mut RunReport) -> Vec<FetchedFeed> {
        info!("Fetching {} feeds", sources.len());

        let results = join_all(sources.iter().map(|source| self.fetcher.fetch(source))).await;

        let mut fetched = Vec::with_capacity(results.len());
        for (source, result) in sources.iter().zip(results) {
            match result {
                Ok(feed) => fetched.push(feed),
                Err(e) => {
                    warn!("Failed to fetch feed {}: {}", source.url, e);
                    report.failures.push(FetchFailure {
                        url: source.url.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!("Successfully fetched {}/{} feeds", fetched.len(), sources.len());
        fetched
    }
}
