use crate::parser::FeedParser;
use crate::traits::FeedFetcher;
use crate::types::{FeedSource, FetchConfig, FetchedFeed, PlanetError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Fetches feeds over HTTP and hands the body to [`FeedParser`].
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let redirect = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        };

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(redirect);

        Ok(Self::with_client(client.build()?, config))
    }

    fn with_client(client: Client, config: FetchConfig) -> Self {
        Self { client, config }
    }

    /// Download the raw feed document. A single attempt; failures are returned as-is.
    pub async fn fetch_body(&self, url: &str) -> Result<Vec<u8>> {
        let start_time = Instant::now();
        let url = Url::parse(url)?;

        debug!("Fetching feed: {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(PlanetError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let max_bytes = (self.config.max_feed_size_mb as u64).saturating_mul(BYTES_PER_MB);
        if let Some(content_length) = response.content_length() {
            if content_length > max_bytes {
                return Err(too_large(content_length));
            }
        }

        let body = response.bytes().await?;
        if body.len() as u64 > max_bytes {
            return Err(too_large(body.len() as u64));
        }

        info!(
            "Fetched feed: {} ({} bytes in {}ms)",
            url,
            body.len(),
            start_time.elapsed().as_millis()
        );

        Ok(body.to_vec())
    }
}

fn too_large(bytes: u64) -> PlanetError {
    PlanetError::FeedTooLarge {
        size_mb: usize::try_from(bytes / BYTES_PER_MB).unwrap_or(usize::MAX),
    }
}

#[async_trait]
impl FeedFetcher for HttpFetcher {
    async fn fetch(&self, source: &FeedSource) -> Result<FetchedFeed> {
        let body = self.fetch_body(&source.url).await?;
        FeedParser::parse_feed(source, &body)
    }
}
