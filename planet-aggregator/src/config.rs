use crate::dates::DateFormat;
use crate::types::{Author, FeedSource, FetchConfig, PlanetError, Result};
use crate::view::validate_max_posts;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::warn;
use url::Url;

fn default_max_posts() -> i64 {
    50
}

fn default_date_format() -> String {
    "2006-01-02".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateOutput {
    pub src: PathBuf,
    pub dest: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RssOutput {
    pub dest: PathBuf,
}

/// Everything a run needs, as read from `planet.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanetConfig {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub author: Author,
    #[serde(default = "default_max_posts")]
    pub max_posts: i64,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub feeds: Vec<FeedSource>,
    #[serde(default)]
    pub templates: Vec<TemplateOutput>,
    pub rss: Option<RssOutput>,
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl PlanetConfig {
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            PlanetError::Config(format!("reading config from {}: {}", path.display(), e))
        })?;
        Self::from_toml(&raw)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let mut config: PlanetConfig = toml::from_str(raw)?;
        config.validate()?;
        config.feeds = dedup_sources(std::mem::take(&mut config.feeds));
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(PlanetError::Config("title must not be empty".to_string()));
        }

        validate_max_posts(self.max_posts)?;
        DateFormat::parse(&self.date_format)?;

        if self.feeds.is_empty() {
            return Err(PlanetError::Config("at least one feed is required".to_string()));
        }

        for feed in &self.feeds {
            Url::parse(&feed.url).map_err(|e| {
                PlanetError::Config(format!("feed {:?} has invalid url {:?}: {}", feed.name, feed.url, e))
            })?;
        }

        for template in &self.templates {
            if template.dest.as_os_str().is_empty() {
                return Err(PlanetError::Config(format!(
                    "template {} has no destination",
                    template.src.display()
                )));
            }
        }

        Ok(())
    }
}

/// Drop repeated feed URLs, keeping the first occurrence and its position.
pub fn dedup_sources(sources: Vec<FeedSource>) -> Vec<FeedSource> {
    let mut seen = HashSet::new();
    sources
        .into_iter()
        .filter(|source| {
            let fresh = seen.insert(source.url.clone());
            if !fresh {
                warn!("Ignoring duplicate feed url: {}", source.url);
            }
            fresh
        })
        .collect()
}
