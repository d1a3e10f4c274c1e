pub mod types;
pub mod traits;
pub mod config;
pub mod dates;
pub mod parser;
pub mod fetcher;
pub mod normalize;
pub mod timeline;
pub mod catalog;
pub mod view;
pub mod aggregator;
pub mod render;
pub mod rss;
pub mod output;

pub use types::*;
pub use traits::{DateFormatter, FeedFetcher};
pub use config::PlanetConfig;
pub use dates::DateFormat;
pub use parser::FeedParser;
pub use fetcher::HttpFetcher;
pub use timeline::Timeline;
pub use catalog::FeedCatalog;
pub use aggregator::PlanetAggregator;
pub use render::TemplateRenderer;
pub use rss::{ChannelInfo, RssWriter};
