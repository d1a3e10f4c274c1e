use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use planet_aggregator::output::write_artifact;
use planet_aggregator::{
    ChannelInfo, HttpFetcher, PlanetAggregator, PlanetConfig, RssWriter, TemplateRenderer,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "planet", about = "Aggregate feeds into static pages and an RSS feed")]
struct Args {
    /// Path to the TOML configuration
    #[arg(short, long, env = "PLANET_CONFIG", default_value = "planet.toml")]
    config: PathBuf,

    /// Print the render view as JSON on stdout
    #[arg(long)]
    print_json: bool,

    /// Build the view but do not write templates or the RSS file
    #[arg(long)]
    no_output: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    info!("Starting planet aggregator with {}", args.config.display());

    let config = PlanetConfig::load(&args.config)
        .await
        .with_context(|| format!("loading {}", args.config.display()))?;

    // Templates are compiled before fetching so a typo fails fast.
    let mut renderer = TemplateRenderer::new();
    let mut templates = Vec::with_capacity(config.templates.len());
    for template in &config.templates {
        let name = renderer.register_file(&template.src).await?;
        templates.push((name, template.dest.clone()));
    }

    let fetcher = HttpFetcher::new(config.fetch.clone()).context("creating HTTP client")?;
    let aggregator = PlanetAggregator::new(fetcher);

    let run = aggregator
        .build_view(&config.feeds, config.max_posts, &config.date_format, &config.title)
        .await?;

    for failure in &run.report.failures {
        warn!("Feed {} contributed nothing: {}", failure.url, failure.error);
    }
    info!(
        "Timeline has {} posts ({} skipped without dates), rendering {}",
        run.report.timeline_len,
        run.report.skipped_items,
        run.view.posts.len()
    );

    if args.print_json {
        println!("{}", serde_json::to_string_pretty(&run.view)?);
    }

    if args.no_output {
        return Ok(());
    }

    for (name, dest) in &templates {
        let page = renderer.render(name, &run.view)?;
        write_artifact(dest, page.as_bytes())
            .await
            .with_context(|| format!("writing {}", dest.display()))?;
    }

    if let Some(rss) = &config.rss {
        let writer = RssWriter::new(ChannelInfo {
            description: config.description.clone(),
            link: config.link.clone(),
            author: config.author.clone(),
        });
        let document = writer.write(&run.view, Utc::now())?;
        write_artifact(&rss.dest, document.as_bytes())
            .await
            .with_context(|| format!("writing {}", rss.dest.display()))?;
    }

    info!("Planet aggregator finished");
    Ok(())
}
