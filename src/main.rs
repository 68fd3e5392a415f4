//! Skimmer command-line entry point

use anyhow::Context;
use clap::Parser;
use skimmer::config::{load_config, Config};
use skimmer::crawler::{Crawler, Fetcher, RetryPolicy};
use skimmer::job::Job;
use skimmer::pages::{site_root, storefront_registry};
use skimmer::sink::ProductSink;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Skimmer: a priority-driven storefront scraper
///
/// Seeds the crawl with one URL, follows in-site links page type by page
/// type, and writes scraped product records when the queue runs dry.
#[derive(Parser, Debug)]
#[command(name = "skimmer")]
#[command(version)]
#[command(about = "A priority-driven storefront scraper", long_about = None)]
struct Cli {
    /// The URL to start scraping from
    #[arg(value_name = "URL")]
    seed: String,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    let seed = url::Url::parse(&cli.seed)
        .with_context(|| format!("invalid seed URL: {}", cli.seed))?;
    let root = site_root(&seed);
    tracing::info!("Crawling {} (site root {})", seed, root);

    let registry = storefront_registry(&root);
    let fetcher = Fetcher::new(RetryPolicy::from_config(&config.crawler))
        .context("failed to build HTTP client")?;
    let sink = ProductSink::new(&config.output.json_path, &config.output.csv_path);

    let mut crawler = Crawler::new(registry, fetcher).with_processor(Box::new(sink));
    crawler.enqueue(Job::get(seed.as_str()));

    let stats = crawler.start().await?;
    tracing::info!(
        "Done: {} jobs processed, {} dropped, {} results forwarded",
        stats.jobs_processed,
        stats.jobs_dropped,
        stats.results_forwarded
    );

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("skimmer=info,warn"),
            1 => EnvFilter::new("skimmer=debug,info"),
            2 => EnvFilter::new("skimmer=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
