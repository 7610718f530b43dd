//! Shopcrawl main entry point
//!
//! Command-line interface for the storefront listing crawler.

use anyhow::Context;
use clap::Parser;
use shopcrawl::config::{load_config_with_hash, Config};
use shopcrawl::crawler::{crawl, CrawlRequest};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shopcrawl: a storefront listing archiver
///
/// Fetches a contiguous range of search result pages from the configured
/// storefront feed, extracts item listings, and writes one JSON file per
/// item into the data directory.
#[derive(Parser, Debug)]
#[command(name = "shopcrawl")]
#[command(version)]
#[command(about = "Archive storefront search listings as JSON files", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// First page to crawl
    #[arg(long, default_value_t = 1)]
    start_page: u32,

    /// How many pages to crawl
    #[arg(long, default_value_t = 1)]
    max_pages: u32,

    /// Only include items whose condition contains this (e.g. 'New')
    #[arg(long)]
    condition: Option<String>,

    /// Write item files here instead of the configured data directory
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path).with_context(|| {
                format!("failed to load configuration from {}", path.display())
            })?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(dir) = &cli.output_dir {
        config.output.data_dir = dir.display().to_string();
    }

    let request = CrawlRequest {
        start_page: cli.start_page,
        page_count: cli.max_pages,
        condition: cli.condition.clone(),
    };
    request.validate()?;

    if cli.dry_run {
        handle_dry_run(&config, &request);
        return Ok(());
    }

    // Run the crawl; a fetch failure aborts before any summary is printed
    let outcome = crawl(config, request)
        .await
        .context("crawl aborted")?;

    println!(
        "✓ Saved {} items into {}",
        outcome.saved,
        outcome.output_dir.display()
    );

    if outcome.failed > 0 {
        anyhow::bail!("{} item writes failed", outcome.failed);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shopcrawl=info,warn"),
            1 => EnvFilter::new("shopcrawl=debug,info"),
            2 => EnvFilter::new("shopcrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &Config, request: &CrawlRequest) {
    println!("=== Shopcrawl Dry Run ===\n");

    println!("Fetch:");
    println!("  Endpoint: {}", config.fetch.endpoint);
    println!("  User agent: {}", config.fetch.user_agent);
    println!(
        "  Timeouts: {}s request, {}s connect",
        config.fetch.timeout_secs, config.fetch.connect_timeout_secs
    );

    let last_page = request.start_page.saturating_add(request.page_count) - 1;
    println!("\nCrawl:");
    println!("  Pages: {} through {}", request.start_page, last_page);
    match &request.condition {
        Some(filter) if !filter.trim().is_empty() => {
            println!("  Condition filter: '{}' (case-insensitive)", filter)
        }
        _ => println!("  Condition filter: none"),
    }

    println!("\nOutput:");
    println!("  Data directory: {}", config.output.data_dir);

    println!("\n✓ Configuration is valid");
    println!("✓ Would fetch {} page(s)", request.page_count);
}
