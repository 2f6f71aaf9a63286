//! Sitescribe main entry point
//!
//! This is the command-line interface for the Sitescribe site archiver.

use anyhow::Result;
use clap::Parser;
use sitescribe::config::load_config;
use sitescribe::crawler::crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitescribe: a same-domain site archiver
///
/// Sitescribe walks every reachable page of a single site breadth-first,
/// archives the visible text of each page, and downloads linked documents
/// and media into a content-addressed directory tree.
#[derive(Parser, Debug)]
#[command(name = "sitescribe")]
#[command(version = "0.1.0")]
#[command(about = "A same-domain site archiver", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config(&cli.config) {
        Ok(cfg) => {
            tracing::info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config)
    } else {
        handle_crawl(config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitescribe=info,warn"),
            1 => EnvFilter::new("sitescribe=debug,info"),
            2 => EnvFilter::new("sitescribe=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &sitescribe::config::Config) -> Result<()> {
    println!("=== Sitescribe Dry Run ===\n");

    println!("Crawl Configuration:");
    println!("  Seed URL: {}", config.crawl.seed_url);
    println!(
        "  Navigation timeout: {}ms",
        config.crawl.navigation_timeout_ms
    );
    println!(
        "  Max download attempts: {}",
        config.crawl.max_download_attempts
    );
    println!("  Retry backoff: {}ms", config.crawl.retry_backoff_ms);
    println!("  User agent: {}", config.crawl.user_agent);

    println!("\nOutput:");
    println!("  Root: {}", config.output.root);

    println!(
        "\nIgnored Hosts ({}):",
        config.filters.ignored_hosts.len()
    );
    for host in &config.filters.ignored_hosts {
        println!("  - {}", host);
    }

    println!("\nAsset Extensions ({}):", config.assets.extensions.len());
    println!("  {}", config.assets.extensions.join(", "));

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling from {}", config.crawl.seed_url);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: sitescribe::config::Config) -> Result<()> {
    tracing::info!("Starting crawl from {}", config.crawl.seed_url);
    tracing::info!(
        "Ignored hosts: {}, Asset extensions: {}",
        config.filters.ignored_hosts.len(),
        config.assets.extensions.len()
    );

    match crawl(&config).await {
        Ok(stats) => {
            tracing::info!(
                "Crawl completed: {} pages archived, {} assets downloaded, {} failed, {} skipped",
                stats.pages_visited,
                stats.assets_downloaded,
                stats.urls_failed,
                stats.urls_skipped
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
