//! Vademecum main entry point
//!
//! Command-line interface for the manual ingestion pipeline: crawl an
//! institutional site, chunk its text, and store embeddings in a local
//! vector index.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vademecum::config::load_config_with_hash;
use vademecum::output::{load_statistics, print_statistics, print_summary};
use vademecum::pipeline::run_ingest;
use vademecum::store::SqliteVectorStore;

/// Vademecum: ingest an institutional manual into a vector index
///
/// Crawls the configured site breadth-first, extracts HTML and PDF text,
/// splits it into bounded chunks, and stores their embeddings for
/// retrieval. Runs as a batch job and terminates.
#[derive(Parser, Debug)]
#[command(name = "vademecum")]
#[command(version = "1.0.0")]
#[command(about = "Institutional-manual ingestion pipeline", long_about = None)]
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

    /// Clear previously stored chunks before ingesting
    #[arg(long, conflicts_with_all = ["dry_run", "stats"])]
    fresh: bool,

    /// Validate config and show what would be ingested without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the index and exit
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_ingest(&config, &config_hash, cli.fresh).await?;
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("vademecum=info,warn"),
            1 => EnvFilter::new("vademecum=debug,info"),
            2 => EnvFilter::new("vademecum=trace,debug"),
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

/// Handles the --dry-run mode: shows what an ingest would do
fn handle_dry_run(config: &vademecum::Config) {
    println!("=== Vademecum Dry Run ===\n");

    println!("Crawl:");
    println!("  Base URL: {}", config.crawl.base_url);
    println!("  Page budget: {}", config.crawl.max_pages);

    println!("\nChunking:");
    println!("  Chunk size: {} chars", config.chunking.chunk_size);
    println!("  Chunk overlap: {} chars", config.chunking.chunk_overlap);

    println!("\nEmbedding:");
    println!("  Model: {}", config.embedding.model);
    println!("  Endpoint: {}", config.embedding.endpoint);

    println!("\nStorage:");
    println!("  Persist directory: {}", config.storage.persist_directory);

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl up to {} pages from {}", config.crawl.max_pages, config.crawl.base_url);
}

/// Handles the --stats mode: shows statistics from the index
fn handle_stats(config: &vademecum::Config) -> anyhow::Result<()> {
    use std::path::Path;

    println!("Index: {}\n", config.storage.persist_directory);

    let store = SqliteVectorStore::open(Path::new(&config.storage.persist_directory))?;
    let stats = load_statistics(&store)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main ingest operation
async fn handle_ingest(
    config: &vademecum::Config,
    config_hash: &str,
    fresh: bool,
) -> anyhow::Result<()> {
    if fresh {
        tracing::info!("Starting fresh ingest (clearing existing chunks)");
    } else {
        tracing::info!("Starting ingest (appending to existing index)");
    }

    let summary = run_ingest(config, config_hash, fresh).await?;

    println!();
    print_summary(&summary);

    Ok(())
}
