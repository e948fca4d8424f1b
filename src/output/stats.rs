//! Statistics generation and summary printing
//!
//! The ingest summary is what the operator sees at the end of a run; the
//! index statistics back the `--stats` mode.

use crate::store::{RunRecord, SqliteVectorStore, StoreResult, VectorStore};

/// Final counters of one ingest run
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestSummary {
    /// URLs dequeued and fetched, successfully or not
    pub pages_visited: u64,

    /// URLs that failed to fetch or extract
    pub pages_failed: u64,

    /// Raw documents handed to segmentation
    pub documents_collected: u64,

    /// Chunks embedded and persisted
    pub chunks_stored: u64,

    /// Chunks dropped below the viability threshold
    pub chunks_dropped: u64,

    /// Chunks skipped after embedding or store failures
    pub chunks_failed: u64,
}

/// Index statistics for the `--stats` mode
#[derive(Debug, Clone)]
pub struct IndexStatistics {
    /// Total entries in the vector index
    pub chunk_count: u64,

    /// Most recent ingest runs, newest first
    pub recent_runs: Vec<RunRecord>,
}

/// Loads statistics from the store
pub fn load_statistics(store: &SqliteVectorStore) -> StoreResult<IndexStatistics> {
    let chunk_count = store.count()?;
    let recent_runs = store.recent_runs(5)?;

    Ok(IndexStatistics {
        chunk_count,
        recent_runs,
    })
}

/// Prints the final summary of an ingest run
pub fn print_summary(summary: &IngestSummary) {
    println!("=== Ingest Summary ===\n");
    println!("Crawl:");
    println!("  Pages visited: {}", summary.pages_visited);
    println!("  Pages failed: {}", summary.pages_failed);
    println!("  Documents collected: {}", summary.documents_collected);
    println!();
    println!("Index:");
    println!("  Chunks stored: {}", summary.chunks_stored);
    println!("  Chunks dropped (too short): {}", summary.chunks_dropped);
    println!("  Chunks failed (embed/store): {}", summary.chunks_failed);
}

/// Prints index statistics to stdout
pub fn print_statistics(stats: &IndexStatistics) {
    println!("=== Index Statistics ===\n");
    println!("Stored chunks: {}", stats.chunk_count);
    println!();

    if stats.recent_runs.is_empty() {
        println!("No recorded runs.");
        return;
    }

    println!("Recent runs:");
    for run in &stats.recent_runs {
        println!(
            "  #{} [{}] started {}: {} pages, {} documents, {} chunks",
            run.id,
            run.status.to_db_string(),
            run.started_at,
            run.pages_visited,
            run.documents_collected,
            run.chunks_stored
        );
    }
}
