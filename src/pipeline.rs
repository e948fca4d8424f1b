//! End-to-end ingest pipeline: crawl, segment, embed, store
//!
//! This is the composition root. The crawler and indexer are generic over
//! their collaborators; here the concrete services for a production run
//! are wired together: one HTTP client, the Ollama embedder, and the
//! SQLite vector store.

use crate::chunk::chunk_document;
use crate::config::Config;
use crate::crawler::{build_http_client, Crawler, LogProgress};
use crate::embed::OllamaEmbedder;
use crate::index::Indexer;
use crate::output::IngestSummary;
use crate::store::{SqliteVectorStore, VectorStore};
use crate::Result;
use std::path::Path;

/// Runs a complete ingest: crawl the site, segment the documents, embed
/// the chunks, and persist them
///
/// The store is opened before any network activity so an unreachable
/// index database fails fast as a configuration error. With `fresh`, all
/// previously stored chunks are removed first.
pub async fn run_ingest(config: &Config, config_hash: &str, fresh: bool) -> Result<IngestSummary> {
    let mut store = SqliteVectorStore::open(Path::new(&config.storage.persist_directory))?;

    if fresh {
        let removed = store.clear()?;
        tracing::info!("Cleared {} previously stored chunks", removed);
    }

    let run_id = store.begin_run(config_hash)?;

    let client = build_http_client()?;
    let embedder = OllamaEmbedder::new(
        client.clone(),
        &config.embedding.endpoint,
        &config.embedding.model,
    );

    let progress = LogProgress;
    let crawler = Crawler::new(&config.crawl, client, &progress);
    let (documents, crawl_report) = crawler.run().await?;

    let mut chunks = Vec::new();
    for document in &documents {
        chunks.extend(chunk_document(
            document,
            config.chunking.chunk_size,
            config.chunking.chunk_overlap,
        ));
    }
    tracing::info!(
        "Segmented {} documents into {} chunks",
        documents.len(),
        chunks.len()
    );

    let mut indexer = Indexer::new(&embedder, &mut store);
    let index_report = indexer.store_chunks(chunks).await;

    let summary = IngestSummary {
        pages_visited: crawl_report.pages_visited as u64,
        pages_failed: crawl_report.pages_failed as u64,
        documents_collected: crawl_report.documents_collected as u64,
        chunks_stored: index_report.stored,
        chunks_dropped: index_report.dropped,
        chunks_failed: index_report.failed,
    };

    store.finish_run(run_id, &summary)?;

    Ok(summary)
}
