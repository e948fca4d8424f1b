//! Chunk indexing: embed and persist
//!
//! The indexer is parameterized over the embedding service and the vector
//! store so the pipeline, not the indexer, decides which concrete services
//! back a run. Per-chunk failures are isolated: one bad embedding call
//! never aborts the batch.

use crate::chunk::Chunk;
use crate::embed::Embedder;
use crate::store::{IndexEntry, VectorStore};

/// Chunks whose trimmed text is shorter than this carry no retrievable
/// signal and are dropped before embedding
pub const MIN_CHUNK_CHARS: usize = 50;

/// Outcome counters for one indexing batch
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexReport {
    /// Entries successfully embedded and persisted
    pub stored: u64,

    /// Chunks dropped below the viability threshold
    pub dropped: u64,

    /// Chunks skipped after an embedding or store failure
    pub failed: u64,
}

/// Converts chunks into persisted vector-index entries
pub struct Indexer<'a, E: Embedder + ?Sized, S: VectorStore> {
    embedder: &'a E,
    store: &'a mut S,
}

impl<'a, E: Embedder + ?Sized, S: VectorStore> Indexer<'a, E, S> {
    /// Creates a new indexer over the given services
    pub fn new(embedder: &'a E, store: &'a mut S) -> Self {
        Self { embedder, store }
    }

    /// Embeds and stores a batch of chunks
    ///
    /// Below-threshold chunks are dropped. A failed embedding call or
    /// insert logs the chunk and skips it; the returned report counts only
    /// successes as stored.
    pub async fn store_chunks(&mut self, chunks: Vec<Chunk>) -> IndexReport {
        let mut report = IndexReport::default();

        for chunk in chunks {
            if chunk.text.trim().chars().count() < MIN_CHUNK_CHARS {
                report.dropped += 1;
                continue;
            }

            let vector = match self.embedder.embed(&chunk.text).await {
                Ok(vector) => vector,
                Err(error) => {
                    tracing::warn!(
                        "Embedding failed for chunk {} of {}: {}",
                        chunk.metadata.ordinal,
                        chunk.metadata.url,
                        error
                    );
                    report.failed += 1;
                    continue;
                }
            };

            let entry = IndexEntry { vector, chunk };
            if let Err(error) = self.store.add(std::slice::from_ref(&entry)) {
                tracing::warn!(
                    "Store insert failed for chunk {} of {}: {}",
                    entry.chunk.metadata.ordinal,
                    entry.chunk.metadata.url,
                    error
                );
                report.failed += 1;
                continue;
            }

            report.stored += 1;
        }

        report
    }
}
