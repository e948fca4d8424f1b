//! Persistent vector index
//!
//! This module defines the storage boundary of the pipeline: a trait over
//! vector-index backends plus the SQLite implementation used in
//! production. Entries live until explicitly cleared.

mod schema;
mod sqlite;

pub use sqlite::SqliteVectorStore;

use crate::chunk::{Chunk, ChunkMetadata};
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Vector extension error: {0}")]
    Extension(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt stored row: {0}")]
    Corrupt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// An entry persisted in the vector index
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub vector: Vec<f32>,
    pub chunk: Chunk,
}

/// A similarity-search hit
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub text: String,
    pub metadata: ChunkMetadata,
    /// Cosine distance to the query vector; smaller is closer
    pub distance: f32,
}

/// Trait for vector index backends
///
/// Implementations persist `{vector, text, metadata}` entries under
/// store-assigned identifiers and answer nearest-neighbor queries ordered
/// by ascending distance.
pub trait VectorStore {
    /// Inserts entries into the index
    fn add(&mut self, entries: &[IndexEntry]) -> StoreResult<()>;

    /// Returns the `k` entries nearest to `vector`, closest first
    fn query(&self, vector: &[f32], k: usize) -> StoreResult<Vec<SearchHit>>;

    /// Total number of stored entries
    fn count(&self) -> StoreResult<u64>;

    /// Removes every stored entry, returning how many were removed
    fn clear(&mut self) -> StoreResult<u64>;
}

/// Status of an ingest run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Completed,
}

impl RunStatus {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Bookkeeping record for one ingest run
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub id: i64,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub config_hash: String,
    pub status: RunStatus,
    pub pages_visited: u64,
    pub documents_collected: u64,
    pub chunks_stored: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_status_roundtrip() {
        for status in &[RunStatus::Running, RunStatus::Completed] {
            let db_str = status.to_db_string();
            assert_eq!(RunStatus::from_db_string(db_str), Some(*status));
        }
    }

    #[test]
    fn test_run_status_invalid() {
        assert_eq!(RunStatus::from_db_string("invalid"), None);
    }
}
