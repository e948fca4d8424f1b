//! Embedding service boundary
//!
//! The embedding model is an opaque collaborator: text in, fixed-length
//! vector out. The trait keeps the pipeline pluggable so tests (and future
//! deployments) can swap the service without touching the indexer.

mod ollama;

pub use ollama::OllamaEmbedder;

use async_trait::async_trait;
use thiserror::Error;

/// Embedding-specific errors
#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("Embedding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Embedding service error: {0}")]
    Api(String),

    #[error("Malformed embedding response: {0}")]
    Shape(String),
}

/// A text-embedding service
///
/// Implementations must be idempotent: the same text yields the same
/// vector. Individual calls may fail transiently; the caller decides
/// whether to skip or abort.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;
}
