//! Ollama embedding client
//!
//! Talks to a local Ollama server's `/api/embeddings` endpoint. The model
//! identifier comes from configuration (`nomic-embed-text` by default).

use crate::embed::{EmbedError, Embedder};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

/// Embedder backed by an Ollama HTTP endpoint
pub struct OllamaEmbedder {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaEmbedder {
    /// Creates a new Ollama embedder
    ///
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client
    /// * `endpoint` - Base URL of the Ollama server, e.g. `http://localhost:11434`
    /// * `model` - Embedding model identifier
    pub fn new(client: Client, endpoint: &str, model: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let url = format!("{}/api/embeddings", self.endpoint);

        let response = self
            .client
            .post(&url)
            .json(&EmbeddingsRequest {
                model: &self.model,
                prompt: text,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmbedError::Api(format!("HTTP {} from {}", status, url)));
        }

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| EmbedError::Shape(e.to_string()))?;

        if parsed.embedding.is_empty() {
            return Err(EmbedError::Shape("empty embedding vector".to_string()));
        }

        Ok(parsed.embedding)
    }
}
