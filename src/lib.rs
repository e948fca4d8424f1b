//! Vademecum: an institutional-manual ingestion pipeline
//!
//! This crate crawls an institutional website (HTML pages and the PDFs they
//! link to), extracts and segments their text, embeds the resulting chunks,
//! and persists them in a vector index for later similarity search by a
//! question-answering front end.

pub mod chunk;
pub mod config;
pub mod crawler;
pub mod embed;
pub mod extract;
pub mod index;
pub mod output;
pub mod pipeline;
pub mod store;
pub mod urls;

use thiserror::Error;

/// Main error type for vademecum operations
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] urls::UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Embedding error: {0}")]
    Embed(#[from] embed::EmbedError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for vademecum operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use chunk::{CandidateSection, Chunk, ChunkMetadata};
pub use config::Config;
pub use extract::{DocType, RawDocument};
