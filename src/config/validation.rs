use crate::config::types::{ChunkingConfig, Config, CrawlConfig, EmbeddingConfig, StorageConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
///
/// Every violation is fatal: the process must exit before attempting any
/// network call.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_chunking_config(&config.chunking)?;
    validate_embedding_config(&config.embedding)?;
    validate_storage_config(&config.storage)?;
    Ok(())
}

/// Validates crawl configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use the http or https scheme, got '{}'",
            url.scheme()
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    Ok(())
}

/// Validates chunking configuration
fn validate_chunking_config(config: &ChunkingConfig) -> Result<(), ConfigError> {
    if config.chunk_size < 1 {
        return Err(ConfigError::Validation(format!(
            "chunk-size must be >= 1, got {}",
            config.chunk_size
        )));
    }

    if config.chunk_overlap >= config.chunk_size {
        return Err(ConfigError::Validation(format!(
            "chunk-overlap ({}) must be smaller than chunk-size ({})",
            config.chunk_overlap, config.chunk_size
        )));
    }

    Ok(())
}

/// Validates embedding service configuration
fn validate_embedding_config(config: &EmbeddingConfig) -> Result<(), ConfigError> {
    if config.model.is_empty() {
        return Err(ConfigError::Validation(
            "embedding model cannot be empty".to_string(),
        ));
    }

    if config.endpoint.is_empty() {
        return Err(ConfigError::Validation(
            "embedding endpoint cannot be empty".to_string(),
        ));
    }

    Url::parse(&config.endpoint).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid embedding endpoint '{}': {}", config.endpoint, e))
    })?;

    Ok(())
}

/// Validates storage configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.persist_directory.is_empty() {
        return Err(ConfigError::Validation(
            "persist-directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}
