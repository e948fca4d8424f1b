use serde::Deserialize;

/// Main configuration structure for vademecum
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Base URL of the target site; crawling is scoped to URLs containing it
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum number of URLs to visit in one run (page budget)
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,
}

/// Text segmentation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum chunk size in characters
    #[serde(rename = "chunk-size", default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Character overlap between consecutive chunks of one section
    #[serde(rename = "chunk-overlap", default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

/// Embedding service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    /// Embedding model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the embedding service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

/// Vector index persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the index database; created if absent
    #[serde(rename = "persist-directory", default = "default_persist_directory")]
    pub persist_directory: String,
}

fn default_max_pages() -> u32 {
    250
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}

fn default_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_persist_directory() -> String {
    "./data/index".to_string()
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            persist_directory: default_persist_directory(),
        }
    }
}
