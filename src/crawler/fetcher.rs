//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the long-lived HTTP client with a constant user agent
//! - GET requests for pages and documents with per-request timeouts
//! - Error classification into tagged outcomes
//!
//! There is no retry logic. A failed fetch marks that node of the crawl
//! graph as a dead end; the coordinator decides whether to skip or abort.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Constant identifying user agent sent with every request
pub const USER_AGENT: &str = "vademecum/1.0 (manual ingestion bot)";

/// Timeout for HTML page fetches
pub const PAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for document (PDF) downloads
pub const DOCUMENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// 2xx response with its payload
    Success {
        /// HTTP status code
        status: u16,
        /// Content-Type header value (empty if absent)
        content_type: String,
        /// Response body bytes
        body: Vec<u8>,
    },

    /// Non-2xx HTTP status
    HttpStatus {
        /// The HTTP status code
        status: u16,
    },

    /// Request exceeded its deadline
    Timeout,

    /// Connection-level failure (refused, DNS, TLS, aborted body)
    Network {
        /// Error description
        error: String,
    },
}

impl FetchOutcome {
    /// Returns true for a 2xx outcome
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Short human-readable description, used in failure diagnostics
    pub fn describe(&self) -> String {
        match self {
            Self::Success { status, .. } => format!("HTTP {}", status),
            Self::HttpStatus { status } => format!("HTTP {}", status),
            Self::Timeout => "request timeout".to_string(),
            Self::Network { error } => format!("network error: {}", error),
        }
    }
}

/// Builds the long-lived HTTP client injected into the crawler
///
/// The client carries the constant user agent and is reused for every
/// request so connections can be pooled.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches an HTML page with the page timeout
pub async fn fetch_page(client: &Client, url: &Url) -> FetchOutcome {
    fetch(client, url, PAGE_TIMEOUT).await
}

/// Fetches a linked document (PDF) with the longer download timeout
pub async fn fetch_document(client: &Client, url: &Url) -> FetchOutcome {
    fetch(client, url, DOCUMENT_TIMEOUT).await
}

async fn fetch(client: &Client, url: &Url, timeout: Duration) -> FetchOutcome {
    let response = match client.get(url.clone()).timeout(timeout).send().await {
        Ok(response) => response,
        Err(error) => return classify_error(error),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::HttpStatus {
            status: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();

    match response.bytes().await {
        Ok(bytes) => FetchOutcome::Success {
            status: status.as_u16(),
            content_type,
            body: bytes.to_vec(),
        },
        Err(error) => classify_error(error),
    }
}

/// Classifies a reqwest error into the outcome taxonomy
fn classify_error(error: reqwest::Error) -> FetchOutcome {
    if error.is_timeout() {
        FetchOutcome::Timeout
    } else {
        FetchOutcome::Network {
            error: error.to_string(),
        }
    }
}
