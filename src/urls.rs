//! URL helpers: normalization, same-site scoping, and document routing
//!
//! Normalized URL strings are the keys of the crawler's visited set, so the
//! normalization here decides what counts as "the same page".

use thiserror::Error;
use url::Url;

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Unsupported URL scheme: {0}")]
    InvalidScheme(String),
}

/// Normalizes a URL for frontier and visited-set bookkeeping
///
/// Parses the URL, accepts only http/https, and drops the fragment (two
/// references differing only in `#anchor` are the same page).
pub fn normalize_url(raw: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(raw).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    url.set_fragment(None);

    Ok(url)
}

/// Same-site scope check: substring containment of the configured base URL.
///
/// Known approximation: a URL that embeds the base URL anywhere in its
/// string form (for example inside a query parameter on another host) is
/// also admitted. Kept for compatibility with the original crawl footprint.
pub fn in_scope(url: &Url, base_url: &str) -> bool {
    url.as_str().contains(base_url)
}

/// Returns true if the URL's path names a PDF document
///
/// The check is a case-insensitive `.pdf` path-suffix test; query strings
/// and fragments do not participate.
pub fn is_pdf_url(url: &Url) -> bool {
    url.path().to_ascii_lowercase().ends_with(".pdf")
}
