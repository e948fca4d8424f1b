//! PDF extraction via a scoped temporary file
//!
//! Downloaded PDF bytes are staged in a temporary file, parsed page by
//! page, and the temp file is removed again on every exit path (the
//! `NamedTempFile` guard deletes it on drop, success or failure alike).

use crate::extract::{DocType, RawDocument};
use lopdf::Document;
use std::io::Write;
use tempfile::NamedTempFile;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF parse error: {0}")]
    Parse(#[from] lopdf::Error),
}

/// Extracts the text of a downloaded PDF
///
/// Page texts are concatenated in page order with newline separators.
/// The title defaults to the final path segment of the URL. Any failure
/// (corrupt file, unreadable page) yields `None` and is never fatal to
/// the crawl; the URL simply contributes no document.
pub fn parse_pdf(bytes: &[u8], url: &Url) -> Option<RawDocument> {
    match extract_text(bytes) {
        Ok(body) => Some(RawDocument {
            url: url.clone(),
            title: title_from_url(url),
            body,
            doc_type: DocType::Pdf,
        }),
        Err(error) => {
            tracing::warn!("Failed to extract PDF {}: {}", url, error);
            None
        }
    }
}

fn extract_text(bytes: &[u8]) -> Result<String, PdfError> {
    let mut staged = NamedTempFile::new()?;
    staged.write_all(bytes)?;
    staged.flush()?;

    let document = Document::load(staged.path())?;

    let mut pages = Vec::new();
    for page_number in document.get_pages().keys() {
        pages.push(document.extract_text(&[*page_number])?);
    }

    Ok(pages.join("\n"))
}

/// Derives a display title from the URL's final path segment
fn title_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.last())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| url.host_str().unwrap_or("document").to_string())
}
