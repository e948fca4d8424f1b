//! Document extraction from fetched HTML and PDF payloads

pub mod html;
pub mod pdf;

use std::fmt;
use url::Url;

/// Kind of source document a text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocType {
    Html,
    Pdf,
}

impl DocType {
    /// Stable string form used in metadata and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Pdf => "pdf",
        }
    }

    /// Parses the stable string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "html" => Some(Self::Html),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A document's extracted text plus provenance
///
/// Immutable once created; owned by the crawler until handed to the
/// section splitter.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub url: Url,
    pub title: String,
    pub body: String,
    pub doc_type: DocType,
}

impl RawDocument {
    /// True when no usable text was extracted
    ///
    /// Empty documents are collected but must never produce chunks.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_type_roundtrip() {
        for doc_type in [DocType::Html, DocType::Pdf] {
            assert_eq!(DocType::parse(doc_type.as_str()), Some(doc_type));
        }
        assert_eq!(DocType::parse("docx"), None);
    }

    #[test]
    fn test_empty_document() {
        let document = RawDocument {
            url: Url::parse("https://example.org/").unwrap(),
            title: "untitled".to_string(),
            body: "  \n ".to_string(),
            doc_type: DocType::Html,
        };
        assert!(document.is_empty());
    }
}
