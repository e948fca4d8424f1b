//! Text segmentation: section splitting and size-bounded chunking
//!
//! A raw document first becomes an ordered list of candidate sections cut
//! at numbered-heading boundaries, then every oversize section is
//! subdivided into overlapping chunks no larger than the configured size.

mod sections;
mod splitter;

pub use sections::split_sections;
pub use splitter::split_text;

use crate::extract::{DocType, RawDocument};
use url::Url;

/// Sections shorter than this are discarded as bare headings with no body
pub const MIN_SECTION_CHARS: usize = 100;

/// Provenance shared by every section and chunk of one document
#[derive(Debug, Clone)]
pub struct DocumentMeta {
    pub url: Url,
    pub title: String,
    pub doc_type: DocType,
}

impl DocumentMeta {
    /// Copies the provenance fields out of a raw document
    pub fn of(document: &RawDocument) -> Self {
        Self {
            url: document.url.clone(),
            title: document.title.clone(),
            doc_type: document.doc_type,
        }
    }
}

/// A semantically-delimited span of a document's text, prior to
/// size-based subdivision
#[derive(Debug, Clone)]
pub struct CandidateSection {
    pub text: String,
    pub source: DocumentMeta,
}

/// Metadata carried by every stored chunk
#[derive(Debug, Clone)]
pub struct ChunkMetadata {
    pub url: Url,
    pub title: String,
    pub doc_type: DocType,
    /// Position of this chunk within its document
    pub ordinal: usize,
}

/// A bounded-size piece of text plus metadata; the unit sent to the indexer
#[derive(Debug, Clone)]
pub struct Chunk {
    pub text: String,
    pub metadata: ChunkMetadata,
}

/// Segments one document into its final chunks
///
/// Sections are cut at heading boundaries, oversize sections are
/// subdivided with `chunk_overlap` characters of shared context, and
/// ordinals number the document's chunks consecutively across sections.
pub fn chunk_document(
    document: &RawDocument,
    chunk_size: usize,
    chunk_overlap: usize,
) -> Vec<Chunk> {
    let sections = split_sections(document, MIN_SECTION_CHARS);

    let mut chunks = Vec::new();
    for section in &sections {
        for text in split_text(&section.text, chunk_size, chunk_overlap) {
            let ordinal = chunks.len();
            chunks.push(Chunk {
                text,
                metadata: ChunkMetadata {
                    url: section.source.url.clone(),
                    title: section.source.title.clone(),
                    doc_type: section.source.doc_type,
                    ordinal,
                },
            });
        }
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(body: &str) -> RawDocument {
        RawDocument {
            url: Url::parse("https://example.org/manual/page").unwrap(),
            title: "Policy".to_string(),
            body: body.to_string(),
            doc_type: DocType::Html,
        }
    }

    #[test]
    fn test_empty_document_produces_no_chunks() {
        assert!(chunk_document(&document(""), 1000, 200).is_empty());
        assert!(chunk_document(&document("   \n  "), 1000, 200).is_empty());
    }

    #[test]
    fn test_ordinals_are_consecutive_across_sections() {
        let body = format!(
            "1. First\n{}\n2. Second\n{}",
            "a".repeat(150),
            "b".repeat(2500)
        );
        let chunks = chunk_document(&document(&body), 1000, 200);

        assert!(chunks.len() >= 3, "expected several chunks, got {}", chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.metadata.ordinal, index);
        }
    }

    #[test]
    fn test_numbered_body_with_oversize_section() {
        // Section "1." is 60 characters, below the viability threshold;
        // section "2." is 1511 characters and must be split with overlap.
        let body = format!("1. Intro\n{}\n2. Details\n{}", "x".repeat(50), "y".repeat(1500));
        let chunks = chunk_document(&document(&body), 1000, 200);

        assert!(chunks.len() >= 2);
        assert!(chunks.iter().all(|c| c.text.chars().count() <= 1000));
        assert!(chunks.iter().all(|c| c.text.starts_with("2.") || c.text.contains('y')));

        // Every y must be covered, counting the overlap region once
        let total_ys: usize = chunks
            .iter()
            .map(|c| c.text.chars().filter(|&ch| ch == 'y').count())
            .sum();
        let overlap_ys = 200 * (chunks.len() - 1);
        assert_eq!(total_ys - overlap_ys, 1500);
    }

    #[test]
    fn test_metadata_carries_provenance() {
        let body = format!("1. Rule\n{}", "z".repeat(300));
        let chunks = chunk_document(&document(&body), 1000, 200);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].metadata.title, "Policy");
        assert_eq!(chunks[0].metadata.doc_type, DocType::Html);
        assert_eq!(
            chunks[0].metadata.url.as_str(),
            "https://example.org/manual/page"
        );
    }
}
