//! Section splitter for numbered policy documents
//!
//! Boundaries are positions where a line starts with a numeric heading
//! marker (`4. ` or `4.2. `). This is a heuristic recognizer for numbered
//! policy-document structure, not a generic sentence splitter. Boundaries
//! are split points, never deletions: before the minimum-length filter,
//! concatenating the sections reconstructs the input.

use crate::chunk::{CandidateSection, DocumentMeta};
use crate::extract::RawDocument;
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a numbered heading marker at the start of a line: `7. ` or `7.3. `
static HEADING_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\d+\.(?:\d+\.)? ").expect("static heading pattern"));

/// Splits a document's body into candidate sections
///
/// Sections shorter than `min_chars` characters are discarded as likely
/// bare headings with no body. An empty document yields no sections.
pub fn split_sections(document: &RawDocument, min_chars: usize) -> Vec<CandidateSection> {
    let body = document.body.as_str();
    if body.trim().is_empty() {
        return Vec::new();
    }

    let source = DocumentMeta::of(document);

    let mut boundaries = vec![0];
    for found in HEADING_PATTERN.find_iter(body) {
        // A heading at the very start of the body opens the first section
        // rather than splitting one off
        if found.start() > 0 {
            boundaries.push(found.start());
        }
    }
    boundaries.push(body.len());

    let mut sections = Vec::new();
    for window in boundaries.windows(2) {
        let text = &body[window[0]..window[1]];
        if text.chars().count() < min_chars {
            continue;
        }
        sections.push(CandidateSection {
            text: text.to_string(),
            source: source.clone(),
        });
    }

    sections
}
