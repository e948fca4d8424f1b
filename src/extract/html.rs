//! HTML extraction: page content and outbound links
//!
//! Content extraction is tied to the target site's page template: the text
//! lives in the `entry-header` and `entry-content` regions. Pages without
//! either region yield an empty body.

use crate::extract::{DocType, RawDocument};
use crate::urls::in_scope;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Sentinel title for pages without a `<title>` element
const TITLE_FALLBACK: &str = "untitled";

/// Structural markers of the site template's content regions, in reading order
const CONTENT_REGION_SELECTORS: &[&str] = &["div.entry-header", "div.entry-content"];

/// Extracts a page's title and body text
///
/// The body is the text of the content regions: text nodes are trimmed,
/// empty ones discarded, and the rest joined with single spaces; the
/// regions themselves are joined the same way. A page with no recognized
/// region yields an empty body and is dropped downstream.
pub fn parse_page(page: &str, url: &Url) -> RawDocument {
    let document = Html::parse_document(page);

    let title = extract_title(&document).unwrap_or_else(|| TITLE_FALLBACK.to_string());
    let body = extract_body(&document);

    RawDocument {
        url: url.clone(),
        title,
        body,
        doc_type: DocType::Html,
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Concatenates the text of the configured content regions
fn extract_body(document: &Html) -> String {
    let mut regions = Vec::new();

    for selector in CONTENT_REGION_SELECTORS {
        let Ok(selector) = Selector::parse(selector) else {
            continue;
        };
        for element in document.select(&selector) {
            let text = element
                .text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            if !text.is_empty() {
                regions.push(text);
            }
        }
    }

    regions.join(" ")
}

/// Extracts every in-scope hyperlink from an HTML page
///
/// Each `<a href>` is resolved to an absolute URL against `page_url`.
/// Only URLs whose string form contains `base_url` are kept (same-site
/// scoping by substring; see [`crate::urls::in_scope`]). The result is
/// de-duplicated, preserving first-seen order.
pub fn extract_links(page: &str, page_url: &Url, base_url: &str) -> Vec<Url> {
    let document = Html::parse_document(page);

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(resolved) = resolve_link(href, page_url) else {
            continue;
        };
        if !in_scope(&resolved, base_url) {
            continue;
        }
        if seen.insert(resolved.as_str().to_string()) {
            links.push(resolved);
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None for links that should be excluded:
/// - javascript:, mailto:, tel:, data: schemes
/// - fragment-only links (same page anchors)
/// - invalid URLs and non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, page_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match page_url.join(href) {
        Ok(mut absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                absolute_url.set_fragment(None);
                Some(absolute_url)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
