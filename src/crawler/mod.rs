//! Breadth-first crawling of the target site
//!
//! This module contains the core crawling logic:
//! - HTTP fetching with tagged outcomes (no retries)
//! - FIFO frontier with visited-set de-duplication
//! - Overall crawl coordination and progress reporting

mod coordinator;
mod fetcher;
mod frontier;

pub use coordinator::{CrawlProgress, CrawlReport, Crawler, LogProgress, SilentProgress};
pub use fetcher::{
    build_http_client, fetch_document, fetch_page, FetchOutcome, DOCUMENT_TIMEOUT, PAGE_TIMEOUT,
    USER_AGENT,
};
pub use frontier::Frontier;
