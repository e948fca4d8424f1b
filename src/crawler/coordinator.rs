//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the breadth-first crawl loop that:
//! - Seeds and drains the FIFO frontier under the page budget
//! - Routes each URL to the HTML or PDF extractor
//! - Harvests in-scope links from HTML pages to extend the frontier
//! - Inserts a fixed politeness delay after every visit
//! - Isolates per-URL failures so a single bad page never halts the run

use crate::config::CrawlConfig;
use crate::crawler::fetcher::{fetch_document, fetch_page, FetchOutcome};
use crate::crawler::frontier::Frontier;
use crate::extract::{html, pdf, RawDocument};
use crate::urls::{is_pdf_url, normalize_url};
use crate::IngestError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Fixed delay inserted after every visited URL, regardless of outcome
const POLITENESS_DELAY: Duration = Duration::from_millis(500);

/// Progress counters are reported every this many visited URLs
const PROGRESS_INTERVAL: usize = 10;

/// Observer for crawl progress
///
/// Purely operational visibility; implementations must not influence the
/// traversal. The default methods do nothing, so tests can plug in a
/// no-op collaborator.
pub trait CrawlProgress {
    /// Called every few visited URLs with the running counters
    fn on_progress(&self, pages_visited: usize, documents_collected: usize) {
        let _ = (pages_visited, documents_collected);
    }

    /// Called when a URL is abandoned after a fetch or extract failure
    fn on_failure(&self, url: &Url, reason: &str) {
        let _ = (url, reason);
    }
}

/// Default progress sink: one tracing line per report
pub struct LogProgress;

impl CrawlProgress for LogProgress {
    fn on_progress(&self, pages_visited: usize, documents_collected: usize) {
        tracing::info!(
            "Progress: {} pages visited, {} documents collected",
            pages_visited,
            documents_collected
        );
    }

    fn on_failure(&self, url: &Url, reason: &str) {
        tracing::warn!("Skipping {}: {}", url, reason);
    }
}

/// Silent progress sink for tests
pub struct SilentProgress;

impl CrawlProgress for SilentProgress {}

/// Counters accumulated over one crawl run
#[derive(Debug, Clone, Copy, Default)]
pub struct CrawlReport {
    /// URLs dequeued and fetched, successfully or not
    pub pages_visited: usize,

    /// URLs whose fetch or extraction failed
    pub pages_failed: usize,

    /// Raw documents handed to the segmentation stage
    pub documents_collected: usize,
}

/// Breadth-first crawler over one target site
///
/// Owns the frontier for the duration of a run. Execution is sequential:
/// one URL is fetched at a time and the politeness delay already bounds the
/// request rate, so there is no concurrent fan-out.
pub struct Crawler<'a> {
    config: &'a CrawlConfig,
    client: Client,
    progress: &'a dyn CrawlProgress,
}

impl<'a> Crawler<'a> {
    /// Creates a new crawler
    ///
    /// # Arguments
    ///
    /// * `config` - Crawl scope and page budget
    /// * `client` - The long-lived HTTP client (injected, never rebuilt)
    /// * `progress` - Progress observer; use [`SilentProgress`] in tests
    pub fn new(config: &'a CrawlConfig, client: Client, progress: &'a dyn CrawlProgress) -> Self {
        Self {
            config,
            client,
            progress,
        }
    }

    /// Runs the crawl to completion
    ///
    /// Terminates when the frontier is empty or the page budget is reached,
    /// whichever comes first. Returns the collected raw documents in visit
    /// order along with the run counters.
    pub async fn run(&self) -> Result<(Vec<RawDocument>, CrawlReport), IngestError> {
        let seed = normalize_url(&self.config.base_url)?;
        let budget = self.config.max_pages as usize;

        let mut frontier = Frontier::new();
        frontier.enqueue(seed);

        let mut documents = Vec::new();
        let mut report = CrawlReport::default();

        tracing::info!(
            "Starting crawl at {} (budget: {} pages)",
            self.config.base_url,
            budget
        );

        while report.pages_visited < budget {
            let Some(url) = frontier.dequeue() else {
                tracing::info!("Frontier is empty, crawl complete");
                break;
            };
            report.pages_visited += 1;

            tracing::debug!("Visiting {}", url);

            if is_pdf_url(&url) {
                self.visit_pdf(&url, &mut documents, &mut report).await;
            } else {
                self.visit_page(&url, &mut frontier, &mut documents, &mut report)
                    .await;
            }

            // Fixed pause so we never hammer the target server
            tokio::time::sleep(POLITENESS_DELAY).await;

            if report.pages_visited % PROGRESS_INTERVAL == 0 {
                self.progress.on_progress(report.pages_visited, documents.len());
            }
        }

        report.documents_collected = documents.len();

        tracing::info!(
            "Crawl finished: {} pages visited ({} failed), {} documents collected, {} URLs left pending",
            report.pages_visited,
            report.pages_failed,
            report.documents_collected,
            frontier.pending()
        );

        Ok((documents, report))
    }

    /// Fetches an HTML page, harvests its links, and collects its document
    ///
    /// An empty document (no recognized content regions) is still collected;
    /// the segmentation stage drops it without producing chunks.
    async fn visit_page(
        &self,
        url: &Url,
        frontier: &mut Frontier,
        documents: &mut Vec<RawDocument>,
        report: &mut CrawlReport,
    ) {
        match fetch_page(&self.client, url).await {
            FetchOutcome::Success { body, .. } => {
                let page = String::from_utf8_lossy(&body);

                for link in html::extract_links(&page, url, &self.config.base_url) {
                    frontier.enqueue(link);
                }

                documents.push(html::parse_page(&page, url));
            }
            outcome => {
                report.pages_failed += 1;
                let reason = outcome.describe();
                tracing::warn!("Failed to fetch {}: {}", url, reason);
                self.progress.on_failure(url, &reason);
            }
        }
    }

    /// Downloads a PDF and collects its extracted text
    ///
    /// No links are followed out of PDF documents.
    async fn visit_pdf(
        &self,
        url: &Url,
        documents: &mut Vec<RawDocument>,
        report: &mut CrawlReport,
    ) {
        match fetch_document(&self.client, url).await {
            FetchOutcome::Success { body, .. } => match pdf::parse_pdf(&body, url) {
                Some(document) => documents.push(document),
                None => {
                    report.pages_failed += 1;
                    self.progress.on_failure(url, "PDF extraction failed");
                }
            },
            outcome => {
                report.pages_failed += 1;
                let reason = outcome.describe();
                tracing::warn!("Failed to download {}: {}", url, reason);
                self.progress.on_failure(url, &reason);
            }
        }
    }
}
