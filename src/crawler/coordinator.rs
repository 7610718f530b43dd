//! Crawl coordinator - main orchestration logic
//!
//! Drives the page range: pages are fetched strictly sequentially in
//! increasing order, each page is parsed into item records, and one persist
//! task per record is spawned immediately. All persist tasks run concurrently
//! with each other and are joined after the last page, so a slow write never
//! holds up the fetch stream.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::parser::parse_listing;
use crate::storage::{ItemStore, StorageError};
use crate::{Result, ShopcrawlError};
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Caller input describing one crawl run
#[derive(Debug, Clone)]
pub struct CrawlRequest {
    /// First page to fetch (1-based)
    pub start_page: u32,

    /// Number of consecutive pages to fetch
    pub page_count: u32,

    /// Optional condition filter; items whose condition does not contain
    /// this text (case-insensitively) are dropped. Empty means no filtering.
    pub condition: Option<String>,
}

impl Default for CrawlRequest {
    fn default() -> Self {
        Self {
            start_page: 1,
            page_count: 1,
            condition: None,
        }
    }
}

impl CrawlRequest {
    /// Rejects page values the feed cannot serve
    pub fn validate(&self) -> Result<()> {
        if self.start_page < 1 {
            return Err(ShopcrawlError::InvalidRequest(
                "start_page must be >= 1".to_string(),
            ));
        }
        if self.page_count < 1 {
            return Err(ShopcrawlError::InvalidRequest(
                "page_count must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The condition filter with empty strings normalized away
    fn condition_filter(&self) -> Option<&str> {
        self.condition
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
    }
}

/// Result of a completed crawl run
///
/// `saved + failed` equals the number of persist operations scheduled.
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Item writes that completed successfully
    pub saved: usize,

    /// Item writes that failed; each failure is logged with its item ID
    pub failed: usize,

    /// Resolved directory the item files were written into
    pub output_dir: PathBuf,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    store: Arc<ItemStore>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Prepares the output directory and builds the HTTP client. Directory
    /// preparation failure is fatal and happens before any network activity.
    pub fn new(config: Config) -> Result<Self> {
        let store = Arc::new(ItemStore::open(&config.output.data_dir)?);
        let client = build_http_client(&config.fetch)?;

        Ok(Self {
            config,
            client,
            store,
        })
    }

    /// Runs one crawl: fetch each page in order, parse it, spawn persists,
    /// then join every outstanding write before reporting.
    ///
    /// A page fetch failure aborts the run: no later page is fetched, and the
    /// error is returned after already-spawned writes have been drained so no
    /// file is left torn mid-write. A persist failure does not abort the run;
    /// it is counted in [`CrawlOutcome::failed`] while siblings continue.
    pub async fn run(&self, request: &CrawlRequest) -> Result<CrawlOutcome> {
        request.validate()?;

        let endpoint = &self.config.fetch.endpoint;
        let mut writes: JoinSet<std::result::Result<PathBuf, StorageError>> = JoinSet::new();
        let mut scheduled = 0usize;

        let end = request.start_page.saturating_add(request.page_count);
        for page in request.start_page..end {
            let markup = match fetch_page(&self.client, endpoint, page).await {
                Ok(markup) => markup,
                Err(e) => {
                    let (saved, failed) = join_writes(&mut writes).await;
                    tracing::warn!(
                        "Aborting after fetch failure on page {}; {} writes completed, {} failed",
                        page,
                        saved,
                        failed
                    );
                    return Err(e);
                }
            };

            let items = parse_listing(&markup, request.condition_filter());
            tracing::info!("Page {}: {} listings extracted", page, items.len());

            for item in items {
                let store = Arc::clone(&self.store);
                writes.spawn(async move { store.persist(&item).await });
                scheduled += 1;
            }
        }

        let (saved, failed) = join_writes(&mut writes).await;
        tracing::info!(
            "Crawl finished: {} of {} scheduled writes succeeded",
            saved,
            scheduled
        );

        Ok(CrawlOutcome {
            saved,
            failed,
            output_dir: self.store.root().to_path_buf(),
        })
    }
}

/// Joins every outstanding persist task, counting successes and failures
///
/// Failures are logged here, attributed to their item, and never propagate
/// to sibling writes.
async fn join_writes(
    writes: &mut JoinSet<std::result::Result<PathBuf, StorageError>>,
) -> (usize, usize) {
    let mut saved = 0;
    let mut failed = 0;

    while let Some(joined) = writes.join_next().await {
        match joined {
            Ok(Ok(path)) => {
                saved += 1;
                tracing::debug!("Wrote {}", path.display());
            }
            Ok(Err(e)) => {
                failed += 1;
                tracing::error!("{}", e);
            }
            Err(e) => {
                failed += 1;
                tracing::error!("Persist task failed to run: {}", e);
            }
        }
    }

    (saved, failed)
}

/// Runs the main crawl operation
///
/// One-call entry point: builds a [`Coordinator`] from the config and runs
/// the given request to completion.
pub async fn run_crawl(config: Config, request: CrawlRequest) -> Result<CrawlOutcome> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run(&request).await
}
