//! Crawler module for listing page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of paginated listing pages
//! - Listing markup parsing and item extraction
//! - Overall crawl coordination and persist scheduling

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome, CrawlRequest};
pub use fetcher::{build_http_client, fetch_page, page_url, PAGE_PARAM};
pub use parser::{extract_item_id, parse_listing, ItemRecord};

use crate::config::Config;
use crate::Result;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Prepare the output directory
/// 2. Build the HTTP client
/// 3. Fetch and parse each requested page in order
/// 4. Persist every surviving item concurrently
/// 5. Report how many writes succeeded and failed
pub async fn crawl(config: Config, request: CrawlRequest) -> Result<CrawlOutcome> {
    run_crawl(config, request).await
}
