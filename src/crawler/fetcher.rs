//! HTTP fetcher for listing pages
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with user agent and timeouts
//! - Constructing per-page request URLs
//! - GET requests for listing pages with status classification

use crate::config::FetchConfig;
use crate::ShopcrawlError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Query parameter carrying the page number; page 1 omits it entirely and
/// relies on the feed's own default.
pub const PAGE_PARAM: &str = "_pgn";

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use shopcrawl::config::FetchConfig;
/// use shopcrawl::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Constructs the request URL for a listing page
///
/// Page 1 is the bare endpoint; any later page appends the page-number
/// parameter to the endpoint's existing query string.
pub fn page_url(endpoint: &str, page: u32) -> crate::Result<Url> {
    let mut url = Url::parse(endpoint)?;
    if page > 1 {
        url.query_pairs_mut()
            .append_pair(PAGE_PARAM, &page.to_string());
    }
    Ok(url)
}

/// Fetches one listing page and returns its raw markup
///
/// One GET per invocation, no caching and no retries. A transport failure,
/// a timeout, or a non-success status is a hard failure carrying the page
/// number so the caller can report which page broke the run.
pub async fn fetch_page(client: &Client, endpoint: &str, page: u32) -> crate::Result<String> {
    let url = page_url(endpoint, page)?;
    tracing::debug!("Fetching page {}: {}", page, url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| ShopcrawlError::Http { page, source })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ShopcrawlError::BadStatus { page, status });
    }

    response
        .text()
        .await
        .map_err(|source| ShopcrawlError::Http { page, source })
}
