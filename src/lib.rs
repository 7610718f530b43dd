//! Shopcrawl: a storefront listing archiver
//!
//! This crate crawls a paginated storefront search feed, extracts item
//! listings from each page, optionally filters them by condition, and writes
//! one JSON document per item into a data directory.

pub mod config;
pub mod crawler;
pub mod storage;

use thiserror::Error;

/// Main error type for shopcrawl operations
#[derive(Debug, Error)]
pub enum ShopcrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid crawl request: {0}")]
    InvalidRequest(String),

    #[error("HTTP error fetching page {page}: {source}")]
    Http { page: u32, source: reqwest::Error },

    #[error("Page {page} returned HTTP {status}")]
    BadStatus {
        page: u32,
        status: reqwest::StatusCode,
    },

    #[error("Invalid listing endpoint: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for shopcrawl operations
pub type Result<T> = std::result::Result<T, ShopcrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Coordinator, CrawlOutcome, CrawlRequest, ItemRecord};
pub use storage::ItemStore;
