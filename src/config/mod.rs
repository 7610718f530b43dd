//! Configuration module for shopcrawl
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every setting has a default, so a config file is optional.
//!
//! # Example
//!
//! ```no_run
//! use shopcrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("shopcrawl.toml")).unwrap();
//! println!("Endpoint: {}", config.fetch.endpoint);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, OutputConfig, DEFAULT_ENDPOINT};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
