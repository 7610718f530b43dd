use serde::Deserialize;

/// Default search feed endpoint when none is configured
pub const DEFAULT_ENDPOINT: &str = "https://www.ebay.com/sch/i.html?_ssn=garlandcomputer";

/// Main configuration structure for shopcrawl
///
/// Every field has a default, so the config file is optional: a missing file
/// or a missing table falls back to the values the tool ships with.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Fetch behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Base URL of the storefront search feed
    pub endpoint: String,

    /// User agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Total request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: concat!("shopcrawl/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory item files are written into, relative to the working directory
    #[serde(rename = "data-dir")]
    pub data_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
        }
    }
}
