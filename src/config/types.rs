use serde::Deserialize;

/// Main configuration structure for the crawler
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub filters: FilterConfig,
    #[serde(default)]
    pub assets: AssetConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// URL the crawl starts from; its host becomes the base domain
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Upper bound on a single page navigation (milliseconds)
    #[serde(rename = "navigation-timeout-ms", default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,

    /// Total fetch attempts per asset, first try included
    #[serde(rename = "max-download-attempts", default = "default_max_download_attempts")]
    pub max_download_attempts: u32,

    /// Delay between download attempts (milliseconds; 0 retries immediately)
    #[serde(rename = "retry-backoff-ms", default)]
    pub retry_backoff_ms: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory page text and assets are written under
    pub root: String,
}

/// Link filtering configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    /// Hosts whose links are never followed, matched as substrings
    #[serde(rename = "ignored-hosts", default)]
    pub ignored_hosts: Vec<String>,
}

/// Asset classification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    /// Path extensions treated as downloadable files
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

fn default_navigation_timeout_ms() -> u64 {
    60_000
}

fn default_max_download_attempts() -> u32 {
    3
}

fn default_user_agent() -> String {
    format!("sitescribe/{}", env!("CARGO_PKG_VERSION"))
}

fn default_extensions() -> Vec<String> {
    [
        "pdf", "avi", "mp4", "jpg", "png", "zip", "rar", "doc", "docx", "xls", "xlsx",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
