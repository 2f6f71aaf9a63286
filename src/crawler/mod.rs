//! Crawler module for page fetching and asset downloading
//!
//! This module contains the core crawling logic, including:
//! - The network capability and request interception
//! - HTML parsing for text extraction and link discovery
//! - Asset downloads with bounded retry
//! - The breadth-first dispatch loop over the frontier

mod client;
mod download;
mod engine;
mod interceptor;
mod page;
mod parser;
mod retry;

pub use client::{FetchError, HttpClient, WebClient};
pub use download::{DownloadError, Downloader};
pub use engine::{CrawlStats, Engine};
pub use interceptor::{ExtensionGate, RequestDecision, RequestInterceptor};
pub use page::{PageError, PageOutcome, PageVisitor};
pub use parser::{extract_links, extract_text};
pub use retry::{with_retry, RetryExhausted, RetryPolicy};

use crate::config::Config;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Derive the base domain from the seed URL
/// 2. Build the HTTP client with the asset interceptor registered
/// 3. Drain the frontier breadth-first, archiving pages and assets
/// 4. Return the final counters once the frontier is empty
///
/// # Arguments
///
/// * `config` - The validated crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlStats)` - Crawl ran to completion
/// * `Err(CrawlError)` - The engine could not be constructed
pub async fn crawl(config: &Config) -> Result<CrawlStats, CrawlError> {
    let mut engine = Engine::new(config)?;
    Ok(engine.run().await)
}
