//! Crawl engine: frontier, visited set, and the dispatch loop
//!
//! The engine owns the breadth-first traversal. URLs wait in a FIFO
//! frontier as raw strings; a URL string is marked visited exactly once,
//! immediately before it is dispatched, and duplicates are discarded at
//! that point rather than on insertion. One URL is fully resolved before
//! the next is dispatched, so visitation order is deterministic.

use crate::config::Config;
use crate::crawler::client::{HttpClient, WebClient};
use crate::crawler::download::Downloader;
use crate::crawler::interceptor::ExtensionGate;
use crate::crawler::page::{PageOutcome, PageVisitor};
use crate::crawler::retry::RetryPolicy;
use crate::storage::{FsStore, Store};
use crate::url::{host_authority, AssetClassifier, LinkFilter, UrlKind};
use crate::{ConfigError, CrawlError};
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Counters reported when a crawl run completes
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages fetched and archived
    pub pages_visited: u64,
    /// Assets fetched and written
    pub assets_downloaded: u64,
    /// URLs abandoned after an error (navigation, download, malformed)
    pub urls_failed: u64,
    /// URLs discarded at dispatch for being outside the base domain
    pub urls_skipped: u64,
}

/// Single-worker breadth-first crawl over one site
pub struct Engine {
    filter: Arc<LinkFilter>,
    classifier: Arc<AssetClassifier>,
    downloader: Downloader,
    visitor: PageVisitor,
    frontier: VecDeque<String>,
    visited: HashSet<String>,
}

impl Engine {
    /// Builds an engine from validated configuration
    ///
    /// Fails only if the seed URL yields no base domain or the HTTP client
    /// cannot be constructed; everything past this point is recoverable per
    /// URL.
    pub fn new(config: &Config) -> Result<Self, CrawlError> {
        let seed = Url::parse(&config.crawl.seed_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("seed-url '{}': {}", config.crawl.seed_url, e))
        })?;
        let base_authority = host_authority(&seed).ok_or_else(|| {
            ConfigError::InvalidUrl(format!("seed-url '{}' has no host", config.crawl.seed_url))
        })?;

        let filter = Arc::new(LinkFilter::new(
            &base_authority,
            &config.filters.ignored_hosts,
        ));
        let classifier = Arc::new(AssetClassifier::new(&config.assets.extensions));

        let mut http = HttpClient::new(&config.crawl)?;
        http.set_interceptor(Arc::new(ExtensionGate::new(Arc::clone(&classifier))));
        let client: Arc<dyn WebClient> = Arc::new(http);

        let store: Arc<dyn Store> = Arc::new(FsStore::new());
        let output_root = PathBuf::from(&config.output.root);
        let policy = RetryPolicy::new(
            config.crawl.max_download_attempts,
            Duration::from_millis(config.crawl.retry_backoff_ms),
        );

        let downloader = Downloader::new(
            Arc::clone(&client),
            Arc::clone(&store),
            policy,
            output_root.clone(),
        );
        let visitor = PageVisitor::new(client, store, Arc::clone(&filter), output_root);

        let mut frontier = VecDeque::new();
        frontier.push_back(config.crawl.seed_url.clone());

        Ok(Self {
            filter,
            classifier,
            downloader,
            visitor,
            frontier,
            visited: HashSet::new(),
        })
    }

    /// Drains the frontier to completion
    ///
    /// Every per-URL failure is logged and absorbed; the loop ends only
    /// when the frontier is empty.
    pub async fn run(&mut self) -> CrawlStats {
        let mut stats = CrawlStats::default();
        let started = Instant::now();
        let mut dispatched: u64 = 0;

        while let Some(current) = self.frontier.pop_front() {
            // Dispatch-time deduplication: duplicates are allowed into the
            // frontier and dropped here instead.
            if self.visited.contains(&current) {
                continue;
            }
            self.visited.insert(current.clone());

            let url = match Url::parse(&current) {
                Ok(u) => u,
                Err(e) => {
                    tracing::warn!("Skipping malformed URL {}: {}", current, e);
                    stats.urls_failed += 1;
                    continue;
                }
            };

            // Insertion-side filtering already rejects cross-domain links;
            // the seed itself still needs the check.
            if !self.filter.is_same_domain(&url) {
                tracing::info!("Skipping {} - outside of base domain", current);
                stats.urls_skipped += 1;
                continue;
            }

            dispatched += 1;
            if dispatched % 10 == 0 {
                tracing::info!(
                    "Progress: {} URLs dispatched, {} waiting, {:.1}s elapsed",
                    dispatched,
                    self.frontier.len(),
                    started.elapsed().as_secs_f64()
                );
            }

            match self.classifier.classify(&url) {
                UrlKind::Asset { extension } => {
                    tracing::info!("Downloading {}", current);
                    match self.downloader.fetch(&url, &extension).await {
                        Ok(_) => stats.assets_downloaded += 1,
                        Err(e) => {
                            tracing::warn!("{}", e);
                            stats.urls_failed += 1;
                        }
                    }
                }
                UrlKind::Page => {
                    tracing::info!("Crawling {}", current);
                    match self.visitor.visit(&url).await {
                        Ok(PageOutcome::Visited { links }) => {
                            stats.pages_visited += 1;
                            self.frontier.extend(links);
                        }
                        Ok(PageOutcome::OutOfDomain) => {
                            tracing::info!("Skipping {} - outside of base domain", current);
                            stats.urls_skipped += 1;
                        }
                        Err(e) => {
                            tracing::warn!("Error processing {}: {}", current, e);
                            stats.urls_failed += 1;
                        }
                    }
                }
            }
        }

        tracing::info!(
            "Crawl complete: {} pages archived, {} assets downloaded, {} failed, {} skipped in {:?}",
            stats.pages_visited,
            stats.assets_downloaded,
            stats.urls_failed,
            stats.urls_skipped,
            started.elapsed()
        );

        stats
    }
}
