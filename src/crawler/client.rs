//! Network access for the crawler
//!
//! All HTTP traffic goes through the [`WebClient`] trait, so the crawl
//! pipelines never touch `reqwest` directly. The trait covers the two
//! operations the crawler needs:
//!
//! - `load_page`: navigate to a URL and return its markup
//! - `fetch_resource`: fetch a URL's raw bytes for download
//!
//! Navigations consult the registered [`RequestInterceptor`] before any
//! traffic is sent. Resource fetches do not: they are themselves the
//! replacement for an aborted navigation.

use crate::config::CrawlConfig;
use crate::crawler::interceptor::{RequestDecision, RequestInterceptor};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors from a single network operation
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read response body from {url}: {source}")]
    Body { url: String, source: reqwest::Error },

    #[error("Request to {url} aborted by interceptor")]
    Aborted { url: String },
}

/// Network capability used by both crawl pipelines
#[async_trait]
pub trait WebClient: Send + Sync {
    /// Navigates to a page URL and returns the response markup
    async fn load_page(&self, url: &Url) -> Result<String, FetchError>;

    /// Fetches the raw bytes of a resource URL
    async fn fetch_resource(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

/// [`WebClient`] backed by a shared reqwest client
pub struct HttpClient {
    client: Client,
    interceptor: Option<Arc<dyn RequestInterceptor>>,
}

impl HttpClient {
    /// Builds the HTTP client from crawl configuration
    ///
    /// The navigation timeout bounds every request. Compressed responses
    /// are decoded transparently.
    pub fn new(config: &CrawlConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_millis(config.navigation_timeout_ms))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            interceptor: None,
        })
    }

    /// Registers the request interceptor
    ///
    /// Called once during engine construction, before the client is shared.
    pub fn set_interceptor(&mut self, interceptor: Arc<dyn RequestInterceptor>) {
        self.interceptor = Some(interceptor);
    }

    fn classify_send_error(url: &Url, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Request {
                url: url.to_string(),
                source: e,
            }
        }
    }
}

#[async_trait]
impl WebClient for HttpClient {
    async fn load_page(&self, url: &Url) -> Result<String, FetchError> {
        if let Some(interceptor) = &self.interceptor {
            if interceptor.decide(url) == RequestDecision::Abort {
                return Err(FetchError::Aborted {
                    url: url.to_string(),
                });
            }
        }

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Self::classify_send_error(url, e))?;

        // Error statuses still carry a renderable body; the caller archives
        // whatever the server returned.
        response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            source: e,
        })
    }

    async fn fetch_resource(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Self::classify_send_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            source: e,
        })?;

        Ok(bytes.to_vec())
    }
}
