//! Page visitation pipeline
//!
//! Visiting a page means fetching its markup, archiving the body text under
//! the output root, and collecting the links that should feed the frontier.
//! Out-of-domain URLs short-circuit before any network traffic.

use crate::crawler::client::{FetchError, WebClient};
use crate::crawler::parser::{extract_links, extract_text};
use crate::storage::{page_text_path, StorageError, Store};
use crate::url::{host_authority, LinkFilter};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Errors from the page pipeline
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result of dispatching one page URL
#[derive(Debug, PartialEq, Eq)]
pub enum PageOutcome {
    /// Page was fetched and archived; accepted links in document order
    Visited { links: Vec<String> },
    /// URL points outside the crawl's domain; nothing was fetched
    OutOfDomain,
}

/// Fetches pages, archives their text, and discovers crawlable links
pub struct PageVisitor {
    client: Arc<dyn WebClient>,
    store: Arc<dyn Store>,
    filter: Arc<LinkFilter>,
    output_root: PathBuf,
}

impl PageVisitor {
    pub fn new(
        client: Arc<dyn WebClient>,
        store: Arc<dyn Store>,
        filter: Arc<LinkFilter>,
        output_root: PathBuf,
    ) -> Self {
        Self {
            client,
            store,
            filter,
            output_root,
        }
    }

    /// Visits one page URL
    ///
    /// For in-domain pages the body text is archived, then anchor hrefs are
    /// collected: absolute http(s) links on the crawl's own host that are
    /// not ignore-listed, in document order, duplicates included. Hrefs
    /// that fail to parse are dropped one by one without failing the page.
    pub async fn visit(&self, url: &Url) -> Result<PageOutcome, PageError> {
        if !self.filter.is_same_domain(url) {
            return Ok(PageOutcome::OutOfDomain);
        }

        let html = self.client.load_page(url).await?;

        let text = extract_text(&html);
        let authority = host_authority(url).unwrap_or_default();
        let destination = page_text_path(&self.output_root, &authority, url);
        self.store.write(&destination, text.as_bytes())?;
        tracing::debug!("Archived text of {} at {}", url, destination.display());

        let links = extract_links(&html)
            .into_iter()
            .filter(|href| match Url::parse(href) {
                Ok(candidate) => self.filter.accepts(&candidate),
                Err(e) => {
                    tracing::debug!("Dropping malformed link {}: {}", href, e);
                    false
                }
            })
            .collect();

        Ok(PageOutcome::Visited { links })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Serves a fixed HTML body for every navigation
    struct StaticPage {
        html: String,
        calls: AtomicU32,
    }

    impl StaticPage {
        fn new(html: &str) -> Self {
            Self {
                html: html.to_string(),
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl WebClient for StaticPage {
        async fn load_page(&self, _url: &Url) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.html.clone())
        }

        async fn fetch_resource(&self, _url: &Url) -> Result<Vec<u8>, FetchError> {
            unreachable!("page tests never download")
        }
    }

    /// Fails every navigation with a timeout
    struct DeadServer;

    #[async_trait]
    impl WebClient for DeadServer {
        async fn load_page(&self, url: &Url) -> Result<String, FetchError> {
            Err(FetchError::Timeout {
                url: url.to_string(),
            })
        }

        async fn fetch_resource(&self, _url: &Url) -> Result<Vec<u8>, FetchError> {
            unreachable!("page tests never download")
        }
    }

    #[derive(Default)]
    struct MemStore {
        files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    }

    impl Store for MemStore {
        fn write(&self, path: &Path, bytes: &[u8]) -> crate::storage::StorageResult<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), bytes.to_vec());
            Ok(())
        }
    }

    fn visitor(client: Arc<dyn WebClient>, store: Arc<MemStore>) -> PageVisitor {
        let filter = Arc::new(LinkFilter::new(
            "www.example.com",
            &["youtube.com".to_string()],
        ));
        PageVisitor::new(client, store, filter, PathBuf::from("/out"))
    }

    #[tokio::test]
    async fn test_out_of_domain_short_circuits() {
        let client = Arc::new(StaticPage::new("<html><body>hi</body></html>"));
        let store = Arc::new(MemStore::default());
        let v = visitor(Arc::clone(&client) as Arc<dyn WebClient>, Arc::clone(&store));

        let url = Url::parse("https://elsewhere.org/").unwrap();
        let outcome = v.visit(&url).await.unwrap();

        assert_eq!(outcome, PageOutcome::OutOfDomain);
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
        assert!(store.files.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_visit_archives_trimmed_text() {
        let client = Arc::new(StaticPage::new(
            "<html><body>  Faculty of Engineering  </body></html>",
        ));
        let store = Arc::new(MemStore::default());
        let v = visitor(client, Arc::clone(&store));

        let url = Url::parse("https://www.example.com/about").unwrap();
        v.visit(&url).await.unwrap();

        let files = store.files.lock().unwrap();
        let expected = PathBuf::from("/out/www.example.com")
            .join("77102f70526b1c2db0eced54632dc618")
            .join("index.txt");
        assert_eq!(files.get(&expected).unwrap(), b"Faculty of Engineering");
    }

    #[tokio::test]
    async fn test_visit_keeps_same_domain_links_in_order() {
        let client = Arc::new(StaticPage::new(
            r#"<html><body>
                <a href="https://www.example.com/a">A</a>
                <a href="https://other.org/x">X</a>
                <a href="https://www.example.com/b">B</a>
                <a href="mailto:info@example.com">Mail</a>
            </body></html>"#,
        ));
        let store = Arc::new(MemStore::default());
        let v = visitor(client, store);

        let url = Url::parse("https://www.example.com/").unwrap();
        let outcome = v.visit(&url).await.unwrap();

        assert_eq!(
            outcome,
            PageOutcome::Visited {
                links: vec![
                    "https://www.example.com/a".to_string(),
                    "https://www.example.com/b".to_string(),
                ]
            }
        );
    }

    #[tokio::test]
    async fn test_visit_drops_ignored_hosts() {
        // The test filter ignore-lists youtube.com
        let client = Arc::new(StaticPage::new(
            r#"<html><body>
                <a href="https://www.youtube.com/watch?v=abc">Video</a>
                <a href="https://www.example.com/news">News</a>
            </body></html>"#,
        ));
        let store = Arc::new(MemStore::default());
        let v = visitor(client, store);

        let url = Url::parse("https://www.example.com/").unwrap();
        let outcome = v.visit(&url).await.unwrap();

        assert_eq!(
            outcome,
            PageOutcome::Visited {
                links: vec!["https://www.example.com/news".to_string()]
            }
        );
    }

    #[tokio::test]
    async fn test_visit_preserves_duplicate_links() {
        let client = Arc::new(StaticPage::new(
            r#"<html><body>
                <a href="https://www.example.com/page">One</a>
                <a href="https://www.example.com/page">Two</a>
            </body></html>"#,
        ));
        let store = Arc::new(MemStore::default());
        let v = visitor(client, store);

        let url = Url::parse("https://www.example.com/").unwrap();
        let outcome = v.visit(&url).await.unwrap();

        assert_eq!(
            outcome,
            PageOutcome::Visited {
                links: vec![
                    "https://www.example.com/page".to_string(),
                    "https://www.example.com/page".to_string(),
                ]
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_href_dropped_not_fatal() {
        let client = Arc::new(StaticPage::new(
            r#"<html><body>
                <a href="http://[not-a-host/">Broken</a>
                <a href="https://www.example.com/fine">Fine</a>
            </body></html>"#,
        ));
        let store = Arc::new(MemStore::default());
        let v = visitor(client, store);

        let url = Url::parse("https://www.example.com/").unwrap();
        let outcome = v.visit(&url).await.unwrap();

        assert_eq!(
            outcome,
            PageOutcome::Visited {
                links: vec!["https://www.example.com/fine".to_string()]
            }
        );
    }

    #[tokio::test]
    async fn test_navigation_failure_propagates() {
        let store = Arc::new(MemStore::default());
        let v = visitor(Arc::new(DeadServer), Arc::clone(&store));

        let url = Url::parse("https://www.example.com/slow").unwrap();
        let result = v.visit(&url).await;

        assert!(matches!(result, Err(PageError::Fetch(_))));
        assert!(store.files.lock().unwrap().is_empty());
    }
}
