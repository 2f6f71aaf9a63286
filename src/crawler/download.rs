//! Asset download pipeline
//!
//! Assets are fetched with bounded retry and stored content-addressed under
//! the output root. A URL that exhausts its attempts is abandoned: nothing
//! is written, and the failure surfaces as an error for the engine to log.
//! Asset URLs never contribute links to the frontier.

use crate::crawler::client::{FetchError, WebClient};
use crate::crawler::retry::{with_retry, RetryPolicy};
use crate::storage::{asset_path, StorageError, Store};
use crate::url::host_authority;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Errors from the download pipeline
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Download of {url} failed after {attempts} attempts: {source}")]
    Exhausted {
        url: String,
        attempts: u32,
        source: FetchError,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Fetches asset URLs and persists them under the output root
pub struct Downloader {
    client: Arc<dyn WebClient>,
    store: Arc<dyn Store>,
    policy: RetryPolicy,
    output_root: PathBuf,
}

impl Downloader {
    pub fn new(
        client: Arc<dyn WebClient>,
        store: Arc<dyn Store>,
        policy: RetryPolicy,
        output_root: PathBuf,
    ) -> Self {
        Self {
            client,
            store,
            policy,
            output_root,
        }
    }

    /// Downloads one asset, returning the path it was stored at
    ///
    /// Fetches are retried per the configured policy; on exhaustion nothing
    /// is written. The stored filename derives from the full URL string, so
    /// repeated crawls of the same URL overwrite a single file.
    pub async fn fetch(&self, url: &Url, extension: &str) -> Result<PathBuf, DownloadError> {
        let bytes = {
            let client = Arc::clone(&self.client);
            let target = url.clone();

            with_retry(&self.policy, move |_attempt| {
                let client = Arc::clone(&client);
                let target = target.clone();
                async move { client.fetch_resource(&target).await }
            })
            .await
            .map_err(|e| DownloadError::Exhausted {
                url: url.to_string(),
                attempts: e.attempts,
                source: e.last_error,
            })?
        };

        let authority = host_authority(url).unwrap_or_default();
        let destination = asset_path(&self.output_root, &authority, url, extension);
        self.store.write(&destination, &bytes)?;

        tracing::info!("Downloaded {} to {}", url, destination.display());
        Ok(destination)
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
    use std::time::Duration;

    /// Fails `failures` times, then serves `bytes`
    struct FlakyClient {
        failures: u32,
        bytes: Vec<u8>,
        calls: AtomicU32,
    }

    impl FlakyClient {
        fn new(failures: u32, bytes: &[u8]) -> Self {
            Self {
                failures,
                bytes: bytes.to_vec(),
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl WebClient for FlakyClient {
        async fn load_page(&self, _url: &Url) -> Result<String, FetchError> {
            unreachable!("download tests never navigate")
        }

        async fn fetch_resource(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n <= self.failures {
                Err(FetchError::Status {
                    url: url.to_string(),
                    status: 503,
                })
            } else {
                Ok(self.bytes.clone())
            }
        }
    }

    /// In-memory store capturing writes by path
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

    fn downloader(
        client: Arc<FlakyClient>,
        store: Arc<MemStore>,
        max_attempts: u32,
    ) -> Downloader {
        Downloader::new(
            client,
            store,
            RetryPolicy::new(max_attempts, Duration::ZERO),
            PathBuf::from("/out"),
        )
    }

    #[tokio::test]
    async fn test_successful_download_writes_addressed_file() {
        let client = Arc::new(FlakyClient::new(0, b"%PDF-1.4"));
        let store = Arc::new(MemStore::default());
        let d = downloader(Arc::clone(&client), Arc::clone(&store), 3);

        let url = Url::parse("https://example.com/report.pdf").unwrap();
        let path = d.fetch(&url, "pdf").await.unwrap();

        assert_eq!(
            path,
            PathBuf::from("/out/example.com/6c82448510c02f87abc4d68f4619fd4f.pdf")
        );
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);

        let files = store.files.lock().unwrap();
        assert_eq!(files.get(&path).unwrap(), b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_transient_failures_then_success() {
        let client = Arc::new(FlakyClient::new(2, b"archive-bytes"));
        let store = Arc::new(MemStore::default());
        let d = downloader(Arc::clone(&client), Arc::clone(&store), 3);

        let url = Url::parse("https://example.com/files/archive.zip").unwrap();
        d.fetch(&url, "zip").await.unwrap();

        assert_eq!(client.calls.load(Ordering::SeqCst), 3);
        assert_eq!(store.files.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_exhaustion_writes_nothing() {
        let client = Arc::new(FlakyClient::new(u32::MAX, b""));
        let store = Arc::new(MemStore::default());
        let d = downloader(Arc::clone(&client), Arc::clone(&store), 3);

        let url = Url::parse("https://example.com/report.pdf").unwrap();
        let result = d.fetch(&url, "pdf").await;

        match result {
            Err(DownloadError::Exhausted { attempts, .. }) => assert_eq!(attempts, 3),
            other => panic!("expected exhaustion, got {:?}", other.map(|p| p.display().to_string())),
        }
        assert_eq!(client.calls.load(Ordering::SeqCst), 3);
        assert!(store.files.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filename_uses_extension_and_host_directory() {
        let client = Arc::new(FlakyClient::new(0, b"bytes"));
        let store = Arc::new(MemStore::default());
        let d = downloader(client, Arc::clone(&store), 1);

        let url = Url::parse("https://files.example.com/x/y/映画.mp4").unwrap();
        let path = d.fetch(&url, "mp4").await.unwrap();

        assert!(path.starts_with("/out/files.example.com"));
        assert_eq!(path.extension().unwrap(), "mp4");
    }
}
