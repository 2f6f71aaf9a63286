//! Storage trait and error types
//!
//! This module defines the trait interface for persisting crawl output and
//! the associated error types.

use std::path::Path;
use thiserror::Error;

/// Errors that can occur while persisting crawl output
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: String,
        source: std::io::Error,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Sink for crawl output files
///
/// Implementations persist byte buffers at caller-chosen paths, creating
/// missing parent directories along the way. Writing the same path twice
/// replaces the earlier contents.
pub trait Store: Send + Sync {
    /// Writes `bytes` at `path`, creating parent directories as needed
    fn write(&self, path: &Path, bytes: &[u8]) -> StorageResult<()>;
}
