//! Storage module for persisting crawl output
//!
//! The crawl writes two kinds of files under the configured output root:
//! - extracted page text, one `index.txt` per visited page
//! - downloaded assets, one file per asset URL
//!
//! Both are content-addressed by URL (see [`asset_path`] and
//! [`page_text_path`]) and written through the [`Store`] trait, so the
//! pipelines never touch the filesystem directly.

mod address;
mod fs;
mod traits;

pub use address::{asset_path, page_text_path, url_digest};
pub use fs::FsStore;
pub use traits::{StorageError, StorageResult, Store};
