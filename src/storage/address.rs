//! Content-addressed output paths
//!
//! Output files live under a directory named after the URL's host, with
//! MD5-derived names so arbitrarily long URLs map to fixed-length paths:
//!
//! - assets: `<root>/<host>/<md5(full url)>.<extension>`
//! - page text: `<root>/<host>/<md5(url path)>/index.txt`
//!
//! Hashing the full URL for assets keeps two query-parameterized downloads
//! distinct; page text hashes only the path component, so query variants of
//! one path share a single text file (last write wins).

use md5::{Digest, Md5};
use std::path::{Path, PathBuf};
use url::Url;

/// Computes the lowercase hex MD5 digest of a string
pub fn url_digest(input: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Destination path for a downloaded asset
pub fn asset_path(root: &Path, authority: &str, url: &Url, extension: &str) -> PathBuf {
    let name = format!("{}.{}", url_digest(url.as_str()), extension);
    root.join(authority).join(name)
}

/// Destination path for a page's extracted text
pub fn page_text_path(root: &Path, authority: &str, url: &Url) -> PathBuf {
    root.join(authority)
        .join(url_digest(url.path()))
        .join("index.txt")
}
