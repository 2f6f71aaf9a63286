//! URL handling for the crawler
//!
//! This module provides host extraction, link acceptance rules, and
//! asset-vs-page classification.

mod classify;
mod filters;

pub use classify::{AssetClassifier, UrlKind};
pub use filters::LinkFilter;

use url::Url;

/// Extracts the host authority from a URL
///
/// The host authority is the lowercase hostname, without port. It names the
/// per-host output directory and is what domain comparisons run against.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitescribe::url::host_authority;
///
/// let url = Url::parse("https://WWW.Example.COM:8443/path").unwrap();
/// assert_eq!(host_authority(&url), Some("www.example.com".to_string()));
/// ```
pub fn host_authority(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}
