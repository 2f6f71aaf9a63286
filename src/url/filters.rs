//! Link acceptance rules
//!
//! A discovered link enters the frontier only if it points at the crawl's
//! own host and does not match the ignore list.

use crate::url::host_authority;
use url::Url;

/// Decides which discovered links are eligible for crawling
#[derive(Debug, Clone)]
pub struct LinkFilter {
    base_authority: String,
    ignored_hosts: Vec<String>,
}

impl LinkFilter {
    /// Creates a filter for the given base host
    ///
    /// `ignored_hosts` entries match case-insensitively as substrings of a
    /// candidate's host, so an entry "facebook.com" also covers
    /// "m.facebook.com". There is no wildcard syntax.
    pub fn new(base_authority: &str, ignored_hosts: &[String]) -> Self {
        Self {
            base_authority: base_authority.to_lowercase(),
            ignored_hosts: ignored_hosts.iter().map(|h| h.to_lowercase()).collect(),
        }
    }

    /// Checks whether the URL's host equals the crawl's base host
    ///
    /// The comparison is exact: "www.example.com" and "example.com" are
    /// different hosts.
    pub fn is_same_domain(&self, url: &Url) -> bool {
        host_authority(url).map_or(false, |h| h == self.base_authority)
    }

    /// Checks whether a host matches an ignore-list entry
    pub fn is_ignored(&self, authority: &str) -> bool {
        let authority = authority.to_lowercase();
        self.ignored_hosts
            .iter()
            .any(|entry| authority.contains(entry))
    }

    /// Checks whether a discovered link may enter the frontier
    pub fn accepts(&self, url: &Url) -> bool {
        match host_authority(url) {
            Some(authority) => authority == self.base_authority && !self.is_ignored(&authority),
            None => false,
        }
    }
}
