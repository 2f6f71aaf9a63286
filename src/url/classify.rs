//! Asset vs. page classification
//!
//! A URL is routed by the file extension of its path: URLs ending in a
//! configured extension go to the download pipeline, everything else is
//! treated as an HTML page.

use std::collections::HashSet;
use url::Url;

/// Where a URL is routed by the crawl loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlKind {
    /// Downloadable file, handled by the download pipeline
    Asset { extension: String },
    /// HTML page, handled by the page pipeline
    Page,
}

/// Classifies URLs as downloadable assets or crawlable pages
#[derive(Debug, Clone)]
pub struct AssetClassifier {
    extensions: HashSet<String>,
}

impl AssetClassifier {
    /// Creates a classifier from the configured extension list
    ///
    /// Entries are lowercased and a leading dot is tolerated, so "pdf" and
    /// ".PDF" configure the same extension.
    pub fn new(extensions: &[String]) -> Self {
        Self {
            extensions: extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    /// Routes a URL by the extension of its path's final segment
    ///
    /// Query strings and fragments play no part in the decision:
    /// `/files/report.pdf?v=2` classifies by `pdf`.
    pub fn classify(&self, url: &Url) -> UrlKind {
        match path_extension(url) {
            Some(ext) if self.extensions.contains(&ext) => UrlKind::Asset { extension: ext },
            _ => UrlKind::Page,
        }
    }
}

/// Extracts the lowercased extension of the path's final segment
fn path_extension(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.next_back()?;
    let dot = segment.rfind('.')?;
    let extension = &segment[dot + 1..];

    if extension.is_empty() {
        return None;
    }

    Some(extension.to_lowercase())
}
