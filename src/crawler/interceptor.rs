//! Request interception
//!
//! The network client consults a [`RequestInterceptor`] before every
//! navigation. The crawler installs an [`ExtensionGate`] so that asset URLs
//! are never rendered as pages, even if one somehow reaches the navigation
//! path instead of the download pipeline.

use crate::url::{AssetClassifier, UrlKind};
use std::sync::Arc;
use url::Url;

/// Verdict on an outgoing navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestDecision {
    /// Let the request proceed
    Allow,
    /// Cancel the request before any traffic is sent
    Abort,
}

/// Decides whether an outgoing navigation may proceed
pub trait RequestInterceptor: Send + Sync {
    fn decide(&self, url: &Url) -> RequestDecision;
}

/// Aborts navigations to URLs that classify as downloadable assets
pub struct ExtensionGate {
    classifier: Arc<AssetClassifier>,
}

impl ExtensionGate {
    pub fn new(classifier: Arc<AssetClassifier>) -> Self {
        Self { classifier }
    }
}

impl RequestInterceptor for ExtensionGate {
    fn decide(&self, url: &Url) -> RequestDecision {
        match self.classifier.classify(url) {
            UrlKind::Asset { .. } => RequestDecision::Abort,
            UrlKind::Page => RequestDecision::Allow,
        }
    }
}
