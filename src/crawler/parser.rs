//! HTML parsing for text extraction and link discovery
//!
//! This module handles parsing fetched markup to extract:
//! - The visible text of the document body (for archiving)
//! - Candidate hrefs from anchor tags (for frontier discovery)
//!
//! Both functions are pure; filtering candidates against the crawl's domain
//! rules happens in the page pipeline.

use scraper::{Html, Selector};

/// Extracts the text content of the document body, trimmed
///
/// Text nodes are concatenated in document order with no separator
/// inserted, mirroring how a DOM `text()` call flattens an element.
/// A document without a body yields an empty string.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let body_selector = match Selector::parse("body") {
        Ok(s) => s,
        Err(_) => return String::new(),
    };

    document
        .select(&body_selector)
        .next()
        .map(|body| body.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Collects candidate hrefs from anchor elements
///
/// Only absolute `http(s)` values are candidates; relative paths,
/// fragments, and non-web schemes (`mailto:`, `javascript:`, `tel:`) never
/// enter link discovery. Order follows the document and duplicates are
/// kept.
pub fn extract_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let anchor_selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    document
        .select(&anchor_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| href.starts_with("http"))
        .map(str::to_string)
        .collect()
}
