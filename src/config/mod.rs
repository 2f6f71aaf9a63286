//! Configuration module for the crawler
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files.
//!
//! # Example
//!
//! ```no_run
//! use sitescribe::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawling from: {}", config.crawl.seed_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{AssetConfig, Config, CrawlConfig, FilterConfig, OutputConfig};

// Re-export parser functions
pub use parser::load_config;
