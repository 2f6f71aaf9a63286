use crate::config::types::{AssetConfig, Config, CrawlConfig, FilterConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_output_config(&config.output)?;
    validate_filter_config(&config.filters)?;
    validate_asset_config(&config.assets)?;
    Ok(())
}

/// Validates crawl behavior configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    let seed = Url::parse(&config.seed_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid seed-url '{}': {}", config.seed_url, e))
    })?;

    if seed.scheme() != "http" && seed.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "seed-url must use http or https, got '{}'",
            seed.scheme()
        )));
    }

    if seed.host_str().is_none() {
        return Err(ConfigError::Validation(format!(
            "seed-url '{}' has no host",
            config.seed_url
        )));
    }

    if config.max_download_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max-download-attempts must be >= 1, got {}",
            config.max_download_attempts
        )));
    }

    if config.navigation_timeout_ms < 1 {
        return Err(ConfigError::Validation(
            "navigation-timeout-ms must be >= 1".to_string(),
        ));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.root.is_empty() {
        return Err(ConfigError::Validation(
            "output root cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates filter configuration
fn validate_filter_config(config: &FilterConfig) -> Result<(), ConfigError> {
    for host in &config.ignored_hosts {
        if host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "ignored-hosts entries cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates asset extension entries
fn validate_asset_config(config: &AssetConfig) -> Result<(), ConfigError> {
    for extension in &config.extensions {
        let bare = extension.trim_start_matches('.');

        if bare.is_empty() {
            return Err(ConfigError::Validation(format!(
                "Invalid asset extension '{}'",
                extension
            )));
        }

        if !bare.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Validation(format!(
                "Asset extension '{}' must be alphanumeric",
                extension
            )));
        }
    }

    Ok(())
}
