//! Configuration loading and validation
//!
//! Configuration is an optional TOML file; every field has a default so
//! the scraper runs with no config at all. Keys use kebab-case on disk.

use crate::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure for leadscout
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub batch: BatchConfig,
    pub output: OutputConfig,
    /// Browser-like User-Agent strings; one is picked at random per site
    /// and reused for every request to that site
    #[serde(rename = "user-agents")]
    pub user_agents: Vec<String>,
}

/// Per-site crawl behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Hard ceiling on pages fetched during discovery for one site
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// How many discovered priority links are themselves explored
    #[serde(rename = "priority-link-cap")]
    pub priority_link_cap: usize,

    /// Maximum in-flight fetches within one site crawl
    #[serde(rename = "fetch-concurrency")]
    pub fetch_concurrency: usize,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

/// Bulk batch behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of sites processed concurrently per group
    #[serde(rename = "group-size")]
    pub group_size: usize,

    /// Hard deadline for one site's whole pipeline, in seconds
    #[serde(rename = "site-timeout-secs")]
    pub site_timeout_secs: u64,

    /// Pause between groups, in milliseconds
    #[serde(rename = "pause-between-groups-ms")]
    pub pause_between_groups_ms: u64,
}

/// Output file locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Base directory; json/ and csv/ subdirectories are created inside
    pub directory: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 5,
            priority_link_cap: 3,
            fetch_concurrency: 5,
            request_timeout_secs: 10,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            group_size: 3,
            site_timeout_secs: 10,
            pause_between_groups_ms: 500,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            batch: BatchConfig::default(),
            output: OutputConfig::default(),
            user_agents: default_user_agents(),
        }
    }
}

/// Desktop Chrome User-Agent pool used when the config supplies none
fn default_user_agents() -> Vec<String> {
    [
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/117.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/116.0.0.0 Safari/537.36",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Loads configuration from a TOML file and validates it
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates a configuration, whether loaded or defaulted
pub fn validate_config(config: &Config) -> ConfigResult<()> {
    if config.crawler.max_pages == 0 {
        return Err(ConfigError::Validation(
            "crawler.max-pages must be at least 1".to_string(),
        ));
    }
    if config.crawler.fetch_concurrency == 0 {
        return Err(ConfigError::Validation(
            "crawler.fetch-concurrency must be at least 1".to_string(),
        ));
    }
    if config.batch.group_size == 0 {
        return Err(ConfigError::Validation(
            "batch.group-size must be at least 1".to_string(),
        ));
    }
    if config.batch.site_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "batch.site-timeout-secs must be at least 1".to_string(),
        ));
    }
    if config.user_agents.is_empty() {
        return Err(ConfigError::Validation(
            "user-agents must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.crawler.max_pages, 5);
        assert_eq!(config.crawler.priority_link_cap, 3);
        assert_eq!(config.crawler.fetch_concurrency, 5);
        assert_eq!(config.batch.group_size, 3);
        assert_eq!(config.batch.site_timeout_secs, 10);
        assert_eq!(config.batch.pause_between_groups_ms, 500);
        assert_eq!(config.user_agents.len(), 5);
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml = r#"
            [crawler]
            max-pages = 8

            [batch]
            group-size = 2
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.crawler.max_pages, 8);
        // Unspecified fields fall back to defaults
        assert_eq!(config.crawler.fetch_concurrency, 5);
        assert_eq!(config.batch.group_size, 2);
        assert_eq!(config.batch.pause_between_groups_ms, 500);
    }

    #[test]
    fn test_rejects_zero_group_size() {
        let mut config = Config::default();
        config.batch.group_size = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_empty_user_agents() {
        let mut config = Config::default();
        config.user_agents.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_max_pages() {
        let mut config = Config::default();
        config.crawler.max_pages = 0;
        assert!(validate_config(&config).is_err());
    }
}
