//! Leadscout: a business-contact discovery pipeline
//!
//! This crate crawls a small set of priority pages (contact/about/legal)
//! on each target site, extracts contact signals (emails, phone numbers,
//! social profiles, French company identifiers, technology fingerprint)
//! and merges the per-page findings into one source-attributed record
//! per site. Many sites are processed concurrently with per-site
//! deadlines and isolated failures.

pub mod aggregate;
pub mod batch;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod fetch;
pub mod output;
pub mod record;
pub mod url;

use thiserror::Error;

/// Main error type for leadscout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors from a single page fetch
///
/// All variants are recoverable: a failed fetch degrades to "no content
/// from this URL" and never aborts a crawl or a batch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for leadscout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use batch::{run_batch, BatchScheduler};
pub use config::Config;
pub use record::{CompanyInfo, ContactRecord, PageType, SiteRecord, SocialLinks, TechFingerprint};
