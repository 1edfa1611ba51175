//! HTTP client construction and request headers

use crate::config::Config;
use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

/// Builds the shared HTTP client
///
/// Certificate errors are tolerated: the pipeline extracts from whatever
/// content a site serves, and broken TLS on small business sites is
/// common. Redirects are followed (default limit).
pub fn build_http_client(request_timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(request_timeout_secs))
        .connect_timeout(Duration::from_secs(5))
        .danger_accept_invalid_certs(true)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Picks one User-Agent from the configured pool
///
/// The same value is reused for every request to a given site.
pub fn pick_user_agent(config: &Config) -> String {
    config
        .user_agents
        .choose(&mut rand::thread_rng())
        .cloned()
        .unwrap_or_default()
}

/// Standard browser-like headers sent with every request
pub fn browser_headers(user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(user_agent) {
        headers.insert(USER_AGENT, value);
    }
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    // Accept-Encoding is left to the client so gzip/brotli responses are
    // decompressed transparently.
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert("DNT", HeaderValue::from_static("1"));
    headers.insert(
        "Upgrade-Insecure-Requests",
        HeaderValue::from_static("1"),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(10).is_ok());
    }

    #[test]
    fn test_browser_headers_complete() {
        let headers = browser_headers("TestAgent/1.0");
        assert_eq!(headers.get(USER_AGENT).unwrap(), "TestAgent/1.0");
        assert!(headers.contains_key(ACCEPT));
        assert!(headers.contains_key(ACCEPT_LANGUAGE));
        assert!(headers.contains_key("DNT"));
        assert!(headers.contains_key("Upgrade-Insecure-Requests"));
    }

    #[test]
    fn test_pick_user_agent_from_pool() {
        let config = Config::default();
        let ua = pick_user_agent(&config);
        assert!(config.user_agents.contains(&ua));
    }
}
