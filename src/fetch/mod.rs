//! HTTP fetching
//!
//! This module owns all network access for the pipeline:
//! - building the shared HTTP client
//! - browser-like request headers with a rotating User-Agent
//! - fetching a page body with charset-cascade decoding
//!
//! Every failure maps to a typed [`FetchError`](crate::FetchError); a
//! failed fetch always degrades to "no content from this URL".

mod client;
mod decode;

pub use client::{browser_headers, build_http_client, pick_user_agent};
pub use decode::decode_body;

use crate::{FetchError, FetchResult};
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::collections::HashMap;

/// A successfully fetched and decoded page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL that was requested
    pub url: String,
    /// Decoded body text; empty if no charset in the cascade could decode
    pub body: String,
    /// Response headers, lowercased names
    pub headers: HashMap<String, String>,
}

/// Fetches one URL and decodes its body
///
/// Non-2xx statuses and transport errors are reported as typed failures;
/// the caller decides whether to swallow them. Redirects are followed by
/// the client.
pub async fn fetch_page(client: &Client, url: &str, headers: &HeaderMap) -> FetchResult<FetchedPage> {
    let response = client
        .get(url)
        .headers(headers.clone())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let response_headers: HashMap<String, String> = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_lowercase(),
                value.to_str().unwrap_or("").to_string(),
            )
        })
        .collect();

    let content_type = response_headers.get("content-type").cloned();

    let bytes = response
        .bytes()
        .await
        .map_err(|e| classify_error(url, e))?;

    // The cascade returns empty text when nothing decodes; that is still
    // a successful fetch with no usable content.
    let body = decode_body(&bytes, content_type.as_deref()).unwrap_or_default();

    Ok(FetchedPage {
        url: url.to_string(),
        body,
        headers: response_headers,
    })
}

fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            source: error,
        }
    }
}
