use crate::UrlError;
use url::Url;

/// Normalizes a user-supplied root URL
///
/// Bare domains get an `https://` scheme prepended; inputs that already
/// carry a scheme are parsed as-is, and anything non-HTTP(S) is
/// rejected rather than silently rewritten.
///
/// # Examples
///
/// ```
/// use leadscout::url::normalize_root_url;
///
/// let url = normalize_root_url("example.com").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/");
///
/// let url = normalize_root_url("http://example.com/shop").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/shop");
/// ```
pub fn normalize_root_url(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }
    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Normalizes a discovered link to its canonical comparison form
///
/// Keeps scheme, host, path and query; strips the fragment; collapses a
/// trailing slash on non-root paths so `/contact` and `/contact/` are
/// the same candidate.
pub fn normalize_link(url: &Url) -> String {
    let host = url.host_str().unwrap_or("");
    let port = url
        .port()
        .map(|p| format!(":{}", p))
        .unwrap_or_default();

    let mut path = url.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        path.pop();
    }

    let mut normalized = format!("{}://{}{}{}", url.scheme(), host, port, path);
    if let Some(query) = url.query() {
        normalized.push('?');
        normalized.push_str(query);
    }
    normalized
}
