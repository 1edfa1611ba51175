use url::Url;

/// Extracts the lowercase host of a URL, including any subdomain
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true when two URLs share the same host (and port, if any)
///
/// Port matters because the crawl must stay on the exact authority it
/// started from; `www.` is not stripped, matching the discovery rule
/// that only links on the same netloc are followed.
pub fn same_domain(a: &Url, b: &Url) -> bool {
    extract_domain(a) == extract_domain(b) && a.port() == b.port()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domain_lowercases() {
        let url = Url::parse("https://EXAMPLE.com/page").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_same_domain() {
        let a = Url::parse("https://example.com/").unwrap();
        let b = Url::parse("https://example.com/contact").unwrap();
        assert!(same_domain(&a, &b));
    }

    #[test]
    fn test_subdomain_is_different() {
        let a = Url::parse("https://example.com/").unwrap();
        let b = Url::parse("https://blog.example.com/").unwrap();
        assert!(!same_domain(&a, &b));
    }

    #[test]
    fn test_different_port_is_different() {
        let a = Url::parse("http://127.0.0.1:8080/").unwrap();
        let b = Url::parse("http://127.0.0.1:9090/").unwrap();
        assert!(!same_domain(&a, &b));
    }
}
