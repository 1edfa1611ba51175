//! Same-domain link discovery

use crate::url::{normalize_link, same_domain};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts all same-domain links from a page
///
/// Links are resolved against `base_url`, restricted to HTTP(S) on the
/// same host, normalized (fragment stripped, trailing slash collapsed)
/// and deduplicated while preserving document order.
///
/// Skipped outright: empty hrefs, fragments, `javascript:`, `mailto:`
/// and `tel:` targets.
pub fn extract_same_domain_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let href = match element.value().attr("href") {
            Some(h) => h.trim(),
            None => continue,
        };
        if href.is_empty()
            || href.starts_with('#')
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
        {
            continue;
        }

        let absolute = match base_url.join(href) {
            Ok(u) => u,
            Err(_) => continue,
        };
        if absolute.scheme() != "http" && absolute.scheme() != "https" {
            continue;
        }
        if !same_domain(&absolute, base_url) {
            continue;
        }

        let normalized = normalize_link(&absolute);
        if seen.insert(normalized.clone()) {
            links.push(normalized);
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    #[test]
    fn test_relative_links_resolved() {
        let html = r#"<a href="/contact">Contact</a>"#;
        let links = extract_same_domain_links(html, &base());
        assert_eq!(links, vec!["https://example.com/contact"]);
    }

    #[test]
    fn test_external_links_dropped() {
        let html = r#"
            <a href="/about">About</a>
            <a href="https://other.com/page">External</a>
        "#;
        let links = extract_same_domain_links(html, &base());
        assert_eq!(links, vec!["https://example.com/about"]);
    }

    #[test]
    fn test_subdomain_links_dropped() {
        let html = r#"<a href="https://blog.example.com/post">Blog</a>"#;
        assert!(extract_same_domain_links(html, &base()).is_empty());
    }

    #[test]
    fn test_special_schemes_skipped() {
        let html = r##"
            <a href="mailto:x@example.com">Mail</a>
            <a href="tel:+33123456789">Call</a>
            <a href="javascript:void(0)">JS</a>
            <a href="#top">Anchor</a>
            <a href="">Empty</a>
        "##;
        assert!(extract_same_domain_links(html, &base()).is_empty());
    }

    #[test]
    fn test_dedup_preserves_order() {
        let html = r#"
            <a href="/contact">One</a>
            <a href="/about">Two</a>
            <a href="/contact/">Dup with slash</a>
            <a href="/contact#form">Dup with fragment</a>
        "#;
        let links = extract_same_domain_links(html, &base());
        assert_eq!(
            links,
            vec![
                "https://example.com/contact",
                "https://example.com/about"
            ]
        );
    }

    #[test]
    fn test_query_preserved() {
        let html = r#"<a href="/contact?lang=fr">Contact</a>"#;
        let links = extract_same_domain_links(html, &base());
        assert_eq!(links, vec!["https://example.com/contact?lang=fr"]);
    }
}
