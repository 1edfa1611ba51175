//! Priority-page classification
//!
//! A "priority page" is a same-domain URL whose path matches one of the
//! contact/about/legal pattern families. Only these pages (plus the root)
//! are fetched and extracted from.

use crate::record::PageType;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Path patterns marking a page as worth extracting from
static PRIORITY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"contact",
        r"about",
        r"apropos",
        r"qui-sommes-nous",
        r"about-us",
        r"contactez-nous",
        r"contact-us",
        r"mentions-legales",
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){}", p)).unwrap())
    .collect()
});

/// Returns true if the URL path matches a priority pattern family
pub fn is_priority_page(url: &Url) -> bool {
    let path = url.path().to_lowercase();
    PRIORITY_PATTERNS.iter().any(|p| p.is_match(&path))
}

/// Classifies a crawled page by its URL
///
/// Strips scheme, `www.`, query, fragment and any trailing slash, then
/// matches on the path ending. A URL reduced to its bare domain is the
/// home page.
pub fn classify_page_type(url: &str) -> PageType {
    let lower = url.to_lowercase();

    let mut clean = lower
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.")
        .to_string();
    if let Some(idx) = clean.find(['?', '#']) {
        clean.truncate(idx);
    }
    if clean.ends_with('/') {
        clean.pop();
    }

    if !clean.contains('/') {
        return PageType::Home;
    }

    if clean.ends_with("/contact") {
        PageType::Contact
    } else if clean.ends_with("/mentions-legales") {
        PageType::Legal
    } else if clean.ends_with("/a-propos") || clean.ends_with("/about") {
        PageType::About
    } else {
        PageType::Other
    }
}
