//! Social profile link detection

use crate::record::{Platform, SocialLinks};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use scraper::{Html, Selector};
use url::Url;

/// One recognizer per platform, in the fixed platform order
static SOCIAL_PATTERNS: Lazy<Vec<(Platform, Regex)>> = Lazy::new(|| {
    [
        (Platform::Facebook, r"facebook\.com/[\w.]+"),
        (
            Platform::Linkedin,
            r"linkedin\.com/(?:company/[\w-]+|in/[\w-]+)",
        ),
        (Platform::Instagram, r"instagram\.com/[\w.]+"),
        (Platform::Twitter, r"(?:twitter\.com|x\.com)/[\w]+"),
        (
            Platform::Youtube,
            r"youtube\.com/(?:user/|channel/|c/)?[\w-]+",
        ),
        (Platform::Github, r"github\.com/[\w-]+"),
        (Platform::Pinterest, r"pinterest\.(?:com|fr)/[\w-]+"),
        (Platform::Tiktok, r"(?:tiktok\.com|vm\.tiktok\.com)/@?[\w.]+"),
        (Platform::Snapchat, r"snapchat\.com/add/[\w-]+"),
        (Platform::Houzz, r"houzz\.(?:com|fr)/[\w-]+"),
        (Platform::Google, r"(?:plus\.google\.com|g\.page)/[\w.+]+"),
        (Platform::Yelp, r"yelp\.(?:com|fr)/[\w-]+"),
        (Platform::Nextdoor, r"nextdoor\.(?:com|fr)/[\w-]+"),
    ]
    .iter()
    .map(|(platform, pattern)| {
        (
            *platform,
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .unwrap(),
        )
    })
    .collect()
});

/// Finds social profile URLs in `<a href>` targets and Open-Graph /
/// Twitter meta content
///
/// Hrefs are resolved to absolute against the page URL before matching.
/// Within one page the last match per platform wins; the cross-page
/// policy is the aggregator's concern.
pub fn extract_social_links(document: &Html, base_url: &Url) -> SocialLinks {
    let mut links = SocialLinks::default();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            let href = match element.value().attr("href") {
                Some(h) => h,
                None => continue,
            };
            let absolute = match base_url.join(href) {
                Ok(u) => u.to_string(),
                Err(_) => href.to_string(),
            };
            for (platform, pattern) in SOCIAL_PATTERNS.iter() {
                if pattern.is_match(&absolute) {
                    links.set(*platform, absolute.clone());
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse("meta[property]") {
        for element in document.select(&selector) {
            let property = element.value().attr("property").unwrap_or("");
            if !property.contains("og:") && !property.contains("twitter:") {
                continue;
            }
            let content = match element.value().attr("content") {
                Some(c) if !c.is_empty() => c,
                _ => continue,
            };
            for (platform, pattern) in SOCIAL_PATTERNS.iter() {
                if pattern.is_match(content) {
                    links.set(*platform, content.to_string());
                }
            }
        }
    }

    links
}
