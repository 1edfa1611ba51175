//! Per-page extraction pipeline
//!
//! Runs the four detectors (contact, social, company, technology) over
//! one fetched page. Extraction is a pure function of the page content
//! and URL; the only shared state is the phone normalizer's memoization
//! cache. Parsing and matching are synchronous and CPU-bound, so callers
//! run them on the blocking pool.

mod company;
mod contact;
mod phone;
mod social;
mod tables;
mod tech;

pub use company::{extract_company_info, validate_siren, validate_siret, validate_tva};
pub use phone::{is_excluded, PhoneNormalizer};

use crate::fetch::FetchedPage;
use crate::record::{CompanyInfo, HeadersInfo, SecurityHeaders, SocialLinks, TechFingerprint};
use scraper::Html;
use url::Url;

/// Everything the detectors found on one page
#[derive(Debug, Clone, Default)]
pub struct PageExtraction {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub social: SocialLinks,
    pub company: CompanyInfo,
    pub technologies: TechFingerprint,
    pub headers_info: HeadersInfo,
    pub security_headers: SecurityHeaders,
}

/// Runs all detectors against one fetched page
pub fn extract_page(page: &FetchedPage, normalizer: &PhoneNormalizer) -> PageExtraction {
    let document = Html::parse_document(&page.body);
    let visible = visible_text(&document);

    let (emails, phones) = contact::extract_contacts(&document, &page.body, &visible, normalizer);

    let social = match Url::parse(&page.url) {
        Ok(base) => social::extract_social_links(&document, &base),
        Err(_) => SocialLinks::default(),
    };

    let company = company::extract_company_info(&visible, &page.url);
    let technologies = tech::detect_technologies(&document, &page.body, &page.headers);
    let headers_info = tech::headers_info(&page.headers);
    let security_headers = tech::security_headers(&page.headers);

    PageExtraction {
        emails,
        phones,
        social,
        company,
        technologies,
        headers_info,
        security_headers,
    }
}

/// All text content of the document joined with spaces
fn visible_text(document: &Html) -> String {
    document
        .root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn page(body: &str) -> FetchedPage {
        FetchedPage {
            url: "https://example.fr/contact".to_string(),
            body: body.to_string(),
            headers: HashMap::from([("server".to_string(), "nginx".to_string())]),
        }
    }

    #[test]
    fn test_extract_page_runs_all_detectors() {
        let body = r#"
            <html><body>
            <p>Contactez-nous: contact@example.fr</p>
            <p>Tél: 01 23 45 67 89</p>
            <a href="https://facebook.com/acme">Facebook</a>
            <p>SIREN : 732829320</p>
            </body></html>
        "#;
        let normalizer = PhoneNormalizer::new();
        let result = extract_page(&page(body), &normalizer);

        assert_eq!(result.emails, vec!["contact@example.fr"]);
        assert_eq!(result.phones, vec!["+33123456789"]);
        assert_eq!(
            result.social.facebook.as_deref(),
            Some("https://facebook.com/acme")
        );
        assert_eq!(result.company.siren.as_deref(), Some("732829320"));
        assert_eq!(result.technologies.servers, vec!["nginx"]);
        assert_eq!(result.headers_info.server, "nginx");
    }

    #[test]
    fn test_extract_empty_page() {
        let normalizer = PhoneNormalizer::new();
        let result = extract_page(&page("<html></html>"), &normalizer);

        assert!(result.emails.is_empty());
        assert!(result.phones.is_empty());
        assert!(result.company.is_empty());
        assert_eq!(result.technologies.servers, vec!["nginx"]);
    }
}
