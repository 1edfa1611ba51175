//! Cross-page merge into one site record
//!
//! Pages are fed in crawl order (root first, then priority pages in
//! discovery order), never in completion order: every policy below is
//! "first wins" in some form and depends on it.

use crate::extract::PageExtraction;
use crate::record::{ContactRecord, CrawledPage, Platform, SiteRecord};
use crate::url::classify_page_type;

/// Accumulates per-page extractions for one site
///
/// Merge policies:
/// - emails/phones: union by normalized value, each occurrence appending
///   its page URL to `sources` (deduplicated, insertion-ordered)
/// - social links: first page to set a platform wins; later pages never
///   overwrite (unlike the within-page last-match-wins scan)
/// - technology fingerprint and header summaries: taken from the first
///   page with any technology detection, then frozen
/// - company info: three independent first-valid-wins slots (siren,
///   siret, tva)
pub struct SiteAggregator {
    record: SiteRecord,
    tech_locked: bool,
}

impl SiteAggregator {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            record: SiteRecord {
                domain: domain.into(),
                ..Default::default()
            },
            tech_locked: false,
        }
    }

    /// Merges one page's extraction, in crawl order
    pub fn add_page(&mut self, page_url: &str, extraction: &PageExtraction) {
        self.record.crawled_pages.push(CrawledPage {
            url: page_url.to_string(),
            page_type: classify_page_type(page_url),
        });

        for email in &extraction.emails {
            merge_contact(&mut self.record.emails, email, page_url);
        }
        for phone in &extraction.phones {
            merge_contact(&mut self.record.phones, phone, page_url);
        }

        for platform in Platform::ALL {
            if self.record.social_media.get(platform).is_none() {
                if let Some(url) = extraction.social.get(platform) {
                    self.record.social_media.set(platform, url.to_string());
                }
            }
        }

        if !self.tech_locked && !extraction.technologies.is_empty() {
            self.record.technologies = extraction.technologies.clone();
            self.record.headers_info = extraction.headers_info.clone();
            self.record.security_headers = extraction.security_headers.clone();
            self.tech_locked = true;
        }

        let company = &mut self.record.company_info;
        let mut contributed = false;
        if company.siren.is_none() {
            if let Some(siren) = &extraction.company.siren {
                company.siren = Some(siren.clone());
                contributed = true;
            }
        }
        if company.siret.is_none() {
            if let Some(siret) = &extraction.company.siret {
                company.siret = Some(siret.clone());
                contributed = true;
            }
        }
        if company.tva.is_none() {
            if let Some(tva) = &extraction.company.tva {
                company.tva = Some(tva.clone());
                contributed = true;
            }
        }
        if contributed && company.source.is_none() {
            company.source = Some(page_url.to_string());
        }
    }

    /// Returns the merged record
    pub fn finish(self) -> SiteRecord {
        self.record
    }
}

fn merge_contact(records: &mut Vec<ContactRecord>, value: &str, source: &str) {
    match records.iter_mut().find(|r| r.value == value) {
        Some(existing) => existing.add_source(source),
        None => records.push(ContactRecord::new(value, source)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CompanyInfo, TechCategory};

    fn extraction() -> PageExtraction {
        PageExtraction::default()
    }

    #[test]
    fn test_contact_union_with_sources() {
        let mut aggregator = SiteAggregator::new("example.fr");

        let mut first = extraction();
        first.emails.push("a@example.fr".to_string());
        aggregator.add_page("https://example.fr/", &first);

        let mut second = extraction();
        second.emails.push("a@example.fr".to_string());
        second.emails.push("b@example.fr".to_string());
        aggregator.add_page("https://example.fr/contact", &second);

        let record = aggregator.finish();
        assert_eq!(record.emails.len(), 2);
        assert_eq!(
            record.emails[0].sources,
            vec!["https://example.fr/", "https://example.fr/contact"]
        );
        assert_eq!(record.emails[1].sources, vec!["https://example.fr/contact"]);
    }

    #[test]
    fn test_merge_same_page_twice_is_idempotent() {
        let mut aggregator = SiteAggregator::new("example.fr");
        let mut page = extraction();
        page.phones.push("+33123456789".to_string());

        aggregator.add_page("https://example.fr/", &page);
        aggregator.add_page("https://example.fr/", &page);

        let record = aggregator.finish();
        assert_eq!(record.phones.len(), 1);
        assert_eq!(record.phones[0].sources, vec!["https://example.fr/"]);
    }

    #[test]
    fn test_social_first_page_wins() {
        let mut aggregator = SiteAggregator::new("example.fr");

        let mut first = extraction();
        first
            .social
            .set(Platform::Facebook, "https://facebook.com/first".to_string());
        aggregator.add_page("https://example.fr/", &first);

        let mut second = extraction();
        second
            .social
            .set(Platform::Facebook, "https://facebook.com/second".to_string());
        second
            .social
            .set(Platform::Twitter, "https://twitter.com/acme".to_string());
        aggregator.add_page("https://example.fr/contact", &second);

        let record = aggregator.finish();
        assert_eq!(
            record.social_media.get(Platform::Facebook),
            Some("https://facebook.com/first")
        );
        assert_eq!(
            record.social_media.get(Platform::Twitter),
            Some("https://twitter.com/acme")
        );
    }

    #[test]
    fn test_tech_frozen_after_first_detection() {
        let mut aggregator = SiteAggregator::new("example.fr");

        aggregator.add_page("https://example.fr/", &extraction());

        let mut second = extraction();
        second.technologies.push(TechCategory::Cms, "wordpress");
        second.headers_info.server = "nginx".to_string();
        aggregator.add_page("https://example.fr/contact", &second);

        let mut third = extraction();
        third.technologies.push(TechCategory::Cms, "drupal");
        aggregator.add_page("https://example.fr/about", &third);

        let record = aggregator.finish();
        assert_eq!(record.technologies.cms, vec!["wordpress"]);
        assert_eq!(record.headers_info.server, "nginx");
    }

    #[test]
    fn test_company_slots_independent() {
        let mut aggregator = SiteAggregator::new("example.fr");

        let mut first = extraction();
        first.company = CompanyInfo {
            tva: Some("FR32732829320".to_string()),
            source: Some("https://example.fr/".to_string()),
            ..Default::default()
        };
        aggregator.add_page("https://example.fr/", &first);

        let mut second = extraction();
        second.company = CompanyInfo {
            siren: Some("732829320".to_string()),
            source: Some("https://example.fr/mentions-legales".to_string()),
            ..Default::default()
        };
        aggregator.add_page("https://example.fr/mentions-legales", &second);

        let record = aggregator.finish();
        assert_eq!(record.company_info.tva.as_deref(), Some("FR32732829320"));
        assert_eq!(record.company_info.siren.as_deref(), Some("732829320"));
        // The first contributing page is kept as the source
        assert_eq!(
            record.company_info.source.as_deref(),
            Some("https://example.fr/")
        );
    }

    #[test]
    fn test_siret_derived_siren_not_overwritten() {
        let mut aggregator = SiteAggregator::new("example.fr");

        let mut first = extraction();
        first.company = CompanyInfo {
            siren: Some("732829320".to_string()),
            siret: Some("73282932000074".to_string()),
            source: Some("https://example.fr/mentions-legales".to_string()),
            ..Default::default()
        };
        aggregator.add_page("https://example.fr/mentions-legales", &first);

        let mut second = extraction();
        second.company = CompanyInfo {
            siren: Some("552032534".to_string()),
            source: Some("https://example.fr/about".to_string()),
            ..Default::default()
        };
        aggregator.add_page("https://example.fr/about", &second);

        let record = aggregator.finish();
        assert_eq!(record.company_info.siren.as_deref(), Some("732829320"));
        assert_eq!(record.company_info.siret.as_deref(), Some("73282932000074"));
    }

    #[test]
    fn test_crawled_pages_classified() {
        let mut aggregator = SiteAggregator::new("example.fr");
        aggregator.add_page("https://example.fr/", &extraction());
        aggregator.add_page("https://example.fr/contact", &extraction());

        let record = aggregator.finish();
        assert_eq!(record.crawled_pages.len(), 2);
        assert_eq!(record.crawled_pages[0].page_type, crate::record::PageType::Home);
        assert_eq!(
            record.crawled_pages[1].page_type,
            crate::record::PageType::Contact
        );
    }
}
