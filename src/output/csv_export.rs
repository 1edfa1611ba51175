//! Flat CSV export
//!
//! One row per site. List fields are flattened positionally
//! (`email_0`, `email_0_sources`, `page_1_url`, ...), maps by key
//! (`social_facebook`, `tech_cms`, `header_server`, `company_siren`).
//! The header is the union of keys across all rows, in first-seen
//! order; missing cells are left empty.

use crate::record::{Platform, SiteRecord};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Writes the records as a flat CSV file
pub fn write_csv(records: &[SiteRecord], path: &Path) -> crate::Result<()> {
    let rows: Vec<Vec<(String, String)>> = records.iter().map(flatten_record).collect();

    let mut columns: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for row in &rows {
        for (key, _) in row {
            if seen.insert(key.clone()) {
                columns.push(key.clone());
            }
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    if !columns.is_empty() {
        writer.write_record(&columns)?;
    }

    for row in &rows {
        let cells: HashMap<&str, &str> = row
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let record: Vec<&str> = columns
            .iter()
            .map(|column| cells.get(column.as_str()).copied().unwrap_or(""))
            .collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Flattens one site record into ordered key/value cells
fn flatten_record(record: &SiteRecord) -> Vec<(String, String)> {
    let mut cells = vec![("domain".to_string(), record.domain.clone())];

    for (i, page) in record.crawled_pages.iter().enumerate() {
        cells.push((format!("page_{}_url", i), page.url.clone()));
        let page_type = serde_json::to_value(page.page_type)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        cells.push((format!("page_{}_type", i), page_type));
    }

    for (i, email) in record.emails.iter().enumerate() {
        cells.push((format!("email_{}", i), email.value.clone()));
        cells.push((format!("email_{}_sources", i), email.sources.join("|")));
    }

    for (i, phone) in record.phones.iter().enumerate() {
        cells.push((format!("phone_{}", i), phone.value.clone()));
        cells.push((format!("phone_{}_sources", i), phone.sources.join("|")));
    }

    for platform in Platform::ALL {
        if let Some(url) = record.social_media.get(platform) {
            cells.push((format!("social_{}", platform.name()), url.to_string()));
        }
    }

    for (category, techs) in record.technologies.categories() {
        if !techs.is_empty() {
            cells.push((format!("tech_{}", category), techs.join(",")));
        }
    }

    for (name, value) in record.headers_info.fields() {
        cells.push((format!("header_{}", name), value.to_string()));
    }

    for (name, value) in record.security_headers.fields() {
        cells.push((format!("security_{}", name), value.to_string()));
    }

    let company = &record.company_info;
    for (name, value) in [
        ("company_siren", &company.siren),
        ("company_siret", &company.siret),
        ("company_tva", &company.tva),
        ("company_source", &company.source),
    ] {
        cells.push((name.to_string(), value.clone().unwrap_or_default()));
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ContactRecord, CrawledPage, PageType, TechCategory};
    use tempfile::tempdir;

    fn sample_record() -> SiteRecord {
        let mut record = SiteRecord {
            domain: "example.fr".to_string(),
            ..Default::default()
        };
        record.crawled_pages.push(CrawledPage {
            url: "https://example.fr/".to_string(),
            page_type: PageType::Home,
        });
        record.crawled_pages.push(CrawledPage {
            url: "https://example.fr/contact".to_string(),
            page_type: PageType::Contact,
        });
        record.emails.push(ContactRecord {
            value: "a@example.fr".to_string(),
            sources: vec![
                "https://example.fr/".to_string(),
                "https://example.fr/contact".to_string(),
            ],
        });
        record.social_media.set(
            Platform::Facebook,
            "https://facebook.com/acme".to_string(),
        );
        record.technologies.push(TechCategory::Cms, "wordpress");
        record.technologies.push(TechCategory::Cms, "drupal");
        record.company_info.siren = Some("732829320".to_string());
        record
    }

    #[test]
    fn test_positional_flattening() {
        let cells = flatten_record(&sample_record());
        let map: HashMap<_, _> = cells.into_iter().collect();

        assert_eq!(map["page_0_url"], "https://example.fr/");
        assert_eq!(map["page_0_type"], "home");
        assert_eq!(map["page_1_type"], "contact");
        assert_eq!(map["email_0"], "a@example.fr");
        assert_eq!(
            map["email_0_sources"],
            "https://example.fr/|https://example.fr/contact"
        );
        assert_eq!(map["social_facebook"], "https://facebook.com/acme");
        assert_eq!(map["tech_cms"], "wordpress,drupal");
        assert_eq!(map["company_siren"], "732829320");
        assert_eq!(map["company_siret"], "");
    }

    #[test]
    fn test_header_is_union_of_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let first = sample_record();
        let mut second = SiteRecord {
            domain: "other.fr".to_string(),
            ..Default::default()
        };
        second
            .phones
            .push(ContactRecord::new("+33123456789", "https://other.fr/"));

        write_csv(&[first, second], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        // Columns from both rows are present
        assert!(header.contains("email_0"));
        assert!(header.contains("phone_0"));

        let rows: Vec<&str> = content.lines().collect();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_no_records_produce_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&[], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.is_empty());
    }
}
