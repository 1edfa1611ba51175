//! JSON export

use crate::record::SiteRecord;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Serializes the records to pretty-printed JSON
pub fn write_json(records: &[SiteRecord], path: &Path) -> crate::Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), records)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ContactRecord;
    use tempfile::tempdir;

    #[test]
    fn test_written_json_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");

        let records = vec![SiteRecord {
            domain: "example.fr".to_string(),
            emails: vec![ContactRecord::new("a@example.fr", "https://example.fr/")],
            ..Default::default()
        }];
        write_json(&records, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<SiteRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].domain, "example.fr");
        assert_eq!(parsed[0].emails[0].value, "a@example.fr");
    }

    #[test]
    fn test_phones_serialized_as_phone_numbers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");

        let records = vec![SiteRecord {
            domain: "example.fr".to_string(),
            phones: vec![ContactRecord::new("+33123456789", "https://example.fr/")],
            ..Default::default()
        }];
        write_json(&records, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("phone_numbers"));
    }
}
