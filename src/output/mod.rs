//! Result serialization
//!
//! Each run writes the full list of site records twice: nested JSON and
//! a flat one-row-per-site CSV, both under timestamped filenames in
//! `json/` and `csv/` subdirectories of the output directory.

mod csv_export;
mod json_export;

pub use csv_export::write_csv;
pub use json_export::write_json;

use crate::record::SiteRecord;
use chrono::Local;
use std::path::{Path, PathBuf};

/// Writes JSON and CSV exports, returning both paths
pub fn save_results(records: &[SiteRecord], base_dir: &Path) -> crate::Result<(PathBuf, PathBuf)> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();

    let json_dir = base_dir.join("json");
    std::fs::create_dir_all(&json_dir)?;
    let json_path = json_dir.join(format!("scraping_results_{}.json", timestamp));
    write_json(records, &json_path)?;

    let csv_dir = base_dir.join("csv");
    std::fs::create_dir_all(&csv_dir)?;
    let csv_path = csv_dir.join(format!("scraping_results_{}.csv", timestamp));
    write_csv(records, &csv_path)?;

    Ok((json_path, csv_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_results_creates_both_files() {
        let dir = tempdir().unwrap();
        let records = vec![SiteRecord {
            domain: "example.fr".to_string(),
            ..Default::default()
        }];

        let (json_path, csv_path) = save_results(&records, dir.path()).unwrap();
        assert!(json_path.exists());
        assert!(csv_path.exists());
        assert!(json_path.starts_with(dir.path().join("json")));
        assert!(csv_path.starts_with(dir.path().join("csv")));
    }
}
