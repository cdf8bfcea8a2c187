//! File-based implementation of PriceSheetRepository

use std::path::{Path, PathBuf};

use tracing::debug;

use quote_domain::model::PriceTable;
use quote_domain::repository::PriceSheetRepository;
use quote_types::{Error, Result};

use crate::price_csv::{decode_sheet_bytes, parse_price_table};

/// Price sheet stored as a local CSV export
pub struct FilePriceSheetRepository {
    csv_path: PathBuf,
}

impl FilePriceSheetRepository {
    pub fn new(csv_path: PathBuf) -> Self {
        Self { csv_path }
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

impl PriceSheetRepository for FilePriceSheetRepository {
    fn fetch_text(&self) -> Result<String> {
        if !self.csv_path.exists() {
            return Err(Error::Fetch(format!(
                "price file not found: {}",
                self.csv_path.display()
            )));
        }
        debug!(path = %self.csv_path.display(), "reading price sheet");
        let bytes = std::fs::read(&self.csv_path)?;
        Ok(decode_sheet_bytes(&bytes))
    }

    fn load(&self) -> Result<PriceTable> {
        Ok(parse_price_table(&self.fetch_text()?))
    }

    fn describe(&self) -> String {
        format!("file {}", self.csv_path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        std::fs::write(
            &path,
            "\u{feff}A,B,C,現金,12#期\nk1,ModelX,V1,50000,36000\n",
        )
        .unwrap();

        let repo = FilePriceSheetRepository::new(path);
        let table = repo.load().unwrap();
        assert_eq!(table.model_names(), vec!["ModelX"]);
        assert_eq!(table.version("ModelX", "V1").unwrap().price("現金"), Some(50000));
    }

    #[test]
    fn test_missing_file_is_load_failure() {
        let dir = tempdir().unwrap();
        let repo = FilePriceSheetRepository::new(dir.path().join("missing.csv"));
        let err = repo.load().unwrap_err();
        assert!(err.is_load_failure());
    }
}
