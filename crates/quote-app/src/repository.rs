//! Repository adapters for the price sheet source

use std::path::PathBuf;

use quote_domain::repository::PriceSheetRepository;
use quote_infra::persistence::{FilePriceSheetRepository, HttpPriceSheetRepository};
use quote_types::Result;

use crate::config::Config;

/// Open the configured price sheet source: the local file when one is set,
/// otherwise the published URL
pub fn open_price_repo(config: &Config) -> Result<Box<dyn PriceSheetRepository + Send>> {
    match config.price_file {
        Some(ref path) => Ok(Box::new(open_file_repo(path.clone()))),
        None => Ok(Box::new(open_http_repo(config)?)),
    }
}

/// Open the HTTP price sheet repository
pub fn open_http_repo(config: &Config) -> Result<HttpPriceSheetRepository> {
    HttpPriceSheetRepository::new(&config.sheet_url, config.timeout())
}

/// Open a local CSV price sheet
pub fn open_file_repo(csv_path: PathBuf) -> FilePriceSheetRepository {
    FilePriceSheetRepository::new(csv_path)
}
