//! HTTP implementation of PriceSheetRepository

use std::time::Duration;

use quote_domain::model::PriceTable;
use quote_domain::repository::PriceSheetRepository;
use quote_types::{Error, Result};

use crate::price_csv::parse_price_table;
use crate::sheet_fetcher::SheetFetcher;

/// Published spreadsheet export fetched over HTTP.
///
/// The async fetch runs on a private current-thread runtime so callers (CLI,
/// GUI worker thread) stay synchronous.
pub struct HttpPriceSheetRepository {
    fetcher: SheetFetcher,
}

impl HttpPriceSheetRepository {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let fetcher = SheetFetcher::new(url, timeout)?;
        Ok(Self { fetcher })
    }
}

impl PriceSheetRepository for HttpPriceSheetRepository {
    fn fetch_text(&self) -> Result<String> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Runtime(e.to_string()))?;
        runtime
            .block_on(self.fetcher.fetch_text())
            .map_err(Into::into)
    }

    fn load(&self) -> Result<PriceTable> {
        Ok(parse_price_table(&self.fetch_text()?))
    }

    fn describe(&self) -> String {
        format!("sheet {}", self.fetcher.url())
    }
}
