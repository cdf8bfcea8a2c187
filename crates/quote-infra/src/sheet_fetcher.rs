//! HTTP client for the published price sheet
//!
//! One GET to the export URL; the body is returned as text. There is no retry:
//! a failed fetch is reported once and the caller decides what to show.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};

use crate::price_csv::decode_sheet_bytes;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

impl From<FetchError> for quote_types::Error {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Status(code) => quote_types::Error::HttpStatus(code),
            other => quote_types::Error::Fetch(other.to_string()),
        }
    }
}

/// HTTP client wrapper for the price sheet export URL
pub struct SheetFetcher {
    client: Client,
    url: String,
}

impl SheetFetcher {
    /// Create a fetcher with a request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the sheet body as text
    ///
    /// # Errors
    /// - the request cannot be sent (DNS, TLS, timeout)
    /// - the response status is not 2xx
    /// - the body cannot be read
    pub async fn fetch_text(&self) -> Result<String, FetchError> {
        debug!(url = %self.url, "fetching price sheet");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(FetchError::Body)?;
        info!(bytes = bytes.len(), "price sheet downloaded");
        Ok(decode_sheet_bytes(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_creation() {
        let url = "https://example.com/pub?output=csv";
        let fetcher = SheetFetcher::new(url, Duration::from_secs(5)).unwrap();
        assert_eq!(fetcher.url(), url);
    }

    #[test]
    fn test_status_maps_to_http_status_error() {
        let err: quote_types::Error = FetchError::Status(503).into();
        assert!(matches!(err, quote_types::Error::HttpStatus(503)));
        assert!(err.is_load_failure());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let fetcher = SheetFetcher::new("http://127.0.0.1:9/sheet.csv", Duration::from_secs(2)).unwrap();
        let result = fetcher.fetch_text().await;
        assert!(matches!(result, Err(FetchError::Network(_))));
    }
}
