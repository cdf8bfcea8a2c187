//! Infrastructure layer - price sheet parsing, fetching, repository implementations

pub mod persistence;
pub mod price_csv;
pub mod sheet_fetcher;
