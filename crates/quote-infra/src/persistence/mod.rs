//! Repository implementations
//!
//! Sheet sources behind the `PriceSheetRepository` trait: the published HTTP
//! export and a local CSV file.

mod file_price_sheet_repo;
mod http_price_sheet_repo;

pub use file_price_sheet_repo::FilePriceSheetRepository;
pub use http_price_sheet_repo::HttpPriceSheetRepository;
