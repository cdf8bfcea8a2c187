//! Repository trait definitions for loading the price sheet

use crate::model::PriceTable;
use quote_types::Result;

/// Source of the price sheet (published spreadsheet export or a local file)
pub trait PriceSheetRepository {
    /// Raw sheet text exactly as published
    fn fetch_text(&self) -> Result<String>;

    /// Parsed price table. All-or-nothing: a failed fetch yields no table.
    fn load(&self) -> Result<PriceTable>;

    /// Human readable description of where the sheet comes from
    fn describe(&self) -> String;
}
