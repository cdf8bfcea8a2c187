//! Domain services

pub mod plan_classifier;
pub mod pricing;
pub mod quote_summary;
pub mod selection;

pub use plan_classifier::{classify_plans, plan_label};
pub use pricing::{base_price, final_price, format_amount, total_discount};
pub use quote_summary::{
    build_summary, quote_totals, render_receipt, DiscountLine, QuoteSummary, QuoteTotals,
};
pub use selection::QuoteSelection;
