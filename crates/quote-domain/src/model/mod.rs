//! Domain model types

pub mod discount;
pub mod plan_option;
pub mod price_table;

pub use discount::{DiscountField, DiscountSelection};
pub use plan_option::{PlanCategory, PlanOption, PlanOptions};
pub use price_table::{ModelEntry, PlanPrice, PriceTable, VersionEntry, VersionRecord};
