//! Selection state controller
//!
//! Holds the user's model / version / plan / rebate choices. Setters apply the
//! reset cascade (model → version → plan); `reconcile` fills in defaults after
//! any change and never overrides an explicit choice.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{DiscountField, DiscountSelection, PriceTable, VersionRecord};
use crate::service::plan_classifier::classify_plans;

/// Current choices of the quotation screen. Empty strings mean "not selected".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSelection {
    pub model: String,
    pub version: String,
    pub plan_key: String,
    pub discounts: DiscountSelection,
}

impl QuoteSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a model; clears version and plan
    pub fn set_model(&mut self, name: &str) {
        self.model = name.to_string();
        self.version.clear();
        self.plan_key.clear();
    }

    /// Select a version; clears plan, keeps model
    pub fn set_version(&mut self, name: &str) {
        self.version = name.to_string();
        self.plan_key.clear();
    }

    pub fn set_plan_key(&mut self, key: &str) {
        self.plan_key = key.to_string();
    }

    pub fn toggle_discount(&mut self, field: DiscountField) {
        self.discounts.toggle(field);
    }

    /// Record of the selected (model, version), if both resolve
    pub fn current_record<'a>(&self, table: &'a PriceTable) -> Option<&'a VersionRecord> {
        if self.model.is_empty() || self.version.is_empty() {
            return None;
        }
        table.version(&self.model, &self.version)
    }

    /// Whether enough is chosen to show a summary
    pub fn is_complete(&self, table: &PriceTable) -> bool {
        self.current_record(table).is_some() && !self.plan_key.is_empty()
    }

    /// Apply the auto-default rules against the current table.
    ///
    /// Returns true when anything changed. The version default is applied
    /// before the plan default, so one call settles both.
    pub fn reconcile(&mut self, table: &PriceTable) -> bool {
        let mut changed = false;

        if !self.model.is_empty() && self.version.is_empty() {
            if let Some(first) = table.version_names(&self.model).first() {
                debug!(model = %self.model, version = %first, "defaulting version");
                self.version = first.to_string();
                changed = true;
            }
        }

        if self.plan_key.is_empty() {
            if let Some(record) = self.current_record(table) {
                if let Some(option) = classify_plans(record).default_option() {
                    debug!(version = %self.version, plan = %option.key, "defaulting plan");
                    self.plan_key = option.key.clone();
                    changed = true;
                }
            }
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlanPrice;

    fn record(prices: &[(&str, i64)]) -> VersionRecord {
        VersionRecord {
            prices: prices
                .iter()
                .map(|(key, amount)| PlanPrice {
                    key: key.to_string(),
                    amount: *amount,
                })
                .collect(),
            ..Default::default()
        }
    }

    fn table() -> PriceTable {
        let mut table = PriceTable::new();
        table.insert("ModelX", "V1", record(&[("現金", 50000), ("12#期", 36000)]));
        table.insert("ModelX", "V2", record(&[("現金", 0), ("24#期", 48000)]));
        table.insert("ModelY", "Base", record(&[("現金", 0), ("12#期", 0)]));
        table
    }

    #[test]
    fn test_set_model_clears_version_and_plan() {
        let mut sel = QuoteSelection::new();
        sel.set_model("ModelX");
        sel.set_version("V1");
        sel.set_plan_key("現金");

        sel.set_model("ModelY");
        assert_eq!(sel.model, "ModelY");
        assert!(sel.version.is_empty());
        assert!(sel.plan_key.is_empty());
    }

    #[test]
    fn test_set_version_clears_plan_keeps_model() {
        let mut sel = QuoteSelection::new();
        sel.set_model("ModelX");
        sel.set_version("V1");
        sel.set_plan_key("現金");

        sel.set_version("V2");
        assert_eq!(sel.model, "ModelX");
        assert_eq!(sel.version, "V2");
        assert!(sel.plan_key.is_empty());
    }

    #[test]
    fn test_set_plan_does_not_cascade() {
        let mut sel = QuoteSelection::new();
        sel.set_model("ModelX");
        sel.set_version("V1");
        sel.toggle_discount(DiscountField::TaxNew);
        sel.set_plan_key("12#期");
        assert_eq!(sel.version, "V1");
        assert!(!sel.discounts.is_enabled(DiscountField::TaxNew));
    }

    #[test]
    fn test_reconcile_defaults_first_version_and_cash_plan() {
        let table = table();
        let mut sel = QuoteSelection::new();
        sel.set_model("ModelX");

        assert!(sel.reconcile(&table));
        assert_eq!(sel.version, "V1");
        assert_eq!(sel.plan_key, "現金");
        assert!(sel.is_complete(&table));

        // already reconciled
        assert!(!sel.reconcile(&table));
    }

    #[test]
    fn test_reconcile_falls_back_to_installment() {
        let table = table();
        let mut sel = QuoteSelection::new();
        sel.set_model("ModelX");
        sel.set_version("V2");

        sel.reconcile(&table);
        assert_eq!(sel.plan_key, "24#期");
    }

    #[test]
    fn test_reconcile_keeps_explicit_choice() {
        let table = table();
        let mut sel = QuoteSelection::new();
        sel.set_model("ModelX");
        sel.set_version("V1");
        sel.set_plan_key("12#期");

        assert!(!sel.reconcile(&table));
        assert_eq!(sel.plan_key, "12#期");
    }

    #[test]
    fn test_reconcile_leaves_plan_empty_without_offers() {
        let table = table();
        let mut sel = QuoteSelection::new();
        sel.set_model("ModelY");

        sel.reconcile(&table);
        assert_eq!(sel.version, "Base");
        assert!(sel.plan_key.is_empty());
        assert!(!sel.is_complete(&table));
    }

    #[test]
    fn test_reconcile_noop_without_model_or_data() {
        let mut sel = QuoteSelection::new();
        assert!(!sel.reconcile(&table()));

        sel.set_model("Ghost");
        assert!(!sel.reconcile(&PriceTable::new()));
        assert!(sel.version.is_empty());
        assert!(sel.current_record(&table()).is_none());
    }
}
