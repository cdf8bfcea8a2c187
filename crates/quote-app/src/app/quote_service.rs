//! Quote use cases shared by the CLI and the GUI

use serde::Serialize;
use tracing::debug;

use quote_domain::model::{DiscountField, PlanOptions, PriceTable};
use quote_domain::service::{classify_plans, QuoteSelection};
use quote_types::{Error, Result};

/// A model with its versions, for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelListing {
    pub model: String,
    pub versions: Vec<String>,
}

/// All models and versions in table order
pub fn list_models(table: &PriceTable) -> Vec<ModelListing> {
    table
        .models()
        .iter()
        .map(|m| ModelListing {
            model: m.name.clone(),
            versions: m.versions.iter().map(|v| v.name.clone()).collect(),
        })
        .collect()
}

/// Classified plans for a version; the first version when none is given.
///
/// Returns the resolved version name with the options.
pub fn plans_for(
    table: &PriceTable,
    model: &str,
    version: Option<&str>,
) -> Result<(String, PlanOptions)> {
    let entry = table
        .model(model)
        .ok_or_else(|| Error::UnknownModel(model.to_string()))?;

    let version_entry = match version {
        Some(name) => entry.versions.iter().find(|v| v.name == name),
        None => entry.versions.first(),
    }
    .ok_or_else(|| Error::UnknownVersion {
        model: model.to_string(),
        version: version.unwrap_or_default().to_string(),
    })?;

    Ok((version_entry.name.clone(), classify_plans(&version_entry.record)))
}

/// Choices for a one-shot quote
#[derive(Debug, Clone, Default)]
pub struct QuoteRequest {
    pub model: String,
    pub version: Option<String>,
    pub plan: Option<String>,
    /// Rebates to switch off
    pub excluded: Vec<DiscountField>,
}

/// Drive the selection controller the way the quotation screen would:
/// pick model, version and plan, reconcile defaults after each step, then
/// switch off the excluded rebates.
pub fn prepare_quote(table: &PriceTable, request: &QuoteRequest) -> Result<QuoteSelection> {
    if table.model(&request.model).is_none() {
        return Err(Error::UnknownModel(request.model.clone()));
    }

    let mut selection = QuoteSelection::new();
    selection.set_model(&request.model);
    selection.reconcile(table);

    if let Some(ref version) = request.version {
        if table.version(&request.model, version).is_none() {
            return Err(Error::UnknownVersion {
                model: request.model.clone(),
                version: version.clone(),
            });
        }
        selection.set_version(version);
        selection.reconcile(table);
    }

    if let Some(ref plan) = request.plan {
        let offered = selection
            .current_record(table)
            .map(|record| classify_plans(record).find(plan).is_some())
            .unwrap_or(false);
        if !offered {
            return Err(Error::UnknownPlan(plan.clone()));
        }
        selection.set_plan_key(plan);
    }

    for field in &request.excluded {
        if selection.discounts.is_enabled(*field) {
            selection.toggle_discount(*field);
        }
    }

    debug!(?selection, "prepared quote selection");
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_domain::model::{PlanPrice, VersionRecord};

    fn table() -> PriceTable {
        let mut table = PriceTable::new();
        for (version, cash) in [("V1", 50000), ("V2", 0)] {
            table.insert(
                "ModelX",
                version,
                VersionRecord {
                    prices: vec![
                        PlanPrice {
                            key: "現金".to_string(),
                            amount: cash,
                        },
                        PlanPrice {
                            key: "12#期".to_string(),
                            amount: 36000,
                        },
                    ],
                    purchase_bonus: 1000,
                    ..Default::default()
                },
            );
        }
        table
    }

    #[test]
    fn test_list_models() {
        let listing = list_models(&table());
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].versions, vec!["V1", "V2"]);
    }

    #[test]
    fn test_plans_for_defaults_to_first_version() {
        let (version, options) = plans_for(&table(), "ModelX", None).unwrap();
        assert_eq!(version, "V1");
        assert_eq!(options.cash.len(), 1);

        let (_, options) = plans_for(&table(), "ModelX", Some("V2")).unwrap();
        assert!(options.cash.is_empty());
        assert_eq!(options.installment.len(), 1);
    }

    #[test]
    fn test_plans_for_unknown_names() {
        assert!(matches!(
            plans_for(&table(), "Nope", None),
            Err(Error::UnknownModel(_))
        ));
        assert!(matches!(
            plans_for(&table(), "ModelX", Some("V9")),
            Err(Error::UnknownVersion { .. })
        ));
    }

    #[test]
    fn test_prepare_quote_with_defaults() {
        let request = QuoteRequest {
            model: "ModelX".to_string(),
            ..Default::default()
        };
        let selection = prepare_quote(&table(), &request).unwrap();
        assert_eq!(selection.version, "V1");
        assert_eq!(selection.plan_key, "現金");
    }

    #[test]
    fn test_prepare_quote_explicit_choices() {
        let request = QuoteRequest {
            model: "ModelX".to_string(),
            version: Some("V2".to_string()),
            plan: Some("12#期".to_string()),
            excluded: vec![DiscountField::PurchaseBonus, DiscountField::PurchaseBonus],
        };
        let selection = prepare_quote(&table(), &request).unwrap();
        assert_eq!(selection.version, "V2");
        assert_eq!(selection.plan_key, "12#期");
        assert!(!selection.discounts.is_enabled(DiscountField::PurchaseBonus));
        assert!(selection.discounts.is_enabled(DiscountField::TaxNew));
    }

    #[test]
    fn test_prepare_quote_rejects_unoffered_plan() {
        let request = QuoteRequest {
            model: "ModelX".to_string(),
            version: Some("V2".to_string()),
            plan: Some("現金".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            prepare_quote(&table(), &request),
            Err(Error::UnknownPlan(_))
        ));
    }
}
