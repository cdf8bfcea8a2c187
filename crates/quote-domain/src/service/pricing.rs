//! Price and discount calculation functions

use crate::model::{DiscountField, DiscountSelection, VersionRecord};

/// Amount of the selected plan, 0 when nothing is selected or the plan is
/// not a column of this version
pub fn base_price(record: &VersionRecord, plan_key: &str) -> i64 {
    if plan_key.is_empty() {
        return 0;
    }
    record.price(plan_key).unwrap_or(0)
}

/// Sum of |value| over the enabled rebate fields.
///
/// The sheet's sign convention is not trusted: every value is taken as an
/// absolute amount and always subtracted. Saturates instead of overflowing.
pub fn total_discount(record: &VersionRecord, selection: &DiscountSelection) -> i64 {
    DiscountField::ALL
        .iter()
        .filter(|field| selection.is_enabled(**field))
        .map(|field| field.value(record).saturating_abs())
        .fold(0, i64::saturating_add)
}

/// Price after discounts, never negative
pub fn final_price(base: i64, discount: i64) -> i64 {
    base.saturating_sub(discount).max(0)
}

/// Ceiling division for a positive divisor
pub fn ceil_div(amount: i64, divisor: i64) -> i64 {
    let quotient = amount / divisor;
    if amount % divisor > 0 {
        quotient + 1
    } else {
        quotient
    }
}

/// Integer with comma thousands grouping, e.g. 1234567 → "1,234,567"
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlanPrice;

    fn record() -> VersionRecord {
        VersionRecord {
            model_key: "k1".to_string(),
            prices: vec![
                PlanPrice {
                    key: "現金".to_string(),
                    amount: 50000,
                },
                PlanPrice {
                    key: "12#期".to_string(),
                    amount: 0,
                },
            ],
            purchase_bonus: 1000,
            tax_scrap: -4000,
            scrap_refund: 0,
            tax_new: 2500,
            gift_note: String::new(),
        }
    }

    #[test]
    fn test_base_price() {
        let rec = record();
        assert_eq!(base_price(&rec, "現金"), 50000);
        assert_eq!(base_price(&rec, ""), 0);
        assert_eq!(base_price(&rec, "24#期"), 0);
        assert_eq!(base_price(&rec, "12#期"), 0);
    }

    #[test]
    fn test_total_discount_uses_absolute_values() {
        let rec = record();
        assert_eq!(total_discount(&rec, &DiscountSelection::default()), 7500);
    }

    #[test]
    fn test_total_discount_disabled_fields_contribute_nothing() {
        let rec = record();
        let mut selection = DiscountSelection::default();
        selection.set(DiscountField::TaxScrap, false);
        assert_eq!(total_discount(&rec, &selection), 3500);

        for field in DiscountField::ALL {
            selection.set(field, false);
        }
        assert_eq!(total_discount(&rec, &selection), 0);
    }

    #[test]
    fn test_total_discount_monotonic() {
        let rec = record();
        let mut selection = DiscountSelection {
            purchase_bonus: false,
            tax_scrap: false,
            scrap_refund: false,
            tax_new: false,
        };
        let mut previous = total_discount(&rec, &selection);
        for field in DiscountField::ALL {
            selection.set(field, true);
            let current = total_discount(&rec, &selection);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_final_price_never_negative() {
        assert_eq!(final_price(1000, 5000), 0);
        assert_eq!(final_price(50000, 7500), 42500);
        assert_eq!(final_price(0, 0), 0);
    }

    #[test]
    fn test_huge_cells_saturate() {
        let rec = VersionRecord {
            purchase_bonus: i64::MAX,
            tax_scrap: i64::MIN,
            tax_new: 9_000_000_000_000_000_000,
            ..record()
        };
        let discount = total_discount(&rec, &DiscountSelection::default());
        assert_eq!(discount, i64::MAX);
        assert_eq!(final_price(50000, discount), 0);
        assert_eq!(final_price(i64::MIN, i64::MAX), 0);
    }

    #[test]
    fn test_ceil_div() {
        assert_eq!(ceil_div(36000, 12), 3000);
        assert_eq!(ceil_div(36001, 12), 3001);
        assert_eq!(ceil_div(-25, 2), -12);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(1000), "1,000");
        assert_eq!(format_amount(50000), "50,000");
        assert_eq!(format_amount(1234567), "1,234,567");
        assert_eq!(format_amount(-4000), "-4,000");
    }
}
