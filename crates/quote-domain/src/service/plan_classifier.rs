//! Plan classification (cash vs. installment)
//!
//! Plan column headers carry the category in their text:
//! - contains "現金" → cash
//! - contains both "#" and "期" → installment; the number written next to
//!   "#" is the number of periods ("12#期" and "#12期" → 12 payments)
//! - anything else is listed with the cash plans under its own header

use crate::model::{PlanCategory, PlanOption, PlanOptions, VersionRecord};
use crate::service::pricing::{ceil_div, format_amount};

const CASH_MARKER: &str = "現金";
const PERIOD_COUNT_MARKER: char = '#';
const PERIOD_UNIT_MARKER: &str = "期";

/// Split a version's plans into cash and installment lists, header order kept.
/// Zero-valued plans are not offered and never appear.
pub fn classify_plans(record: &VersionRecord) -> PlanOptions {
    let mut options = PlanOptions::default();

    for plan in &record.prices {
        if plan.amount == 0 {
            continue;
        }

        let key = plan.key.as_str();
        if key.contains(CASH_MARKER) {
            options.cash.push(PlanOption {
                key: plan.key.clone(),
                amount: plan.amount,
                category: PlanCategory::Cash,
                period_count: 0,
                per_period_amount: 0,
                label: format!("現金價 {} 元", format_amount(plan.amount)),
            });
        } else if key.contains(PERIOD_COUNT_MARKER) && key.contains(PERIOD_UNIT_MARKER) {
            let period_count = parse_period_count(key);
            let per_period_amount = if period_count > 0 {
                ceil_div(plan.amount, period_count)
            } else {
                0
            };
            options.installment.push(PlanOption {
                key: plan.key.clone(),
                amount: plan.amount,
                category: PlanCategory::Installment,
                period_count,
                per_period_amount,
                label: format!(
                    "{}期：每期{}元",
                    period_count,
                    format_amount(per_period_amount)
                ),
            });
        } else {
            options.cash.push(PlanOption {
                key: plan.key.clone(),
                amount: plan.amount,
                category: PlanCategory::Cash,
                period_count: 0,
                per_period_amount: 0,
                label: format!("{}: {} 元", key, format_amount(plan.amount)),
            });
        }
    }

    options
}

/// Number adjacent to the first "#" that has one: the digits right before
/// it, else the digits right after it; 0 if none
fn parse_period_count(key: &str) -> i64 {
    key.match_indices(PERIOD_COUNT_MARKER)
        .find_map(|(idx, _)| {
            let before: String = key[..idx]
                .chars()
                .rev()
                .take_while(|c| c.is_ascii_digit())
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            let after: String = key[idx + PERIOD_COUNT_MARKER.len_utf8()..]
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            [before, after]
                .into_iter()
                .find(|digits| !digits.is_empty())
                .and_then(|digits| digits.parse().ok())
        })
        .unwrap_or(0)
}

/// Label of the selected plan for the receipt, falling back to the raw key
pub fn plan_label(options: &PlanOptions, plan_key: &str) -> String {
    options
        .find(plan_key)
        .map(|o| o.label.clone())
        .unwrap_or_else(|| plan_key.to_string())
}
