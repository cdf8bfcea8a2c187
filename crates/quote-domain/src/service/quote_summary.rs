//! Quote totals and the printable receipt

use serde::{Deserialize, Serialize};

use crate::model::{DiscountField, PriceTable};
use crate::service::plan_classifier::{classify_plans, plan_label};
use crate::service::pricing::{base_price, final_price, format_amount, total_discount};
use crate::service::selection::QuoteSelection;

/// Numbers shown in the sticky total bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTotals {
    pub base_price: i64,
    pub total_discount: i64,
    pub final_price: i64,
}

impl QuoteTotals {
    /// Caption above the total: a price is only meaningful once a plan resolves
    pub fn caption(&self) -> &'static str {
        if self.base_price > 0 {
            "折扣後總價"
        } else {
            "尚未選擇"
        }
    }
}

/// Totals for the current selection; all zero when no version is selected
pub fn quote_totals(table: &PriceTable, selection: &QuoteSelection) -> QuoteTotals {
    match selection.current_record(table) {
        Some(record) => {
            let base = base_price(record, &selection.plan_key);
            let discount = total_discount(record, &selection.discounts);
            QuoteTotals {
                base_price: base,
                total_discount: discount,
                final_price: final_price(base, discount),
            }
        }
        None => QuoteTotals::default(),
    }
}

/// One itemized rebate on the receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountLine {
    pub field: DiscountField,
    pub label: String,
    /// Absolute amount subtracted
    pub amount: i64,
}

/// Everything the receipt shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub model: String,
    pub version: String,
    pub plan_key: String,
    pub plan_label: String,
    pub base_price: i64,
    /// Enabled, non-zero rebates in display order
    pub discounts: Vec<DiscountLine>,
    pub total_saved: i64,
    pub final_price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift_note: Option<String>,
}

/// Build the receipt for the current selection.
///
/// Returns None until both a version and a plan are selected.
pub fn build_summary(table: &PriceTable, selection: &QuoteSelection) -> Option<QuoteSummary> {
    if !selection.is_complete(table) {
        return None;
    }
    let record = selection.current_record(table)?;

    let discounts: Vec<DiscountLine> = DiscountField::ALL
        .into_iter()
        .filter(|field| selection.discounts.is_enabled(*field) && field.value(record) != 0)
        .map(|field| DiscountLine {
            field,
            label: field.summary_label().to_string(),
            amount: field.value(record).saturating_abs(),
        })
        .collect();

    let total_saved = discounts
        .iter()
        .map(|d| d.amount)
        .fold(0, i64::saturating_add);
    let base = base_price(record, &selection.plan_key);

    Some(QuoteSummary {
        model: selection.model.clone(),
        version: selection.version.clone(),
        plan_key: selection.plan_key.clone(),
        plan_label: plan_label(&classify_plans(record), &selection.plan_key),
        base_price: base,
        discounts,
        total_saved,
        final_price: final_price(base, total_saved),
        gift_note: Some(record.gift_note.clone()).filter(|note| !note.is_empty()),
    })
}

/// Plain-text receipt suitable for printing or pasting into a chat
pub fn render_receipt(summary: &QuoteSummary) -> String {
    let mut receipt = String::new();
    receipt.push_str("==============================\n");
    receipt.push_str("          車輛報價單          \n");
    receipt.push_str("==============================\n");
    receipt.push_str(&format!("車種  {}\n", summary.model));
    receipt.push_str(&format!("版本  {}\n", summary.version));
    receipt.push_str(&format!("方案  {}\n", summary.plan_label));
    receipt.push_str("------------------------------\n");
    receipt.push_str(&format!("售價  {} 元\n", format_amount(summary.base_price)));

    if !summary.discounts.is_empty() {
        receipt.push_str("包含折扣：\n");
        for line in &summary.discounts {
            receipt.push_str(&format!(
                "  {}  -{}\n",
                line.label,
                format_amount(line.amount)
            ));
        }
        receipt.push_str(&format!("  共省下  {} 元\n", format_amount(summary.total_saved)));
    }

    if let Some(ref note) = summary.gift_note {
        receipt.push_str(&format!("贈品活動：{}\n", note));
    }

    receipt.push_str("------------------------------\n");
    receipt.push_str(&format!("車輛價格  {} 元\n", format_amount(summary.final_price)));
    receipt.push_str("==============================\n");
    receipt.push_str("實際價格依門市為主\n");
    receipt
}
