//! Rebate fields and the user's on/off choices for them

use serde::{Deserialize, Serialize};

use super::price_table::VersionRecord;

/// One of the four fixed rebate columns of the price sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscountField {
    PurchaseBonus,
    TaxScrap,
    ScrapRefund,
    TaxNew,
}

impl DiscountField {
    /// Display order used by both the selection rows and the receipt
    pub const ALL: [DiscountField; 4] = [
        DiscountField::PurchaseBonus,
        DiscountField::TaxScrap,
        DiscountField::ScrapRefund,
        DiscountField::TaxNew,
    ];

    /// Column header in the price sheet
    pub fn header(&self) -> &'static str {
        match self {
            DiscountField::PurchaseBonus => "PurchaseBonus",
            DiscountField::TaxScrap => "TaxScrap",
            DiscountField::ScrapRefund => "ScrapRefund",
            DiscountField::TaxNew => "TaxNew",
        }
    }

    /// Label for the toggle row
    pub fn label(&self) -> &'static str {
        match self {
            DiscountField::PurchaseBonus => "公司購車金(事後匯款)",
            DiscountField::TaxScrap => "汰舊貨物稅減免",
            DiscountField::ScrapRefund => "報廢回收金",
            DiscountField::TaxNew => "新購貨物稅減免",
        }
    }

    /// Label for the itemized receipt
    pub fn summary_label(&self) -> &'static str {
        match self {
            DiscountField::PurchaseBonus => "購車金 (公司折扣)",
            DiscountField::TaxScrap => "汰舊貨物稅減免",
            DiscountField::ScrapRefund => "報廢回收金",
            DiscountField::TaxNew => "新購貨物稅減免",
        }
    }

    /// Stored value of this field, sign as given in the sheet
    pub fn value(&self, record: &VersionRecord) -> i64 {
        match self {
            DiscountField::PurchaseBonus => record.purchase_bonus,
            DiscountField::TaxScrap => record.tax_scrap,
            DiscountField::ScrapRefund => record.scrap_refund,
            DiscountField::TaxNew => record.tax_new,
        }
    }
}

impl std::fmt::Display for DiscountField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.header())
    }
}

impl std::str::FromStr for DiscountField {
    type Err = String;

    /// Accepts the sheet header ("TaxScrap") or a kebab-case form ("tax-scrap")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        DiscountField::ALL
            .into_iter()
            .find(|field| field.header().to_lowercase() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown discount '{}' (expected one of: purchase-bonus, tax-scrap, scrap-refund, tax-new)",
                    s
                )
            })
    }
}

/// On/off flag for each rebate field; everything is enabled by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountSelection {
    pub purchase_bonus: bool,
    pub tax_scrap: bool,
    pub scrap_refund: bool,
    pub tax_new: bool,
}

impl Default for DiscountSelection {
    fn default() -> Self {
        Self {
            purchase_bonus: true,
            tax_scrap: true,
            scrap_refund: true,
            tax_new: true,
        }
    }
}

impl DiscountSelection {
    pub fn is_enabled(&self, field: DiscountField) -> bool {
        match field {
            DiscountField::PurchaseBonus => self.purchase_bonus,
            DiscountField::TaxScrap => self.tax_scrap,
            DiscountField::ScrapRefund => self.scrap_refund,
            DiscountField::TaxNew => self.tax_new,
        }
    }

    pub fn set(&mut self, field: DiscountField, enabled: bool) {
        let flag = match field {
            DiscountField::PurchaseBonus => &mut self.purchase_bonus,
            DiscountField::TaxScrap => &mut self.tax_scrap,
            DiscountField::ScrapRefund => &mut self.scrap_refund,
            DiscountField::TaxNew => &mut self.tax_new,
        };
        *flag = enabled;
    }

    /// Flip exactly one flag
    pub fn toggle(&mut self, field: DiscountField) {
        self.set(field, !self.is_enabled(field));
    }
}
