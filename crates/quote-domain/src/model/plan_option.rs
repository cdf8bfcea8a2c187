use serde::{Deserialize, Serialize};

/// Payment category of a plan column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanCategory {
    Cash,
    Installment,
}

impl PlanCategory {
    pub fn label(&self) -> &'static str {
        match self {
            PlanCategory::Cash => "現金方案",
            PlanCategory::Installment => "分期方案",
        }
    }
}

/// A selectable plan derived from a version record (never stored)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOption {
    /// Plan column header as written in the sheet
    pub key: String,
    pub amount: i64,
    pub category: PlanCategory,
    /// Number of payments (installment only, 0 otherwise)
    pub period_count: i64,
    /// ceil(amount / period_count) (installment only, 0 otherwise)
    pub per_period_amount: i64,
    /// Display label
    pub label: String,
}

/// Classified plans of one version, each list in header order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOptions {
    pub cash: Vec<PlanOption>,
    pub installment: Vec<PlanOption>,
}

impl PlanOptions {
    pub fn is_empty(&self) -> bool {
        self.cash.is_empty() && self.installment.is_empty()
    }

    /// Plan to preselect: first cash option, else first installment option
    pub fn default_option(&self) -> Option<&PlanOption> {
        self.cash.first().or_else(|| self.installment.first())
    }

    pub fn find(&self, key: &str) -> Option<&PlanOption> {
        self.iter().find(|o| o.key == key)
    }

    /// Cash options followed by installment options
    pub fn iter(&self) -> impl Iterator<Item = &PlanOption> {
        self.cash.iter().chain(self.installment.iter())
    }
}
