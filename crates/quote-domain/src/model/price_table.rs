//! Price table type definitions
//!
//! The table is an ordered mapping of model name → version name → record.
//! Order follows the first appearance of each key in the source sheet so the
//! selection UI stays stable between loads.

use serde::{Deserialize, Serialize};

/// A single plan column value for one version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanPrice {
    /// Plan column header, e.g. "現金" or "12#期"
    pub key: String,
    /// Amount for this plan (0 = plan not offered for this version)
    pub amount: i64,
}

/// Prices and rebates for one model version
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Identifier column, distinct from the display name
    pub model_key: String,
    /// Plan prices in header order
    pub prices: Vec<PlanPrice>,
    /// 公司購車金
    pub purchase_bonus: i64,
    /// 汰舊貨物稅減免
    pub tax_scrap: i64,
    /// 報廢回收金
    pub scrap_refund: i64,
    /// 新購貨物稅減免
    pub tax_new: i64,
    /// 贈品備註 (free text, may be empty)
    pub gift_note: String,
}

impl VersionRecord {
    /// Amount for a plan key, if the sheet has that column
    pub fn price(&self, key: &str) -> Option<i64> {
        self.prices.iter().find(|p| p.key == key).map(|p| p.amount)
    }
}

/// A version name together with its record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    pub name: String,
    pub record: VersionRecord,
}

/// A model name together with its versions in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub name: String,
    pub versions: Vec<VersionEntry>,
}

impl ModelEntry {
    pub fn version(&self, name: &str) -> Option<&VersionRecord> {
        self.versions
            .iter()
            .find(|v| v.name == name)
            .map(|v| &v.record)
    }
}

/// Immutable-after-load lookup structure built from the price sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTable {
    models: Vec<ModelEntry>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a version record.
    ///
    /// A repeated (model, version) pair replaces the earlier record but keeps
    /// the slot where the pair first appeared.
    pub fn insert(&mut self, model: &str, version: &str, record: VersionRecord) {
        let model_idx = match self.models.iter().position(|m| m.name == model) {
            Some(idx) => idx,
            None => {
                self.models.push(ModelEntry {
                    name: model.to_string(),
                    versions: Vec::new(),
                });
                self.models.len() - 1
            }
        };

        let versions = &mut self.models[model_idx].versions;
        match versions.iter_mut().find(|v| v.name == version) {
            Some(existing) => existing.record = record,
            None => versions.push(VersionEntry {
                name: version.to_string(),
                record,
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn models(&self) -> &[ModelEntry] {
        &self.models
    }

    pub fn model(&self, name: &str) -> Option<&ModelEntry> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name.as_str()).collect()
    }

    /// Version names of a model in table order; empty for unknown models
    pub fn version_names(&self, model: &str) -> Vec<&str> {
        self.model(model)
            .map(|m| m.versions.iter().map(|v| v.name.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn version(&self, model: &str, version: &str) -> Option<&VersionRecord> {
        self.model(model).and_then(|m| m.version(version))
    }

    /// Total number of (model, version) records
    pub fn version_count(&self) -> usize {
        self.models.iter().map(|m| m.versions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, cash: i64) -> VersionRecord {
        VersionRecord {
            model_key: key.to_string(),
            prices: vec![PlanPrice {
                key: "現金".to_string(),
                amount: cash,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_insert_preserves_source_order() {
        let mut table = PriceTable::new();
        table.insert("Zeta", "V2", record("z2", 1));
        table.insert("Alpha", "V1", record("a1", 2));
        table.insert("Zeta", "V1", record("z1", 3));

        assert_eq!(table.model_names(), vec!["Zeta", "Alpha"]);
        assert_eq!(table.version_names("Zeta"), vec!["V2", "V1"]);
        assert_eq!(table.version_count(), 3);
    }

    #[test]
    fn test_duplicate_pair_last_write_wins() {
        let mut table = PriceTable::new();
        table.insert("M", "V1", record("first", 100));
        table.insert("M", "V2", record("other", 200));
        table.insert("M", "V1", record("second", 300));

        let rec = table.version("M", "V1").unwrap();
        assert_eq!(rec.model_key, "second");
        assert_eq!(rec.price("現金"), Some(300));
        assert_eq!(table.version_names("M"), vec!["V1", "V2"]);
        assert_eq!(table.version_count(), 2);
    }

    #[test]
    fn test_unknown_lookups() {
        let table = PriceTable::new();
        assert!(table.is_empty());
        assert!(table.version_names("nope").is_empty());
        assert!(table.version("nope", "V1").is_none());
        assert_eq!(record("k", 5).price("分期"), None);
    }
}
