//! CSV parser for the published price sheet
//!
//! Expected layout:
//! ```text
//! <modelKey>,<modelName>,<versionName>,PurchaseBonus,GiftNote,現金,12#期,...
//! ```
//! The first three columns are positional, whatever their header says.
//! `PurchaseBonus`, `GiftNote`, `TaxScrap`, `ScrapRefund` and `TaxNew` are
//! matched by header text; every other column is a plan price.
//!
//! Quoting is not interpreted: a comma inside a quoted field splits the field.

use encoding_rs::UTF_8;
use tracing::{debug, warn};

use quote_domain::model::{PlanPrice, PriceTable, VersionRecord};

const FIRST_NAMED_COLUMN: usize = 3;
const MIN_ROW_FIELDS: usize = 4;

/// Column positions resolved from the header row
#[derive(Debug, Default)]
struct ColumnLayout {
    plan_columns: Vec<(String, usize)>,
    purchase_bonus: Option<usize>,
    gift_note: Option<usize>,
    tax_scrap: Option<usize>,
    scrap_refund: Option<usize>,
    tax_new: Option<usize>,
}

impl ColumnLayout {
    fn from_headers(headers: &[&str]) -> Self {
        let mut layout = ColumnLayout::default();

        for (idx, header) in headers.iter().enumerate().skip(FIRST_NAMED_COLUMN) {
            let slot = match *header {
                "PurchaseBonus" => &mut layout.purchase_bonus,
                "GiftNote" => &mut layout.gift_note,
                "TaxScrap" => &mut layout.tax_scrap,
                "ScrapRefund" => &mut layout.scrap_refund,
                "TaxNew" => &mut layout.tax_new,
                plan => {
                    if !layout.plan_columns.iter().any(|(name, _)| name == plan) {
                        layout.plan_columns.push((plan.to_string(), idx));
                    }
                    continue;
                }
            };
            if slot.is_none() {
                *slot = Some(idx);
            }
        }

        layout
    }
}

/// Decode raw sheet bytes as UTF-8, dropping a byte order mark if present
pub fn decode_sheet_bytes(bytes: &[u8]) -> String {
    let (decoded, _, had_errors) = UTF_8.decode(bytes);
    if had_errors {
        warn!("Some characters in the price sheet could not be decoded");
    }
    decoded.into_owned()
}

/// Parse the price sheet into a table.
///
/// Never fails: blank lines are ignored, rows with fewer than four fields are
/// skipped, and unparseable amounts become 0. Fewer than two non-blank lines
/// produce an empty table.
pub fn parse_price_table(text: &str) -> PriceTable {
    let lines: Vec<&str> = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();
    if lines.len() < 2 {
        debug!(lines = lines.len(), "price sheet has no data rows");
        return PriceTable::new();
    }

    let body = lines.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_reader(body.as_bytes());

    let mut records = reader.records();
    let header = match records.next() {
        Some(Ok(record)) => record,
        Some(Err(e)) => {
            warn!("Unreadable price sheet header: {}", e);
            return PriceTable::new();
        }
        None => return PriceTable::new(),
    };
    let headers: Vec<&str> = header.iter().map(str::trim).collect();
    let layout = ColumnLayout::from_headers(&headers);

    let mut table = PriceTable::new();
    let mut skipped = 0usize;

    for (row_idx, result) in records.enumerate() {
        let row_num = row_idx + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(row = row_num, "Skipping unreadable row: {}", e);
                skipped += 1;
                continue;
            }
        };

        let fields: Vec<&str> = record.iter().map(str::trim).collect();
        if fields.len() < MIN_ROW_FIELDS {
            debug!(row = row_num, fields = fields.len(), "skipping short row");
            skipped += 1;
            continue;
        }

        let (model_key, model_name, version_name) = (fields[0], fields[1], fields[2]);
        table.insert(model_name, version_name, parse_record(model_key, &fields, &layout));
    }

    debug!(
        models = table.models().len(),
        versions = table.version_count(),
        skipped,
        "parsed price sheet"
    );
    table
}

fn parse_record(model_key: &str, fields: &[&str], layout: &ColumnLayout) -> VersionRecord {
    let amount_at = |idx: Option<usize>| {
        idx.and_then(|i| fields.get(i))
            .map(|s| parse_amount(s))
            .unwrap_or(0)
    };

    VersionRecord {
        model_key: model_key.to_string(),
        prices: layout
            .plan_columns
            .iter()
            .map(|(key, idx)| PlanPrice {
                key: key.clone(),
                amount: amount_at(Some(*idx)),
            })
            .collect(),
        purchase_bonus: amount_at(layout.purchase_bonus),
        tax_scrap: amount_at(layout.tax_scrap),
        scrap_refund: amount_at(layout.scrap_refund),
        tax_new: amount_at(layout.tax_new),
        gift_note: layout
            .gift_note
            .and_then(|i| fields.get(i))
            .map(|s| s.to_string())
            .unwrap_or_default(),
    }
}

/// Lenient integer parse: optional sign followed by leading digits.
///
/// Anything after the digits is ignored ("1200元" → 1200); no digits → 0.
fn parse_amount(s: &str) -> i64 {
    let s = s.trim();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = match rest.find(|c: char| !c.is_ascii_digit()) {
        Some(end) => &rest[..end],
        None => rest,
    };
    if digits.is_empty() {
        return 0;
    }

    let value: i64 = digits.parse().unwrap_or(0);
    if negative {
        -value
    } else {
        value
    }
}
