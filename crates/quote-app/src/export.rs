//! Excel export of a quote receipt

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::info;

use quote_domain::service::QuoteSummary;
use quote_types::{Error, Result};

/// Shop name and title printed above the receipt
#[derive(Debug, Clone)]
pub struct ReceiptHeader {
    pub shop_name: String,
    pub title: String,
}

/// Export a quote receipt to an Excel file
pub fn export_quote_to_excel(
    summary: &QuoteSummary,
    header: &ReceiptHeader,
    output_path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    write_receipt_sheet(sheet, summary, header)?;

    workbook
        .save(output_path)
        .map_err(|e| Error::Excel(e.to_string()))?;

    info!(path = %output_path.display(), "quote exported");
    Ok(())
}

fn write_receipt_sheet(
    sheet: &mut Worksheet,
    summary: &QuoteSummary,
    header: &ReceiptHeader,
) -> Result<()> {
    sheet
        .set_name("報價單")
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .set_column_width(0, 22)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .set_column_width(1, 28)
        .map_err(|e| Error::Excel(e.to_string()))?;

    let title_format = Format::new().set_bold().set_font_size(14);
    let bold = Format::new().set_bold();
    let amount_format = Format::new().set_num_format("#,##0");
    let total_format = Format::new().set_bold().set_num_format("#,##0");

    sheet
        .write_string_with_format(0, 0, &header.shop_name, &title_format)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_string(0, 1, &header.title)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_string_with_format(1, 0, "車輛報價單", &bold)
        .map_err(|e| Error::Excel(e.to_string()))?;

    let details = [
        ("車種", summary.model.as_str()),
        ("版本", summary.version.as_str()),
        ("方案", summary.plan_label.as_str()),
    ];
    let mut row = 3;
    for (label, value) in details {
        sheet
            .write_string(row, 0, label)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 1, value)
            .map_err(|e| Error::Excel(e.to_string()))?;
        row += 1;
    }

    sheet
        .write_string(row, 0, "售價")
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_number_with_format(row, 1, summary.base_price as f64, &amount_format)
        .map_err(|e| Error::Excel(e.to_string()))?;
    row += 1;

    if !summary.discounts.is_empty() {
        row += 1;
        sheet
            .write_string_with_format(row, 0, "包含折扣", &bold)
            .map_err(|e| Error::Excel(e.to_string()))?;
        row += 1;
        for line in &summary.discounts {
            sheet
                .write_string(row, 0, &line.label)
                .map_err(|e| Error::Excel(e.to_string()))?;
            sheet
                .write_number_with_format(row, 1, -(line.amount as f64), &amount_format)
                .map_err(|e| Error::Excel(e.to_string()))?;
            row += 1;
        }
        sheet
            .write_string(row, 0, "共省下")
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number_with_format(row, 1, summary.total_saved as f64, &amount_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
        row += 1;
    }

    if let Some(ref note) = summary.gift_note {
        row += 1;
        sheet
            .write_string(row, 0, "贈品活動")
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 1, note)
            .map_err(|e| Error::Excel(e.to_string()))?;
        row += 1;
    }

    row += 1;
    sheet
        .write_string_with_format(row, 0, "車輛價格", &bold)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_number_with_format(row, 1, summary.final_price as f64, &total_format)
        .map_err(|e| Error::Excel(e.to_string()))?;
    row += 2;

    sheet
        .write_string(row, 0, "實際價格依門市為主")
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_domain::model::DiscountField;
    use quote_domain::service::DiscountLine;
    use tempfile::tempdir;

    #[test]
    fn test_export_writes_file() {
        let summary = QuoteSummary {
            model: "ModelX".to_string(),
            version: "V1".to_string(),
            plan_key: "現金".to_string(),
            plan_label: "現金價 50,000 元".to_string(),
            base_price: 50000,
            discounts: vec![DiscountLine {
                field: DiscountField::TaxScrap,
                label: "汰舊貨物稅減免".to_string(),
                amount: 4000,
            }],
            total_saved: 4000,
            final_price: 46000,
            gift_note: Some("安全帽".to_string()),
        };
        let header = ReceiptHeader {
            shop_name: "皇昌車業".to_string(),
            title: "115年 1月 報價單".to_string(),
        };

        let dir = tempdir().unwrap();
        let path = dir.path().join("quote.xlsx");
        export_quote_to_excel(&summary, &header, &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }
}
