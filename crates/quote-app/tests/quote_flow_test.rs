//! End-to-end tests: sheet text → table → selection → totals → receipt

use quote_app::app::{prepare_quote, LoadState, LoadTracker, QuoteRequest};
use quote_app::export::{export_quote_to_excel, ReceiptHeader};
use quote_app::repository::open_file_repo;
use quote_domain::model::DiscountField;
use quote_domain::repository::PriceSheetRepository;
use quote_domain::service::{build_summary, classify_plans, quote_totals, render_receipt, QuoteSelection};
use quote_infra::price_csv::parse_price_table;
use tempfile::tempdir;

const SHEET: &str = "\
ID,車款,版本,PurchaseBonus,GiftNote,TaxScrap,ScrapRefund,TaxNew,現金,12#期,24#期
j1,JET SL,ABS,3000,安全帽+手機架,-4000,1000,0,98000,102000,108000
j2,JET SL,TCS,3000,,-4000,1000,0,105000,0,116000
k1,KRV,標準版,0,,0,0,-1500,0,120000,126000
bad,row
k1,KRV,標準版,500,改款贈品,0,0,-1500,0,121000,127000
";

#[test]
fn test_full_quote_flow() {
    let table = parse_price_table(SHEET);
    assert_eq!(table.model_names(), vec!["JET SL", "KRV"]);
    assert_eq!(table.version_count(), 3);

    let mut selection = QuoteSelection::new();
    selection.set_model("JET SL");
    selection.reconcile(&table);
    assert_eq!(selection.version, "ABS");
    assert_eq!(selection.plan_key, "現金");

    let totals = quote_totals(&table, &selection);
    assert_eq!(totals.base_price, 98000);
    assert_eq!(totals.total_discount, 8000);
    assert_eq!(totals.final_price, 90000);

    selection.toggle_discount(DiscountField::TaxScrap);
    selection.set_plan_key("24#期");
    let summary = build_summary(&table, &selection).unwrap();
    assert_eq!(summary.plan_label, "24期：每期4,500元");
    assert_eq!(summary.total_saved, 4000);
    assert_eq!(summary.final_price, 104000);

    let receipt = render_receipt(&summary);
    assert!(receipt.contains("贈品活動：安全帽+手機架"));
    assert!(!receipt.contains("汰舊貨物稅減免"));
}

#[test]
fn test_version_switch_resets_plan_and_redefaults() {
    let table = parse_price_table(SHEET);
    let mut selection = QuoteSelection::new();
    selection.set_model("JET SL");
    selection.reconcile(&table);
    selection.set_plan_key("12#期");

    selection.set_version("TCS");
    assert!(selection.plan_key.is_empty());
    selection.reconcile(&table);
    assert_eq!(selection.plan_key, "現金");

    let options = classify_plans(selection.current_record(&table).unwrap());
    assert!(options.find("12#期").is_none());
}

#[test]
fn test_duplicate_row_overrides_and_installment_default() {
    let table = parse_price_table(SHEET);
    let request = QuoteRequest {
        model: "KRV".to_string(),
        ..Default::default()
    };
    let selection = prepare_quote(&table, &request).unwrap();
    assert_eq!(selection.version, "標準版");
    assert_eq!(selection.plan_key, "12#期");

    let summary = build_summary(&table, &selection).unwrap();
    assert_eq!(summary.base_price, 121000);
    assert_eq!(summary.total_saved, 2000);
    assert_eq!(summary.final_price, 119000);
    assert_eq!(summary.gift_note.as_deref(), Some("改款贈品"));
}

#[test]
fn test_empty_sheet_renders_no_data_state() {
    let table = parse_price_table("ID,車款,版本,現金\n");
    assert!(table.is_empty());

    let mut selection = QuoteSelection::new();
    assert!(!selection.reconcile(&table));
    assert_eq!(quote_totals(&table, &selection).caption(), "尚未選擇");
    assert!(build_summary(&table, &selection).is_none());
}

#[test]
fn test_file_repository_through_tracker_and_export() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("prices.csv");
    std::fs::write(&csv_path, SHEET).unwrap();

    let repo = open_file_repo(csv_path);
    let mut tracker = LoadTracker::new();
    let ticket = tracker.begin();
    assert!(tracker.complete(ticket, repo.load()));

    let table = match tracker.state() {
        LoadState::Ready(table) => table,
        other => panic!("unexpected state: {:?}", other),
    };

    let request = QuoteRequest {
        model: "JET SL".to_string(),
        version: Some("TCS".to_string()),
        plan: Some("24#期".to_string()),
        excluded: vec![DiscountField::ScrapRefund],
    };
    let selection = prepare_quote(table, &request).unwrap();
    let summary = build_summary(table, &selection).unwrap();
    assert_eq!(summary.final_price, 116000 - 7000);

    let header = ReceiptHeader {
        shop_name: "皇昌車業".to_string(),
        title: "115年 1月 報價單".to_string(),
    };
    let xlsx = dir.path().join("quote.xlsx");
    export_quote_to_excel(&summary, &header, &xlsx).unwrap();
    assert!(xlsx.exists());
}
