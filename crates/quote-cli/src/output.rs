//! Output formatting module

use quote_app::app::ModelListing;
use quote_domain::model::{DiscountField, PlanCategory, PlanOptions};
use quote_domain::service::{format_amount, render_receipt, QuoteSummary};
use quote_types::{OutputFormat, Result};
use serde::Serialize;

#[derive(Serialize)]
struct PlansOutput<'a> {
    model: &'a str,
    version: &'a str,
    #[serde(flatten)]
    options: &'a PlanOptions,
}

pub fn output_models(output_format: OutputFormat, models: &[ModelListing]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(models)?);
        return Ok(());
    }

    if models.is_empty() {
        println!("目前沒有報價資料 (no price data)");
        return Ok(());
    }

    println!("\nModels");
    println!("======");
    for listing in models {
        println!("{}", listing.model);
        for version in &listing.versions {
            println!("  - {}", version);
        }
    }
    Ok(())
}

pub fn output_plans(
    output_format: OutputFormat,
    model: &str,
    version: &str,
    options: &PlanOptions,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let out = PlansOutput {
            model,
            version,
            options,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("\n{} / {}", model, version);
    println!("{}", "=".repeat(30));

    if options.is_empty() {
        println!("此版本沒有可選方案");
        return Ok(());
    }

    if !options.cash.is_empty() {
        println!("{}", PlanCategory::Cash.label());
        for opt in &options.cash {
            println!("  [{}] {}", opt.key, opt.label);
        }
    }
    if !options.installment.is_empty() {
        println!("{}", PlanCategory::Installment.label());
        for opt in &options.installment {
            println!(
                "  [{}] {} 期  {}元 / 每期 {}元",
                opt.key,
                opt.period_count,
                format_amount(opt.amount),
                format_amount(opt.per_period_amount)
            );
        }
    }
    Ok(())
}

pub fn output_quote(
    output_format: OutputFormat,
    shop_name: &str,
    title: &str,
    summary: &QuoteSummary,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("\n{}  {}", shop_name, title);
    print!("{}", render_receipt(summary));

    let excluded: Vec<&str> = DiscountField::ALL
        .iter()
        .filter(|f| !summary.discounts.iter().any(|d| d.field == **f))
        .map(|f| f.header())
        .collect();
    if !excluded.is_empty() {
        println!("(not applied: {})", excluded.join(", "));
    }
    Ok(())
}
