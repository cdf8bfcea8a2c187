//! CLI definition using clap

use clap::{Parser, Subcommand};
use quote_domain::model::DiscountField;
use quote_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "car-quote")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Dealership price quotation viewer for the published price sheet")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Read prices from a local CSV instead of the published sheet
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List models and their versions
    Models,

    /// Show the payment plans of a version
    Plans {
        /// Model name (e.g., "JET SL")
        #[arg(long, short = 'm')]
        model: String,

        /// Version name. Defaults to the first version of the model.
        #[arg(long, short = 'r')]
        version: Option<String>,
    },

    /// Compute a quote and print the receipt
    Quote {
        /// Model name
        #[arg(long, short = 'm')]
        model: String,

        /// Version name. Defaults to the first version of the model.
        #[arg(long, short = 'r')]
        version: Option<String>,

        /// Plan column (e.g., "現金", "24#期"). Defaults to the first cash plan.
        #[arg(long, short = 'p')]
        plan: Option<String>,

        /// Rebate to leave out (purchase-bonus, tax-scrap, scrap-refund, tax-new). Repeatable.
        #[arg(long, short = 'x')]
        exclude: Vec<DiscountField>,

        /// Also write the receipt to an Excel file
        #[arg(long)]
        xlsx: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set the published sheet URL
        #[arg(long)]
        set_url: Option<String>,

        /// Use a local CSV file as the price source
        #[arg(long)]
        set_file: Option<PathBuf>,

        /// Go back to the published sheet URL
        #[arg(long)]
        clear_file: bool,

        /// Set HTTP timeout in seconds
        #[arg(long)]
        set_timeout: Option<u64>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set the shop name printed on quotes
        #[arg(long)]
        set_shop: Option<String>,

        /// Set a fixed quote title (e.g., "115年 1月 報價單")
        #[arg(long)]
        set_title: Option<String>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}
