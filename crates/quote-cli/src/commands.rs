//! Command handlers

use std::path::PathBuf;

use tracing::info;

use crate::cli::{Cli, Commands};
use crate::output::{output_models, output_plans, output_quote};
use quote_app::app::{list_models, plans_for, prepare_quote, QuoteRequest};
use quote_app::config::Config;
use quote_app::export::{export_quote_to_excel, ReceiptHeader};
use quote_app::repository::open_price_repo;
use quote_domain::model::PriceTable;
use quote_domain::service::build_summary;
use quote_types::{Error, OutputFormat, Result};

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    if let Some(ref file) = cli.file {
        config.price_file = Some(file.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Models => {
            let table = load_table(&config)?;
            output_models(output_format, &list_models(&table))
        }

        Commands::Plans { model, version } => {
            let table = load_table(&config)?;
            let (version, options) = plans_for(&table, model, version.as_deref())?;
            output_plans(output_format, model, &version, &options)
        }

        Commands::Quote {
            model,
            version,
            plan,
            exclude,
            xlsx,
        } => cmd_quote(
            &config,
            output_format,
            QuoteRequest {
                model: model.clone(),
                version: version.clone(),
                plan: plan.clone(),
                excluded: exclude.clone(),
            },
            xlsx.clone(),
        ),

        Commands::Config {
            show,
            set_url,
            set_file,
            clear_file,
            set_timeout,
            set_output,
            set_shop,
            set_title,
            reset,
        } => cmd_config(
            *show,
            set_url.clone(),
            set_file.clone(),
            *clear_file,
            *set_timeout,
            *set_output,
            set_shop.clone(),
            set_title.clone(),
            *reset,
        ),
    }
}

fn load_table(config: &Config) -> Result<PriceTable> {
    let repo = open_price_repo(config)?;
    info!(source = %repo.describe(), "loading price sheet");
    repo.load()
}

fn cmd_quote(
    config: &Config,
    output_format: OutputFormat,
    request: QuoteRequest,
    xlsx: Option<PathBuf>,
) -> Result<()> {
    let table = load_table(config)?;
    let selection = prepare_quote(&table, &request)?;

    // A version without any offered plan cannot be quoted
    let summary = build_summary(&table, &selection).ok_or_else(|| Error::NoPlanOffered {
        model: selection.model.clone(),
        version: selection.version.clone(),
    })?;

    let title = config.quote_title();
    output_quote(output_format, &config.shop_name, &title, &summary)?;

    if let Some(path) = xlsx {
        let header = ReceiptHeader {
            shop_name: config.shop_name.clone(),
            title,
        };
        export_quote_to_excel(&summary, &header, &path)?;
        eprintln!("Exported to: {}", path.display());
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    show: bool,
    set_url: Option<String>,
    set_file: Option<PathBuf>,
    clear_file: bool,
    set_timeout: Option<u64>,
    set_output: Option<OutputFormat>,
    set_shop: Option<String>,
    set_title: Option<String>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(url) = set_url {
        config.sheet_url = url;
        modified = true;
    }

    if let Some(path) = set_file {
        config.price_file = Some(path);
        modified = true;
    }

    if clear_file {
        config.price_file = None;
        modified = true;
    }

    if let Some(secs) = set_timeout {
        config.timeout_secs = secs;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(shop) = set_shop {
        config.shop_name = shop;
        modified = true;
    }

    if let Some(title) = set_title {
        config.quote_title = Some(title);
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
