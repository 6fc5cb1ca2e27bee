use analytics::breakdown::{self, Dimension};
use analytics::{KpiCalculator, KpiSet};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use configuration::{Config, DEFAULT_CONFIG_PATH, LogLevel, init_tracing, load_config};
use core_types::{Dataset, TableKind};
use data_loader::{DataCache, export_table};
use filters::{FilterOptions, FilterSelection, apply_filters};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

mod format;
mod render;

/// The main entry point for the Campaign Insights reporting tool.
fn main() -> ExitCode {
    // Load overrides such as INSIGHTS__DATA__ORDERS_PATH from a .env file, if present.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_tracing(&config.logging, cli.log_level) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Execute the appropriate command. Any failure aborts the whole render.
    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Render aborted.");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Marketing and finance KPIs for influencer campaigns, computed from CSV exports.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Overrides the configured log level (RUST_LOG still takes precedence).
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    /// Print machine-readable JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    filters: FilterArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// KPI cards, daily revenue/payout trend and the organic vs. influencer split.
    Overview,
    /// Revenue by brand, product and platform.
    Products,
    /// Per-influencer revenue, payout and ROAS.
    Influencers {
        /// Only show the N highest-revenue influencers.
        #[arg(long)]
        top: Option<usize>,
    },
    /// List the values available for each filter.
    Options,
    /// Write one filtered table to a CSV file.
    Export {
        /// The table to export: orders, performance or payments.
        #[arg(long, value_parser = TableKind::from_str)]
        table: TableKind,

        /// Destination file.
        #[arg(long)]
        out: PathBuf,
    },
}

/// Filter selections. Any omitted dimension defaults to every available value.
#[derive(Args)]
struct FilterArgs {
    /// First order/invoice date to include (format: YYYY-MM-DD).
    #[arg(long, global = true)]
    from: Option<NaiveDate>,

    /// Last order/invoice date to include (format: YYYY-MM-DD).
    #[arg(long, global = true)]
    to: Option<NaiveDate>,

    /// Brand to include. Repeat for several.
    #[arg(long = "brand", global = true)]
    brands: Vec<String>,

    /// Product to include. Repeat for several.
    #[arg(long = "product", global = true)]
    products: Vec<String>,

    /// Platform to include, or "Organic" for orders without one. Repeat for several.
    #[arg(long = "platform", global = true)]
    platforms: Vec<String>,
}

impl FilterArgs {
    /// Fills in every omitted filter from the available options, like an untouched sidebar.
    fn resolve(&self, options: &FilterOptions) -> FilterSelection {
        let or_all = |chosen: &Vec<String>, all: &Vec<String>| {
            if chosen.is_empty() { all.clone() } else { chosen.clone() }
        };

        FilterSelection::new(
            self.from.unwrap_or(options.min_date),
            self.to.unwrap_or(options.max_date),
        )
        .with_brands(or_all(&self.brands, &options.brands))
        .with_products(or_all(&self.products, &options.products))
        .with_platforms(or_all(&self.platforms, &options.platforms))
    }
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// One load, filter, compute and render pass.
fn run(cli: Cli, config: &Config) -> anyhow::Result<()> {
    // One process is one session, so this cache serves a single render.
    let mut cache = DataCache::new(config.data.clone());
    let data = cache
        .get_or_load()
        .context("Could not load dashboard data; ensure the configured CSV files exist")?;

    let options = FilterOptions::from_orders(&data.orders)?;
    if let Commands::Options = cli.command {
        return emit(cli.json, &options, || render::options_table(&options).to_string());
    }

    let selection = cli.filters.resolve(&options);
    selection.validate()?;

    let filtered = apply_filters(&data, &selection);
    let kpis = KpiCalculator::new(config.business.profit_margin_factor)
        .calculate(&filtered.orders.rows, &filtered.payments.rows);

    if !cli.json {
        println!("{}\n", render::selection_summary(&selection));
    }

    match cli.command {
        Commands::Overview => handle_overview(cli.json, &filtered, &kpis),
        Commands::Products => handle_products(cli.json, &filtered),
        Commands::Influencers { top } => handle_influencers(cli.json, &filtered, top),
        Commands::Export { table, out } => handle_export(&filtered, table, &out),
        Commands::Options => Ok(()),
    }
}

fn handle_overview(json: bool, filtered: &Dataset, kpis: &KpiSet) -> anyhow::Result<()> {
    if json {
        return emit(true, kpis, String::new);
    }

    let revenue = breakdown::daily_revenue(&filtered.orders.rows);
    let payout = breakdown::daily_payout(&filtered.payments.rows);
    println!("Key Performance Indicators\n{}\n", render::kpi_cards(kpis));
    println!("Revenue vs. Payout by Day\n{}", render::trend_table(&revenue, &payout));
    Ok(())
}

fn handle_products(json: bool, filtered: &Dataset) -> anyhow::Result<()> {
    let orders = &filtered.orders.rows;
    let by_brand = breakdown::revenue_by(orders, Dimension::Brand);
    let by_product = breakdown::revenue_by(orders, Dimension::Product);
    let by_platform = breakdown::revenue_by(orders, Dimension::Platform);

    if json {
        let body = serde_json::json!({
            "by_brand": by_brand,
            "by_product": by_product,
            "by_platform": by_platform,
        });
        return emit(true, &body, String::new);
    }

    println!("Revenue by Brand\n{}\n", render::group_table("Brand", &by_brand));
    println!("Revenue by Product\n{}\n", render::group_table("Product", &by_product));
    println!("Revenue by Platform\n{}", render::group_table("Platform", &by_platform));
    Ok(())
}

fn handle_influencers(json: bool, filtered: &Dataset, top: Option<usize>) -> anyhow::Result<()> {
    let rows = match top {
        Some(n) => breakdown::top_influencers(filtered, n),
        None => breakdown::influencer_summary(filtered),
    };

    emit(json, &rows, || {
        format!(
            "Influencer Performance ({} influencer(s), {} performance record(s))\n{}",
            rows.len(),
            filtered.performance.len(),
            render::influencer_table(&rows)
        )
    })
}

fn handle_export(filtered: &Dataset, table: TableKind, out: &std::path::Path) -> anyhow::Result<()> {
    let written = export_table(filtered, table, out)
        .with_context(|| format!("Failed to export the {table} table to '{}'", out.display()))?;
    println!("Wrote {written} {table} row(s) to {}", out.display());
    Ok(())
}

/// Prints `value` as pretty JSON, or the rendered text view.
fn emit<T: serde::Serialize + ?Sized>(
    json: bool,
    value: &T,
    text: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}
