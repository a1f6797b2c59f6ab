//! shoplens: order analytics summaries for a flat e-commerce table.
//!
//! Loads the order table, builds the analytics report (top cities, top
//! categories, weekday distribution, RFM scores) and prints it either as
//! text charts or as JSON.

mod render;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use shoplens_compute::AnalyticsReport;
use shoplens_core::config::{load_dotenv, OrderFormat};
use shoplens_core::Config;
use shoplens_ingest::OrderImporter;

// ── CLI ─────────────────────────────────────────────────────────────

/// Customer and order analytics: top cities, top categories, busiest weekdays, RFM scores.
#[derive(Parser, Debug)]
#[command(name = "shoplens", version, about)]
struct Cli {
    /// Order table to load (CSV or Parquet). Overrides ORDERS_PATH.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// File format: auto, csv or parquet. Overrides ORDERS_FORMAT.
    #[arg(long)]
    format: Option<OrderFormat>,

    /// Rows kept in the city and category summaries. Overrides REPORT_TOP_K.
    #[arg(short = 'k', long)]
    top_k: Option<usize>,

    /// Run the report sections in parallel.
    #[arg(long)]
    parallel: bool,

    /// Print the report as JSON instead of text charts.
    #[arg(long)]
    json: bool,

    /// Config profile (e.g. PROD).
    #[arg(long, env = "SHOPLENS_PROFILE")]
    profile: Option<String>,
}

impl Cli {
    fn resolve_config(&self) -> Config {
        let mut config = match &self.profile {
            Some(profile) => Config::for_profile(profile),
            None => Config::from_env(),
        };
        if let Some(input) = &self.input {
            config.data.orders_path = input.clone();
        }
        if let Some(format) = self.format {
            config.data.format = format;
        }
        if let Some(top_k) = self.top_k {
            config.report.top_k = top_k;
        }
        if self.parallel {
            config.report.parallel = true;
        }
        config
    }
}

// ── main ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    load_dotenv();
    let cli = Cli::parse();
    let config = cli.resolve_config();
    config.log_summary();

    let orders = OrderImporter::import(
        &config.data.orders_path,
        config.data.format,
        config.data.batch_size,
    )
    .with_context(|| format!("failed to load orders from {}", config.data.orders_path.display()))?;

    let report = AnalyticsReport::build(&orders, &config.report);
    for (section, ms) in report.metrics.sections() {
        info!(section, ms, "section timing");
    }
    for section in report.failed_sections() {
        warn!(section, "section unavailable in output");
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{}", json);
    } else {
        print!("{}", render::render_report(&report, &config.presentation));
    }

    Ok(())
}
