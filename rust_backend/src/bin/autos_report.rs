//! Listings analysis report
//!
//! Runs the full cleaning and aggregation pipeline on a listings CSV and
//! prints the resulting tables.
//!
//! # Usage
//!
//! ```bash
//! autos-report autos.csv
//! autos-report autos.csv --format json --top-n 10
//! autos-report autos.csv --config analysis.toml --lenient
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (default: info). Logs go to stderr.

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use autos_analysis::transformations::cleaning::CoercionPolicy;
use autos_analysis::{render_text, AnalysisConfig, AnalysisPipeline};

#[derive(Parser)]
#[command(name = "autos-report")]
#[command(about = "Clean a used-vehicle listings export and summarise it.")]
struct Cli {
    /// Listings CSV file
    csv: PathBuf,

    /// TOML configuration (defaults to autos.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[arg(long)]
    price_min: Option<i64>,
    #[arg(long)]
    price_max: Option<i64>,
    #[arg(long)]
    year_min: Option<i64>,
    #[arg(long)]
    year_max: Option<i64>,

    /// Number of brands to compare
    #[arg(long)]
    top_n: Option<usize>,

    /// Treat unparseable price/odometer cells as missing instead of failing
    #[arg(long)]
    lenient: bool,

    /// Input text encoding label (e.g. latin1, utf-8)
    #[arg(long)]
    encoding: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AnalysisConfig) {
        if let Some(value) = self.price_min {
            config.filters.price_min = value;
        }
        if let Some(value) = self.price_max {
            config.filters.price_max = value;
        }
        if let Some(value) = self.year_min {
            config.filters.year_min = value;
        }
        if let Some(value) = self.year_max {
            config.filters.year_max = value;
        }
        if let Some(value) = self.top_n {
            config.aggregates.top_n = value;
        }
        if self.lenient {
            config.cleaning.policy = CoercionPolicy::Null;
        }
        if let Some(label) = &self.encoding {
            config.input.encoding = label.clone();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => AnalysisConfig::from_default_location().context("loading configuration")?,
    };
    cli.apply_overrides(&mut config);
    config.validate().context("invalid command-line overrides")?;

    info!("Analysing {}", cli.csv.display());

    let report = AnalysisPipeline::with_config(config)
        .process(&cli.csv)
        .with_context(|| format!("analysing {}", cli.csv.display()))?;

    match cli.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", report.to_json().context("serialising report")?),
    }

    Ok(())
}
