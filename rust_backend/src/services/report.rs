//! Analysis report assembled by the pipeline, with text rendering.
//!
//! The report is `Serialize` so the CLI can emit it as JSON; [`render_text`]
//! produces the console form.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::preprocessing::validator::ValidationResult;
use crate::services::aggregates::BrandSummary;
use crate::services::distributions::{ColumnOverview, ColumnStats, FrequencyTable};
use crate::transformations::filtering::FilterSummary;

/// Where the data came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSummary {
    pub checksum: String,
    pub rows_loaded: usize,
    pub columns: Vec<String>,
}

/// Everything the analysis computes, in the order it is computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub source: SourceSummary,
    pub overview: Vec<ColumnOverview>,
    pub validation: ValidationResult,
    pub odometer_stats: ColumnStats,
    pub price_stats_before: ColumnStats,
    pub price_filter: FilterSummary,
    pub price_stats: ColumnStats,
    pub registration_month_stats: ColumnStats,
    pub date_distributions: Vec<FrequencyTable>,
    pub registration_year_stats: ColumnStats,
    pub year_filter: FilterSummary,
    pub registration_years: FrequencyTable,
    pub brand_shares: FrequencyTable,
    pub brands: BrandSummary,
}

impl AnalysisReport {
    /// Pretty-printed JSON form of the report.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Format with two decimals and thousands separators (`1,234,567.89`).
pub fn format_number(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (integer, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, fraction)
}

fn format_optional(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_else(|| "NaN".to_string())
}

fn write_stats(out: &mut String, title: &str, stats: &ColumnStats) {
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "  {:<8}{:>20}", "count", format_number(stats.count as f64));
    let _ = writeln!(out, "  {:<8}{:>20}", "unique", stats.unique);
    let rows = [
        ("mean", stats.mean),
        ("std", stats.std),
        ("min", stats.min),
        ("25%", stats.q25),
        ("50%", stats.median),
        ("75%", stats.q75),
        ("max", stats.max),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {:<8}{:>20}", label, format_optional(value));
    }
    out.push('\n');
}

fn write_frequencies(out: &mut String, title: &str, table: &FrequencyTable) {
    let _ = writeln!(out, "{} ({} values)", title, table.total);
    for entry in &table.entries {
        let _ = writeln!(
            out,
            "  {:<24}{:>8}{:>10.4}",
            entry.key.as_deref().unwrap_or("NaN"),
            entry.count,
            entry.proportion
        );
    }
    out.push('\n');
}

fn write_filter(out: &mut String, summary: &FilterSummary) {
    let _ = writeln!(
        out,
        "Filter {} in [{}, {}]: kept {}, dropped {}\n",
        summary.column, summary.min, summary.max, summary.kept, summary.dropped
    );
}

/// Render the report for the console.
pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "== Source ==");
    let _ = writeln!(out, "  rows     {}", report.source.rows_loaded);
    let _ = writeln!(out, "  sha256   {}", report.source.checksum);
    let _ = writeln!(out, "  columns  {}\n", report.source.columns.join(", "));

    let _ = writeln!(out, "== Column overview ==");
    let _ = writeln!(
        out,
        "  {:<20}{:>10}{:>10}  {:<24}{:>8}",
        "column", "non-null", "unique", "top", "freq"
    );
    for column in &report.overview {
        let _ = writeln!(
            out,
            "  {:<20}{:>10}{:>10}  {:<24}{:>8}",
            column.column,
            column.non_null,
            column.unique,
            column.top.as_deref().unwrap_or("-"),
            column.freq
        );
    }
    out.push('\n');

    let _ = writeln!(out, "== Data quality ==");
    for error in &report.validation.errors {
        let _ = writeln!(out, "  error: {}", error);
    }
    for warning in &report.validation.warnings {
        let _ = writeln!(out, "  warning: {}", warning);
    }
    for (column, missing) in &report.validation.stats.missing_by_column {
        let _ = writeln!(out, "  missing {:<20}{:>8}", column, missing);
    }
    out.push('\n');

    let _ = writeln!(out, "== Numeric columns ==");
    write_stats(&mut out, "odometer_km", &report.odometer_stats);
    write_stats(&mut out, "price (before filter)", &report.price_stats_before);
    write_filter(&mut out, &report.price_filter);
    write_stats(&mut out, "price", &report.price_stats);
    write_stats(&mut out, "registration_month", &report.registration_month_stats);

    let _ = writeln!(out, "== Dates ==");
    for table in &report.date_distributions {
        write_frequencies(&mut out, &table.column, table);
    }

    let _ = writeln!(out, "== Registration years ==");
    write_stats(&mut out, "registration_year (before filter)", &report.registration_year_stats);
    write_filter(&mut out, &report.year_filter);
    write_frequencies(&mut out, "registration_year", &report.registration_years);

    let _ = writeln!(out, "== Brands ==");
    write_frequencies(&mut out, "brand share", &report.brand_shares);

    let _ = writeln!(
        out,
        "  {:<20}{:>10}{:>10}{:>20}{:>20}",
        "brand", "listings", "share", "mean_price", "mean_mileage"
    );
    for row in &report.brands.rows {
        let _ = writeln!(
            out,
            "  {:<20}{:>10}{:>10.4}{:>20}{:>20}",
            row.brand,
            row.listings,
            row.share,
            format_optional(row.mean_price),
            format_optional(row.mean_mileage)
        );
    }
    out.push('\n');
    write_stats(&mut out, "mean_price across top brands", &report.brands.mean_price_stats);
    write_stats(&mut out, "mean_mileage across top brands", &report.brands.mean_mileage_stats);

    out
}
