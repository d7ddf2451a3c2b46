//! Service layer for descriptive statistics and reporting.
//!
//! This module contains the computations that turn cleaned listings into the
//! figures an analyst reads: frequency tables, numeric descriptions, the
//! top-brand comparison, and the assembled report.

pub mod aggregates;
pub mod distributions;
pub mod report;

pub use aggregates::{brand_summary, group_mean, top_categories, BrandSummary, BrandSummaryRow};
pub use distributions::{
    column_overview, describe, describe_column, tabulate_days, value_counts, ColumnStats,
    CountOptions, FrequencyTable, SortBy,
};
pub use report::{render_text, AnalysisReport};
