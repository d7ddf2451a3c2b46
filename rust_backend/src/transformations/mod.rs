//! Data transformation and cleaning utilities.
//!
//! This module provides the row-level operations of the analysis: cleansing
//! currency and unit artifacts out of numeric-like text columns, coercing
//! them to integers, and inclusive range filtering.
//!
//! # Modules
//!
//! - [`cleaning`]: Strip fixed substrings, coerce to integers, truncate timestamps
//! - [`filtering`]: Inclusive range filters over numeric columns
//!
//! # Example
//!
//! ```no_run
//! use autos_analysis::core::domain::{NumericColumn, RawTable};
//! use autos_analysis::transformations::{clean_listings, filter_by_range, CoercionPolicy};
//!
//! # fn example(raw: RawTable) -> autos_analysis::error::AnalysisResult<()> {
//! let table = clean_listings(raw, CoercionPolicy::Strict)?;
//! let priced = filter_by_range(table.rows, NumericColumn::Price, 100, 500_000);
//! # Ok(())
//! # }
//! ```

pub mod cleaning;
pub mod filtering;

pub use cleaning::{
    clean_listings, coerce_integer, strip_substrings, truncate_date, CoercionPolicy,
    ODOMETER_ARTIFACTS, PRICE_ARTIFACTS,
};
pub use filtering::{
    filter_by_range, partition_by_range, FilterOutcome, FilterSummary, RangeFilter,
};
