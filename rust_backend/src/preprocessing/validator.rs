//! Listing data-quality checks with warning reporting.
//!
//! This module inspects cleaned listings for the issues an analyst would look
//! for before trusting aggregates: columns dominated by a single value,
//! missing cells, zero engine power or registration month, and timestamps
//! that do not parse.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::domain::{Column, Listing};
use crate::services::distributions::{column_counts, CountOptions};

/// Timestamp layout of `date_crawled`, `ad_created` and `last_seen`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Share of non-null rows above which a column counts as single-valued.
pub const DEFAULT_DOMINANCE_THRESHOLD: f64 = 0.95;

/// Validation result with categorized issues and statistics.
///
/// Errors make `is_valid` false; warnings are informational.
///
/// # Examples
///
/// ```
/// use autos_analysis::preprocessing::validator::ValidationResult;
///
/// let mut result = ValidationResult::new();
/// assert!(result.is_valid);
///
/// result.add_warning("Column 'seller' is nearly constant".to_string());
/// assert!(result.is_valid);
///
/// result.add_error("No rows to analyse".to_string());
/// assert!(!result.is_valid);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

/// Summary statistics computed during validation.
///
/// * `missing_by_column` - `(column, missing cells)` for columns with gaps, in column order
/// * `dominant_columns` - columns whose most frequent value covers the dominance threshold
/// * `zero_power_ps` - rows with `power_ps == 0`
/// * `zero_registration_month` - rows with `registration_month == 0`
/// * `unparseable_timestamps` - timestamp cells that do not match [`TIMESTAMP_FORMAT`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total_rows: usize,
    pub missing_by_column: Vec<(String, usize)>,
    pub dominant_columns: Vec<String>,
    pub zero_power_ps: usize,
    pub zero_registration_month: usize,
    pub unparseable_timestamps: usize,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    /// Adds a critical error and marks the result as invalid.
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for cleaned listing tables.
///
/// # Examples
///
/// ```no_run
/// use autos_analysis::core::domain::Listing;
/// use autos_analysis::preprocessing::validator::ListingValidator;
///
/// # fn example(listings: &[Listing]) {
/// let result = ListingValidator::validate(listings);
/// for warning in &result.warnings {
///     eprintln!("{}", warning);
/// }
/// # }
/// ```
pub struct ListingValidator;

impl ListingValidator {
    /// Validates listings with [`DEFAULT_DOMINANCE_THRESHOLD`].
    pub fn validate(listings: &[Listing]) -> ValidationResult {
        Self::validate_with_threshold(listings, DEFAULT_DOMINANCE_THRESHOLD)
    }

    /// Validates listings, flagging columns whose top value covers at least
    /// `dominance` of the non-null rows.
    pub fn validate_with_threshold(listings: &[Listing], dominance: f64) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.stats.total_rows = listings.len();

        if listings.is_empty() {
            result.add_error("No listing rows to analyse".to_string());
            return result;
        }

        for column in Column::ALL {
            let counts = column_counts(listings, column, CountOptions::default());

            let missing = listings.len() - counts.total;
            if missing > 0 {
                result
                    .stats
                    .missing_by_column
                    .push((column.name().to_string(), missing));
            }

            if let Some(top) = counts.entries.first() {
                // A column with one distinct value over a single row is not informative
                if counts.total > 1 && top.proportion >= dominance {
                    result.stats.dominant_columns.push(column.name().to_string());
                    result.add_warning(format!(
                        "Column '{}' is {:.1}% '{}'; consider dropping it",
                        column,
                        top.proportion * 100.0,
                        top.key.as_deref().unwrap_or("")
                    ));
                }
            }

            if column.is_timestamp() {
                result.stats.unparseable_timestamps += listings
                    .iter()
                    .filter_map(|l| l.text(column))
                    .filter(|ts| NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).is_err())
                    .count();
            }
        }

        result.stats.zero_power_ps = listings.iter().filter(|l| l.power_ps == Some(0)).count();
        result.stats.zero_registration_month = listings
            .iter()
            .filter(|l| l.registration_month == Some(0))
            .count();

        if result.stats.zero_power_ps > 0 {
            result.add_warning(format!(
                "{} rows have power_ps of 0",
                result.stats.zero_power_ps
            ));
        }
        if result.stats.zero_registration_month > 0 {
            result.add_warning(format!(
                "{} rows have registration_month of 0",
                result.stats.zero_registration_month
            ));
        }
        if result.stats.unparseable_timestamps > 0 {
            result.add_warning(format!(
                "{} timestamps do not match {}",
                result.stats.unparseable_timestamps, TIMESTAMP_FORMAT
            ));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(seller: &str, power_ps: i64, month: i64, crawled: &str) -> Listing {
        Listing {
            seller: Some(seller.to_string()),
            offer_type: Some("Angebot".to_string()),
            brand: Some("opel".to_string()),
            power_ps: Some(power_ps),
            registration_month: Some(month),
            date_crawled: Some(crawled.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_empty_is_error() {
        let result = ListingValidator::validate(&[]);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_validate_flags_dominant_and_zero_values() {
        let listings = vec![
            listing("privat", 75, 3, "2016-03-26 17:47:46"),
            listing("privat", 0, 0, "2016-03-27 10:00:00"),
            listing("privat", 110, 6, "not a timestamp"),
            listing("gewerblich", 0, 7, "2016-03-28 08:30:00"),
        ];

        let result = ListingValidator::validate_with_threshold(&listings, 0.95);
        assert!(result.is_valid);
        assert_eq!(result.stats.total_rows, 4);
        assert_eq!(result.stats.zero_power_ps, 2);
        assert_eq!(result.stats.zero_registration_month, 1);
        assert_eq!(result.stats.unparseable_timestamps, 1);

        // offer_type and brand are constant, seller is only 75% privat
        assert!(result.stats.dominant_columns.contains(&"offer_type".to_string()));
        assert!(result.stats.dominant_columns.contains(&"brand".to_string()));
        assert!(!result.stats.dominant_columns.contains(&"seller".to_string()));

        let lowered = ListingValidator::validate_with_threshold(&listings, 0.75);
        assert!(lowered.stats.dominant_columns.contains(&"seller".to_string()));
    }

    #[test]
    fn test_validate_counts_missing_cells() {
        let listings = vec![
            listing("privat", 75, 3, "2016-03-26 17:47:46"),
            Listing {
                seller: Some("privat".to_string()),
                ..Default::default()
            },
        ];
        let result = ListingValidator::validate(&listings);
        let missing: std::collections::HashMap<_, _> =
            result.stats.missing_by_column.iter().cloned().collect();
        assert_eq!(missing.get("brand"), Some(&1));
        assert_eq!(missing.get("model"), Some(&2));
        assert_eq!(missing.get("seller"), None);
    }
}
