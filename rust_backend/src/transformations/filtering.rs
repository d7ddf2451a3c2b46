use log::info;
use serde::{Deserialize, Serialize};

use crate::core::domain::{Listing, NumericColumn};

/// Inclusive `[min, max]` bound on a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeFilter {
    pub column: NumericColumn,
    pub min: i64,
    pub max: i64,
}

/// Rows kept and dropped by a [`RangeFilter`].
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    pub kept: Vec<Listing>,
    pub dropped: Vec<Listing>,
}

/// Counts describing a filter run, as shown in reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSummary {
    pub column: NumericColumn,
    pub min: i64,
    pub max: i64,
    pub kept: usize,
    pub dropped: usize,
}

impl RangeFilter {
    pub fn new(column: NumericColumn, min: i64, max: i64) -> Self {
        Self { column, min, max }
    }

    /// Whether the listing's value lies in the range. Missing values never do.
    pub fn contains(&self, listing: &Listing) -> bool {
        listing
            .numeric(self.column)
            .map(|v| v >= self.min && v <= self.max)
            .unwrap_or(false)
    }

    /// Split listings into in-range and out-of-range rows, preserving order.
    pub fn apply(&self, listings: Vec<Listing>) -> FilterOutcome {
        let (kept, dropped): (Vec<Listing>, Vec<Listing>) =
            listings.into_iter().partition(|l| self.contains(l));

        info!(
            "Filter {} in [{}, {}]: kept {}, dropped {}",
            self.column,
            self.min,
            self.max,
            kept.len(),
            dropped.len()
        );

        FilterOutcome { kept, dropped }
    }

    pub fn summarize(&self, outcome: &FilterOutcome) -> FilterSummary {
        FilterSummary {
            column: self.column,
            min: self.min,
            max: self.max,
            kept: outcome.kept.len(),
            dropped: outcome.dropped.len(),
        }
    }
}

/// Keep listings whose `column` value is within `[min, max]` inclusive.
pub fn filter_by_range(
    listings: Vec<Listing>,
    column: NumericColumn,
    min: i64,
    max: i64,
) -> Vec<Listing> {
    RangeFilter::new(column, min, max).apply(listings).kept
}

/// Like [`filter_by_range`], also returning the discarded rows.
pub fn partition_by_range(
    listings: Vec<Listing>,
    column: NumericColumn,
    min: i64,
    max: i64,
) -> (Vec<Listing>, Vec<Listing>) {
    let outcome = RangeFilter::new(column, min, max).apply(listings);
    (outcome.kept, outcome.dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listings_with_prices(prices: &[Option<i64>]) -> Vec<Listing> {
        prices
            .iter()
            .map(|price| Listing {
                price: *price,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_filter_by_range_is_inclusive() {
        let listings = listings_with_prices(&[Some(99), Some(100), Some(5000), Some(500000), Some(500001)]);
        let kept = filter_by_range(listings, NumericColumn::Price, 100, 500000);
        let prices: Vec<Option<i64>> = kept.iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![Some(100), Some(5000), Some(500000)]);
    }

    #[test]
    fn test_filter_by_range_drops_missing() {
        let listings = listings_with_prices(&[None, Some(1000)]);
        let kept = filter_by_range(listings, NumericColumn::Price, 100, 500000);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].price, Some(1000));
    }

    #[test]
    fn test_partition_by_range_years() {
        let listings: Vec<Listing> = [1000, 1910, 2004, 2016, 2017, 9999]
            .iter()
            .map(|year| Listing {
                registration_year: Some(*year),
                ..Default::default()
            })
            .collect();

        let (inside, outside) =
            partition_by_range(listings, NumericColumn::RegistrationYear, 1900, 2016);
        let inside: Vec<i64> = inside.iter().filter_map(|l| l.registration_year).collect();
        let outside: Vec<i64> = outside.iter().filter_map(|l| l.registration_year).collect();
        assert_eq!(inside, vec![1910, 2004, 2016]);
        assert_eq!(outside, vec![1000, 2017, 9999]);
    }

    #[test]
    fn test_range_filter_summary() {
        let filter = RangeFilter::new(NumericColumn::Price, 100, 500000);
        let outcome = filter.apply(listings_with_prices(&[Some(0), Some(150), None]));
        let summary = filter.summarize(&outcome);
        assert_eq!(summary.kept, 1);
        assert_eq!(summary.dropped, 2);
        assert_eq!(summary.column, NumericColumn::Price);
    }

    #[test]
    fn test_empty_input() {
        let kept = filter_by_range(Vec::new(), NumericColumn::OdometerKm, 0, 10);
        assert!(kept.is_empty());
    }
}
