//! Group-by-category aggregation over the most frequent categories.
//!
//! The headline output of the analysis is a small derived table: for the
//! `n` most listed brands, the share of listings, mean price and mean
//! mileage side by side.

use serde::{Deserialize, Serialize};

use crate::core::domain::{Column, Listing, NumericColumn};
use crate::services::distributions::{column_counts, describe, ColumnStats, CountOptions};

/// Mean of one numeric column for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMean {
    pub key: String,
    /// Number of values that went into the mean.
    pub count: usize,
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandSummaryRow {
    pub brand: String,
    pub listings: usize,
    pub share: f64,
    pub mean_price: Option<f64>,
    pub mean_mileage: Option<f64>,
}

/// Top-brand comparison table plus descriptive statistics of its columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandSummary {
    pub rows: Vec<BrandSummaryRow>,
    pub mean_price_stats: ColumnStats,
    pub mean_mileage_stats: ColumnStats,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The `n` most frequent values of a column with their counts.
///
/// Ordered by count descending, ties by key ascending. Missing values are
/// not candidates.
pub fn top_categories(listings: &[Listing], column: Column, n: usize) -> Vec<(String, usize)> {
    column_counts(listings, column, CountOptions::default())
        .entries
        .into_iter()
        .filter_map(|e| e.key.map(|k| (k, e.count)))
        .take(n)
        .collect()
}

/// Arithmetic mean of `value` per key of `group`, rounded to 2 decimals.
///
/// Missing values are excluded; a key without any value gets `None`.
pub fn group_mean(
    listings: &[Listing],
    group: Column,
    keys: &[String],
    value: NumericColumn,
) -> Vec<GroupMean> {
    keys.iter()
        .map(|key| {
            let values: Vec<i64> = listings
                .iter()
                .filter(|l| l.text(group).as_deref() == Some(key.as_str()))
                .filter_map(|l| l.numeric(value))
                .collect();
            let mean = if values.is_empty() {
                None
            } else {
                let sum: f64 = values.iter().map(|v| *v as f64).sum();
                Some(round2(sum / values.len() as f64))
            };
            GroupMean {
                key: key.clone(),
                count: values.len(),
                mean,
            }
        })
        .collect()
}

/// Build the top-`n` brand comparison table.
pub fn brand_summary(listings: &[Listing], top_n: usize) -> BrandSummary {
    let top = top_categories(listings, Column::Brand, top_n);
    let brands: Vec<String> = top.iter().map(|(brand, _)| brand.clone()).collect();

    let prices = group_mean(listings, Column::Brand, &brands, NumericColumn::Price);
    let mileages = group_mean(listings, Column::Brand, &brands, NumericColumn::OdometerKm);

    let total = listings.len();
    let rows: Vec<BrandSummaryRow> = top
        .into_iter()
        .zip(prices.iter().zip(mileages.iter()))
        .map(|((brand, count), (price, mileage))| BrandSummaryRow {
            brand,
            listings: count,
            share: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            },
            mean_price: price.mean,
            mean_mileage: mileage.mean,
        })
        .collect();

    let price_means: Vec<f64> = rows.iter().filter_map(|r| r.mean_price).collect();
    let mileage_means: Vec<f64> = rows.iter().filter_map(|r| r.mean_mileage).collect();

    BrandSummary {
        mean_price_stats: describe(&price_means),
        mean_mileage_stats: describe(&mileage_means),
        rows,
    }
}
