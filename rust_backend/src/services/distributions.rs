use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::core::domain::{Column, Listing, NumericColumn};
use crate::transformations::cleaning::truncate_date;

/// Ordering of a frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Ascending key, missing last
    Key,
    /// Descending count, ties by ascending key
    Count,
}

/// Options for [`value_counts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountOptions {
    pub sort_by: SortBy,
    /// Leave missing values out of both entries and total.
    pub dropna: bool,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            sort_by: SortBy::Count,
            dropna: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub key: Option<String>,
    pub count: usize,
    pub proportion: f64,
}

/// Frequency/proportion tabulation of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyTable {
    pub column: String,
    pub total: usize,
    pub entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    pub fn get(&self, key: &str) -> Option<&FrequencyEntry> {
        self.entries.iter().find(|e| e.key.as_deref() == Some(key))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Descriptive statistics of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
    pub unique: usize,
}

/// Per-column overview: non-null count, distinct values, most frequent value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOverview {
    pub column: String,
    pub non_null: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: usize,
}

/// Integer keys first in numeric order, then text keys, then missing.
fn compare_keys(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match (a.parse::<i64>(), b.parse::<i64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => a.cmp(b),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Tabulate how often each value of a column occurs.
pub fn value_counts<I>(column: &str, values: I, options: CountOptions) -> FrequencyTable
where
    I: IntoIterator<Item = Option<String>>,
{
    let mut counts: HashMap<Option<String>, usize> = HashMap::new();
    let mut total = 0usize;
    for value in values {
        if value.is_none() && options.dropna {
            continue;
        }
        total += 1;
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut entries: Vec<FrequencyEntry> = counts
        .into_iter()
        .map(|(key, count)| FrequencyEntry {
            key,
            count,
            proportion: count as f64 / total as f64,
        })
        .collect();

    match options.sort_by {
        SortBy::Key => entries.sort_by(|a, b| compare_keys(&a.key, &b.key)),
        SortBy::Count => entries.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| compare_keys(&a.key, &b.key))
        }),
    }

    FrequencyTable {
        column: column.to_string(),
        total,
        entries,
    }
}

/// Tabulate a listings column.
pub fn column_counts(listings: &[Listing], column: Column, options: CountOptions) -> FrequencyTable {
    value_counts(column.name(), listings.iter().map(|l| l.text(column)), options)
}

/// Share of listings per day for a timestamp column, sorted by day.
///
/// Missing timestamps are kept as their own entry.
pub fn tabulate_days(listings: &[Listing], column: Column) -> FrequencyTable {
    let days = listings
        .iter()
        .map(|l| l.text(column).map(|ts| truncate_date(&ts)));
    value_counts(
        column.name(),
        days,
        CountOptions {
            sort_by: SortBy::Key,
            dropna: false,
        },
    )
}

/// Linear-interpolated quantile of sorted values.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Compute count, mean, sample standard deviation, quartiles and extremes.
pub fn describe(values: &[f64]) -> ColumnStats {
    let count = values.len();
    if count == 0 {
        return ColumnStats {
            count: 0,
            mean: None,
            std: None,
            min: None,
            q25: None,
            median: None,
            q75: None,
            max: None,
            unique: 0,
        };
    }

    let mean = values.iter().sum::<f64>() / count as f64;

    let std = if count > 1 {
        let variance = values
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum::<f64>()
            / (count - 1) as f64;
        Some(variance.sqrt())
    } else {
        None
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let unique = sorted
        .iter()
        .map(|v| v.to_bits())
        .collect::<HashSet<u64>>()
        .len();

    ColumnStats {
        count,
        mean: Some(mean),
        std,
        min: sorted.first().copied(),
        q25: Some(quantile(&sorted, 0.25)),
        median: Some(quantile(&sorted, 0.5)),
        q75: Some(quantile(&sorted, 0.75)),
        max: sorted.last().copied(),
        unique,
    }
}

/// Describe a numeric listings column, ignoring missing values.
pub fn describe_column(listings: &[Listing], column: NumericColumn) -> ColumnStats {
    let values: Vec<f64> = listings
        .iter()
        .filter_map(|l| l.numeric(column))
        .map(|v| v as f64)
        .collect();
    describe(&values)
}

/// Overview of every column, in column order.
pub fn column_overview(listings: &[Listing]) -> Vec<ColumnOverview> {
    Column::ALL
        .iter()
        .map(|&column| {
            let counts = column_counts(listings, column, CountOptions::default());
            let top = counts.entries.first();
            ColumnOverview {
                column: column.name().to_string(),
                non_null: counts.total,
                unique: counts.entries.len(),
                top: top.and_then(|e| e.key.clone()),
                freq: top.map(|e| e.count).unwrap_or(0),
            }
        })
        .collect()
}
