//! Property tests for price/odometer cleansing and range filtering.

use proptest::prelude::*;

use autos_analysis::core::{Listing, NumericColumn};
use autos_analysis::services::distributions::{value_counts, CountOptions, SortBy};
use autos_analysis::transformations::cleaning::{
    coerce_integer, strip_substrings, truncate_date, CoercionPolicy, ODOMETER_ARTIFACTS,
    PRICE_ARTIFACTS,
};
use autos_analysis::transformations::filtering::{partition_by_range, RangeFilter};

/// `1234567` -> `"1,234,567"`
fn with_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn priced(prices: Vec<Option<i64>>) -> Vec<Listing> {
    prices
        .into_iter()
        .enumerate()
        .map(|(i, price)| Listing {
            name: Some(format!("car_{}", i)),
            price,
            ..Default::default()
        })
        .collect()
}

proptest! {
    #[test]
    fn price_text_round_trips_to_integer(value in 0u64..10_000_000_000) {
        let text = format!("${}", with_thousands(value));
        let cleaned = strip_substrings(&text, PRICE_ARTIFACTS);
        let parsed = coerce_integer("price", 0, Some(&cleaned), CoercionPolicy::Strict).unwrap();
        prop_assert_eq!(parsed, Some(value as i64));
    }

    #[test]
    fn odometer_text_round_trips_to_integer(value in 0u64..1_000_000) {
        let text = format!("{}km", with_thousands(value));
        let cleaned = strip_substrings(&text, ODOMETER_ARTIFACTS);
        let parsed = coerce_integer("odometer", 0, Some(&cleaned), CoercionPolicy::Strict).unwrap();
        prop_assert_eq!(parsed, Some(value as i64));
    }

    #[test]
    fn lenient_coercion_never_fails(text in "\\PC*") {
        prop_assert!(coerce_integer("price", 0, Some(&text), CoercionPolicy::Null).is_ok());
    }

    #[test]
    fn truncated_dates_are_short_and_dashless(text in "[0-9: -]{0,30}") {
        let day = truncate_date(&text);
        prop_assert!(day.chars().count() <= 8);
        prop_assert!(!day.contains('-'));
    }

    #[test]
    fn range_filter_partitions_rows(
        prices in prop::collection::vec(prop::option::of(-1_000i64..1_000_000), 0..60),
        min in -500i64..1_000,
        span in 0i64..600_000,
    ) {
        let max = min + span;
        let total = prices.len();
        let (kept, dropped) = partition_by_range(priced(prices), NumericColumn::Price, min, max);

        prop_assert_eq!(kept.len() + dropped.len(), total);
        let filter = RangeFilter::new(NumericColumn::Price, min, max);
        prop_assert!(kept.iter().all(|l| filter.contains(l)));
        prop_assert!(dropped.iter().all(|l| !filter.contains(l)));

        // relative order of kept rows is preserved
        let ids: Vec<usize> = kept
            .iter()
            .filter_map(|l| l.name.as_ref())
            .filter_map(|n| n.trim_start_matches("car_").parse().ok())
            .collect();
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn proportions_with_missing_sum_to_one(
        values in prop::collection::vec(prop::option::of("[a-d]"), 1..80),
    ) {
        let options = CountOptions { sort_by: SortBy::Key, dropna: false };
        let table = value_counts("brand", values.clone(), options);

        prop_assert_eq!(table.total, values.len());
        let sum: f64 = table.entries.iter().map(|e| e.proportion).sum();
        prop_assert!((sum - 1.0).abs() < 1e-9);
        prop_assert_eq!(table.entries.iter().map(|e| e.count).sum::<usize>(), values.len());
    }
}
