use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::core::domain::{Listing, ListingTable, RawTable};
use crate::error::{AnalysisError, AnalysisResult};
use crate::parsing::columns::rename_column;

/// Currency artifacts stripped from `price` (`"$5,000"`).
pub const PRICE_ARTIFACTS: &[&str] = &["$", ","];

/// Unit and separator artifacts stripped from `odometer` (`"150,000km"`).
pub const ODOMETER_ARTIFACTS: &[&str] = &["km", ","];

/// What to do when a cleansed cell still isn't an integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoercionPolicy {
    /// Abort with [`AnalysisError::Coercion`]
    #[default]
    Strict,
    /// Store a missing value instead
    #[serde(alias = "lenient")]
    Null,
}

/// Remove every occurrence of each pattern, applied in order.
pub fn strip_substrings(value: &str, patterns: &[&str]) -> String {
    patterns
        .iter()
        .fold(value.to_string(), |acc, pattern| acc.replace(pattern, ""))
}

/// Parse a cleansed cell as a base-10 integer.
///
/// Missing input stays missing. Anything else that does not parse is either
/// an error or `None`, depending on `policy`.
pub fn coerce_integer(
    column: &str,
    row: usize,
    value: Option<&str>,
    policy: CoercionPolicy,
) -> AnalysisResult<Option<i64>> {
    let Some(value) = value else {
        return Ok(None);
    };

    match value.trim().parse::<i64>() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => match policy {
            CoercionPolicy::Strict => Err(AnalysisError::Coercion {
                column: column.to_string(),
                row,
                value: value.to_string(),
            }),
            CoercionPolicy::Null => {
                warn!(
                    "Row {}: '{}' value {:?} is not an integer, storing missing",
                    row, column, value
                );
                Ok(None)
            }
        },
    }
}

/// Cleanse `price` and `odometer` on every row and coerce them to integers.
///
/// Row order is preserved. The `odometer` column is renamed `odometer_km`.
pub fn clean_listings(raw: RawTable, policy: CoercionPolicy) -> AnalysisResult<ListingTable> {
    let RawTable { mut columns, rows } = raw;
    let total = rows.len();

    let mut listings = Vec::with_capacity(total);
    for (row, mut record) in rows.into_iter().enumerate() {
        let price_text = record
            .price
            .take()
            .map(|p| strip_substrings(&p, PRICE_ARTIFACTS));
        let odometer_text = record
            .odometer
            .take()
            .map(|o| strip_substrings(&o, ODOMETER_ARTIFACTS));

        let price = coerce_integer("price", row, price_text.as_deref(), policy)?;
        let odometer_km = coerce_integer("odometer", row, odometer_text.as_deref(), policy)?;

        listings.push(Listing::from_raw(record, price, odometer_km));
    }

    rename_column(&mut columns, "odometer", "odometer_km")?;

    info!("Cleaned {} rows (price, odometer_km coerced to integers)", total);

    Ok(ListingTable::new(columns, listings))
}

/// Reduce a timestamp to its `YYYYMMDD` day key.
///
/// Dashes are removed and the first 8 characters kept, so
/// `"2016-03-26 17:47:46"` becomes `"20160326"`.
pub fn truncate_date(value: &str) -> String {
    value.replace('-', "").chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::RawListing;

    fn raw_table(prices: &[Option<&str>], odometers: &[Option<&str>]) -> RawTable {
        let rows = prices
            .iter()
            .zip(odometers.iter())
            .map(|(price, odometer)| RawListing {
                brand: Some("audi".to_string()),
                price: price.map(str::to_string),
                odometer: odometer.map(str::to_string),
                ..Default::default()
            })
            .collect();
        RawTable {
            columns: vec!["price".to_string(), "odometer".to_string(), "brand".to_string()],
            rows,
        }
    }

    #[test]
    fn test_strip_substrings() {
        assert_eq!(strip_substrings("$5,000", PRICE_ARTIFACTS), "5000");
        assert_eq!(strip_substrings("150,000km", ODOMETER_ARTIFACTS), "150000");
        assert_eq!(strip_substrings("$1,234,567", PRICE_ARTIFACTS), "1234567");
        assert_eq!(strip_substrings("", PRICE_ARTIFACTS), "");
    }

    #[test]
    fn test_coerce_integer_strict() {
        assert_eq!(coerce_integer("price", 0, Some("5000"), CoercionPolicy::Strict).unwrap(), Some(5000));
        assert_eq!(coerce_integer("price", 0, Some(" 42 "), CoercionPolicy::Strict).unwrap(), Some(42));
        assert_eq!(coerce_integer("price", 0, None, CoercionPolicy::Strict).unwrap(), None);

        let err = coerce_integer("price", 7, Some("VB"), CoercionPolicy::Strict).unwrap_err();
        match err {
            AnalysisError::Coercion { column, row, value } => {
                assert_eq!(column, "price");
                assert_eq!(row, 7);
                assert_eq!(value, "VB");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_coerce_integer_null_policy() {
        assert_eq!(coerce_integer("price", 0, Some("VB"), CoercionPolicy::Null).unwrap(), None);
        assert_eq!(coerce_integer("price", 0, Some(""), CoercionPolicy::Null).unwrap(), None);
        assert_eq!(coerce_integer("price", 0, Some("12"), CoercionPolicy::Null).unwrap(), Some(12));
    }

    #[test]
    fn test_clean_listings_coerces_and_renames() {
        let raw = raw_table(
            &[Some("$5,000"), Some("$0"), None],
            &[Some("150,000km"), Some("5,000km"), Some("90,000km")],
        );
        let table = clean_listings(raw, CoercionPolicy::Strict).unwrap();

        assert_eq!(table.len(), 3);
        assert!(table.has_column("odometer_km"));
        assert!(!table.has_column("odometer"));
        let prices: Vec<Option<i64>> = table.rows.iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![Some(5000), Some(0), None]);
        let odometers: Vec<Option<i64>> = table.rows.iter().map(|l| l.odometer_km).collect();
        assert_eq!(odometers, vec![Some(150000), Some(5000), Some(90000)]);
        assert_eq!(table.rows[0].brand.as_deref(), Some("audi"));
    }

    #[test]
    fn test_clean_listings_strict_fails_on_garbage() {
        let raw = raw_table(&[Some("$5,000"), Some("on request")], &[Some("1km"), Some("2km")]);
        let err = clean_listings(raw, CoercionPolicy::Strict).unwrap_err();
        assert!(matches!(err, AnalysisError::Coercion { row: 1, .. }));
    }

    #[test]
    fn test_clean_listings_null_policy_keeps_rows() {
        let raw = raw_table(&[Some("$5,000"), Some("on request")], &[Some("1km"), Some("n/a")]);
        let table = clean_listings(raw, CoercionPolicy::Null).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].price, None);
        assert_eq!(table.rows[1].odometer_km, None);
    }

    #[test]
    fn test_truncate_date() {
        assert_eq!(truncate_date("2016-03-26 17:47:46"), "20160326");
        assert_eq!(truncate_date("2015-12-01 00:00:00"), "20151201");
        assert_eq!(truncate_date("2016-03"), "201603");
        assert_eq!(truncate_date(""), "");
    }

    #[test]
    fn test_policy_deserializes_from_config_names() {
        #[derive(Deserialize)]
        struct Holder {
            policy: CoercionPolicy,
        }
        let strict: Holder = toml::from_str("policy = \"strict\"").unwrap();
        let null: Holder = toml::from_str("policy = \"null\"").unwrap();
        let lenient: Holder = toml::from_str("policy = \"lenient\"").unwrap();
        assert_eq!(strict.policy, CoercionPolicy::Strict);
        assert_eq!(null.policy, CoercionPolicy::Null);
        assert_eq!(lenient.policy, CoercionPolicy::Null);
    }
}
