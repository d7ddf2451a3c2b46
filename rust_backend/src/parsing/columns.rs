//! Header renaming for the listings CSV.
//!
//! The source header is camelCase; everything downstream uses snake_case.
//! Renaming is positional: column `i` of the source takes the `i`-th name of
//! [`COLUMN_MAPPING`] whatever it was called.

use csv::StringRecord;
use log::warn;

use crate::error::{AnalysisError, AnalysisResult};

/// Ordered `(source name, renamed)` pairs for the 20 source columns.
pub const COLUMN_MAPPING: [(&str, &str); 20] = [
    ("dateCrawled", "date_crawled"),
    ("name", "name"),
    ("seller", "seller"),
    ("offerType", "offer_type"),
    ("price", "price"),
    ("abtest", "abtest"),
    ("vehicleType", "vehicle_type"),
    ("yearOfRegistration", "registration_year"),
    ("gearbox", "gearbox"),
    ("powerPS", "power_ps"),
    ("model", "model"),
    ("odometer", "odometer"),
    ("monthOfRegistration", "registration_month"),
    ("fuelType", "fuel_type"),
    ("brand", "brand"),
    ("notRepairedDamage", "unrepaired_damage"),
    ("dateCreated", "ad_created"),
    ("nrOfPictures", "nr_of_pictures"),
    ("postalCode", "postal_code"),
    ("lastSeen", "last_seen"),
];

/// Renames a source header positionally using [`COLUMN_MAPPING`].
///
/// Fails when the header width differs from the mapping. A source name that
/// differs from the expected one is logged and renamed anyway.
pub fn rename_headers(headers: &StringRecord) -> AnalysisResult<StringRecord> {
    if headers.len() != COLUMN_MAPPING.len() {
        return Err(AnalysisError::SchemaMismatch(format!(
            "expected {} columns, found {}",
            COLUMN_MAPPING.len(),
            headers.len()
        )));
    }

    let mut renamed = StringRecord::with_capacity(256, COLUMN_MAPPING.len());
    for (position, (source, (expected, target))) in
        headers.iter().zip(COLUMN_MAPPING.iter()).enumerate()
    {
        if source.trim() != *expected {
            warn!(
                "Column {} is '{}', expected '{}'; renaming to '{}' by position",
                position, source, expected, target
            );
        }
        renamed.push_field(target);
    }

    Ok(renamed)
}

/// Renames a single column in a column list.
pub fn rename_column(columns: &mut [String], from: &str, to: &str) -> AnalysisResult<()> {
    let slot = columns
        .iter_mut()
        .find(|c| c.as_str() == from)
        .ok_or_else(|| AnalysisError::UnknownColumn(from.to_string()))?;
    *slot = to.to_string();
    Ok(())
}
