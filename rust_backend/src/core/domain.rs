//! Domain models for used-vehicle listing records.
//!
//! A listing goes through two shapes: [`RawListing`] holds a row exactly as
//! read from the CSV (after header renaming), and [`Listing`] holds the same
//! row once `price` and `odometer` have been cleansed into integers.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One row of the listings CSV after header renaming.
///
/// Empty cells deserialize to `None`. `price` and `odometer` are still the
/// raw text (`"$5,000"`, `"150,000km"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawListing {
    pub date_crawled: Option<String>,
    pub name: Option<String>,
    pub seller: Option<String>,
    pub offer_type: Option<String>,
    pub price: Option<String>,
    pub abtest: Option<String>,
    pub vehicle_type: Option<String>,
    pub registration_year: Option<i64>,
    pub gearbox: Option<String>,
    pub power_ps: Option<i64>,
    pub model: Option<String>,
    pub odometer: Option<String>,
    pub registration_month: Option<i64>,
    pub fuel_type: Option<String>,
    pub brand: Option<String>,
    pub unrepaired_damage: Option<String>,
    pub ad_created: Option<String>,
    pub nr_of_pictures: Option<i64>,
    pub postal_code: Option<i64>,
    pub last_seen: Option<String>,
}

/// A listing with `price` and `odometer_km` coerced to integers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub date_crawled: Option<String>,
    pub name: Option<String>,
    pub seller: Option<String>,
    pub offer_type: Option<String>,
    pub price: Option<i64>,
    pub abtest: Option<String>,
    pub vehicle_type: Option<String>,
    pub registration_year: Option<i64>,
    pub gearbox: Option<String>,
    pub power_ps: Option<i64>,
    pub model: Option<String>,
    pub odometer_km: Option<i64>,
    pub registration_month: Option<i64>,
    pub fuel_type: Option<String>,
    pub brand: Option<String>,
    pub unrepaired_damage: Option<String>,
    pub ad_created: Option<String>,
    pub nr_of_pictures: Option<i64>,
    pub postal_code: Option<i64>,
    pub last_seen: Option<String>,
}

impl Listing {
    /// Builds a cleaned listing from its raw row and the coerced numeric values.
    pub fn from_raw(raw: RawListing, price: Option<i64>, odometer_km: Option<i64>) -> Self {
        Self {
            date_crawled: raw.date_crawled,
            name: raw.name,
            seller: raw.seller,
            offer_type: raw.offer_type,
            price,
            abtest: raw.abtest,
            vehicle_type: raw.vehicle_type,
            registration_year: raw.registration_year,
            gearbox: raw.gearbox,
            power_ps: raw.power_ps,
            model: raw.model,
            odometer_km,
            registration_month: raw.registration_month,
            fuel_type: raw.fuel_type,
            brand: raw.brand,
            unrepaired_damage: raw.unrepaired_damage,
            ad_created: raw.ad_created,
            nr_of_pictures: raw.nr_of_pictures,
            postal_code: raw.postal_code,
            last_seen: raw.last_seen,
        }
    }

    /// Returns the value of a numeric column.
    pub fn numeric(&self, column: NumericColumn) -> Option<i64> {
        match column {
            NumericColumn::Price => self.price,
            NumericColumn::OdometerKm => self.odometer_km,
            NumericColumn::RegistrationYear => self.registration_year,
            NumericColumn::RegistrationMonth => self.registration_month,
            NumericColumn::PowerPs => self.power_ps,
            NumericColumn::NrOfPictures => self.nr_of_pictures,
            NumericColumn::PostalCode => self.postal_code,
        }
    }

    /// Returns any column rendered as text, `None` when the cell is missing.
    pub fn text(&self, column: Column) -> Option<String> {
        if let Some(numeric) = column.as_numeric() {
            return self.numeric(numeric).map(|v| v.to_string());
        }
        let value = match column {
            Column::DateCrawled => &self.date_crawled,
            Column::Name => &self.name,
            Column::Seller => &self.seller,
            Column::OfferType => &self.offer_type,
            Column::Abtest => &self.abtest,
            Column::VehicleType => &self.vehicle_type,
            Column::Gearbox => &self.gearbox,
            Column::Model => &self.model,
            Column::FuelType => &self.fuel_type,
            Column::Brand => &self.brand,
            Column::UnrepairedDamage => &self.unrepaired_damage,
            Column::AdCreated => &self.ad_created,
            Column::LastSeen => &self.last_seen,
            _ => return None,
        };
        value.clone()
    }
}

/// Columns of a cleaned listing, in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    DateCrawled,
    Name,
    Seller,
    OfferType,
    Price,
    Abtest,
    VehicleType,
    RegistrationYear,
    Gearbox,
    PowerPs,
    Model,
    OdometerKm,
    RegistrationMonth,
    FuelType,
    Brand,
    UnrepairedDamage,
    AdCreated,
    NrOfPictures,
    PostalCode,
    LastSeen,
}

static COLUMNS_BY_NAME: Lazy<HashMap<&'static str, Column>> =
    Lazy::new(|| Column::ALL.iter().map(|c| (c.name(), *c)).collect());

impl Column {
    pub const ALL: [Column; 20] = [
        Column::DateCrawled,
        Column::Name,
        Column::Seller,
        Column::OfferType,
        Column::Price,
        Column::Abtest,
        Column::VehicleType,
        Column::RegistrationYear,
        Column::Gearbox,
        Column::PowerPs,
        Column::Model,
        Column::OdometerKm,
        Column::RegistrationMonth,
        Column::FuelType,
        Column::Brand,
        Column::UnrepairedDamage,
        Column::AdCreated,
        Column::NrOfPictures,
        Column::PostalCode,
        Column::LastSeen,
    ];

    /// The snake_case column name used in reports and configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Column::DateCrawled => "date_crawled",
            Column::Name => "name",
            Column::Seller => "seller",
            Column::OfferType => "offer_type",
            Column::Price => "price",
            Column::Abtest => "abtest",
            Column::VehicleType => "vehicle_type",
            Column::RegistrationYear => "registration_year",
            Column::Gearbox => "gearbox",
            Column::PowerPs => "power_ps",
            Column::Model => "model",
            Column::OdometerKm => "odometer_km",
            Column::RegistrationMonth => "registration_month",
            Column::FuelType => "fuel_type",
            Column::Brand => "brand",
            Column::UnrepairedDamage => "unrepaired_damage",
            Column::AdCreated => "ad_created",
            Column::NrOfPictures => "nr_of_pictures",
            Column::PostalCode => "postal_code",
            Column::LastSeen => "last_seen",
        }
    }

    /// Looks a column up by its snake_case name.
    pub fn from_name(name: &str) -> Option<Column> {
        COLUMNS_BY_NAME.get(name).copied()
    }

    pub fn as_numeric(&self) -> Option<NumericColumn> {
        match self {
            Column::Price => Some(NumericColumn::Price),
            Column::OdometerKm => Some(NumericColumn::OdometerKm),
            Column::RegistrationYear => Some(NumericColumn::RegistrationYear),
            Column::RegistrationMonth => Some(NumericColumn::RegistrationMonth),
            Column::PowerPs => Some(NumericColumn::PowerPs),
            Column::NrOfPictures => Some(NumericColumn::NrOfPictures),
            Column::PostalCode => Some(NumericColumn::PostalCode),
            _ => None,
        }
    }

    /// Whether the column holds a `YYYY-MM-DD HH:MM:SS` timestamp.
    pub fn is_timestamp(&self) -> bool {
        matches!(
            self,
            Column::DateCrawled | Column::AdCreated | Column::LastSeen
        )
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Integer-valued columns that range filters and means can operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    Price,
    OdometerKm,
    RegistrationYear,
    RegistrationMonth,
    PowerPs,
    NrOfPictures,
    PostalCode,
}

impl NumericColumn {
    pub fn name(&self) -> &'static str {
        Column::from(*self).name()
    }
}

impl From<NumericColumn> for Column {
    fn from(column: NumericColumn) -> Self {
        match column {
            NumericColumn::Price => Column::Price,
            NumericColumn::OdometerKm => Column::OdometerKm,
            NumericColumn::RegistrationYear => Column::RegistrationYear,
            NumericColumn::RegistrationMonth => Column::RegistrationMonth,
            NumericColumn::PowerPs => Column::PowerPs,
            NumericColumn::NrOfPictures => Column::NrOfPictures,
            NumericColumn::PostalCode => Column::PostalCode,
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rows as loaded from the CSV, with the renamed header.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<RawListing>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Cleaned listings together with the column names in effect.
#[derive(Debug, Clone, Default)]
pub struct ListingTable {
    pub columns: Vec<String>,
    pub rows: Vec<Listing>,
}

impl ListingTable {
    pub fn new(columns: Vec<String>, rows: Vec<Listing>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}
