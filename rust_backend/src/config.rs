//! Analysis configuration file support.
//!
//! This module reads the analyst's thresholds (price and registration-year
//! bounds, how many brands to compare, coercion policy) from a TOML file.
//! Every key is optional and falls back to the defaults below.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::domain::NumericColumn;
use crate::error::{AnalysisError, AnalysisResult};
use crate::io::loaders::default_encoding_label;
use crate::transformations::cleaning::CoercionPolicy;
use crate::transformations::filtering::RangeFilter;

/// Analysis configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub input: InputSettings,
    #[serde(default)]
    pub cleaning: CleaningSettings,
    #[serde(default)]
    pub filters: FilterSettings,
    #[serde(default)]
    pub aggregates: AggregateSettings,
}

/// How the CSV is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSettings {
    #[serde(default = "default_encoding_label")]
    pub encoding: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningSettings {
    #[serde(default)]
    pub policy: CoercionPolicy,
}

/// Inclusive outlier bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    #[serde(default = "default_price_min")]
    pub price_min: i64,
    #[serde(default = "default_price_max")]
    pub price_max: i64,
    #[serde(default = "default_year_min")]
    pub year_min: i64,
    #[serde(default = "default_year_max")]
    pub year_max: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSettings {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Compute brand aggregates on the year-filtered rows instead of the
    /// price-filtered ones.
    #[serde(default)]
    pub apply_year_filter: bool,
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_price_min() -> i64 {
    100
}

fn default_price_max() -> i64 {
    500_000
}

fn default_year_min() -> i64 {
    1900
}

fn default_year_max() -> i64 {
    2016
}

fn default_top_n() -> usize {
    6
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            encoding: default_encoding_label(),
            delimiter: default_delimiter(),
        }
    }
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            price_min: default_price_min(),
            price_max: default_price_max(),
            year_min: default_year_min(),
            year_max: default_year_max(),
        }
    }
}

impl Default for AggregateSettings {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            apply_year_filter: false,
        }
    }
}

impl InputSettings {
    /// The delimiter as a single byte.
    pub fn delimiter_byte(&self) -> AnalysisResult<u8> {
        match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(AnalysisError::ConfigurationError(format!(
                "input.delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            ))),
        }
    }
}

impl FilterSettings {
    pub fn price_filter(&self) -> RangeFilter {
        RangeFilter::new(NumericColumn::Price, self.price_min, self.price_max)
    }

    pub fn year_filter(&self) -> RangeFilter {
        RangeFilter::new(NumericColumn::RegistrationYear, self.year_min, self.year_max)
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(AnalysisConfig)` if successful
    /// * `Err(AnalysisError::ConfigurationError)` if the file cannot be read, parsed or validated
    pub fn from_file<P: AsRef<Path>>(path: P) -> AnalysisResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            AnalysisError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> AnalysisResult<Self> {
        let deserializer = toml::Deserializer::new(content);
        let config: AnalysisConfig = serde_path_to_error::deserialize(deserializer).map_err(|e| {
            AnalysisError::ConfigurationError(format!(
                "Failed to parse config at '{}': {}",
                e.path(),
                e.inner()
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `autos.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    ///
    /// When no file exists the defaults are used.
    pub fn from_default_location() -> AnalysisResult<Self> {
        let search_paths = [
            PathBuf::from("autos.toml"),
            PathBuf::from("rust_backend/autos.toml"),
            PathBuf::from("../autos.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                info!("Using configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        info!("No autos.toml found, using default configuration");
        Ok(Self::default())
    }

    /// Check bounds and settings for consistency.
    pub fn validate(&self) -> AnalysisResult<()> {
        self.input.delimiter_byte()?;

        if self.filters.price_min > self.filters.price_max {
            return Err(AnalysisError::ConfigurationError(format!(
                "filters.price_min ({}) is greater than filters.price_max ({})",
                self.filters.price_min, self.filters.price_max
            )));
        }

        if self.filters.year_min > self.filters.year_max {
            return Err(AnalysisError::ConfigurationError(format!(
                "filters.year_min ({}) is greater than filters.year_max ({})",
                self.filters.year_min, self.filters.year_max
            )));
        }

        if self.aggregates.top_n == 0 {
            return Err(AnalysisError::ConfigurationError(
                "aggregates.top_n must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
