use std::path::Path;

use log::info;

use crate::config::AnalysisConfig;
use crate::core::domain::{Column, NumericColumn};
use crate::error::AnalysisResult;
use crate::io::loaders::{ListingLoadResult, ListingLoader};
use crate::preprocessing::validator::ListingValidator;
use crate::services::aggregates::brand_summary;
use crate::services::distributions::{
    column_counts, column_overview, describe_column, tabulate_days, CountOptions, SortBy,
};
use crate::services::report::{AnalysisReport, SourceSummary};
use crate::transformations::cleaning::clean_listings;

/// Timestamp columns tabulated per day, in report order.
const DATE_COLUMNS: [Column; 3] = [Column::DateCrawled, Column::AdCreated, Column::LastSeen];

/// Main analysis pipeline
pub struct AnalysisPipeline {
    config: AnalysisConfig,
}

impl AnalysisPipeline {
    /// Create a new pipeline with default configuration
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    /// Create a pipeline with custom configuration
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    fn loader(&self) -> AnalysisResult<ListingLoader> {
        Ok(ListingLoader::new()
            .with_encoding_label(&self.config.input.encoding)?
            .with_delimiter(self.config.input.delimiter_byte()?))
    }

    /// Run the full analysis on a listings CSV file
    pub fn process(&self, csv_path: &Path) -> AnalysisResult<AnalysisReport> {
        self.config.validate()?;
        let loaded = self.loader()?.load_from_file(csv_path)?;
        self.run(loaded)
    }

    /// Run the full analysis on in-memory CSV bytes (useful for testing)
    pub fn process_bytes(&self, bytes: &[u8]) -> AnalysisResult<AnalysisReport> {
        self.config.validate()?;
        let loaded = self.loader()?.load_from_bytes(bytes)?;
        self.run(loaded)
    }

    fn run(&self, loaded: ListingLoadResult) -> AnalysisResult<AnalysisReport> {
        let ListingLoadResult {
            table, checksum, ..
        } = loaded;
        let rows_loaded = table.len();

        // Step 1: Cleanse and coerce price / odometer
        let table = clean_listings(table, self.config.cleaning.policy)?;
        let source = SourceSummary {
            checksum,
            rows_loaded,
            columns: table.columns.clone(),
        };

        // Step 2: Overview and data-quality checks on the full table
        let overview = column_overview(&table.rows);
        let validation = ListingValidator::validate(&table.rows);
        let odometer_stats = describe_column(&table.rows, NumericColumn::OdometerKm);
        let price_stats_before = describe_column(&table.rows, NumericColumn::Price);

        // Step 3: Price outliers
        let price_filter = self.config.filters.price_filter();
        let priced = price_filter.apply(table.rows);
        let price_filter_summary = price_filter.summarize(&priced);
        let listings = priced.kept;

        let price_stats = describe_column(&listings, NumericColumn::Price);
        let registration_month_stats = describe_column(&listings, NumericColumn::RegistrationMonth);

        // Step 4: Day distributions of the timestamp columns
        let date_distributions = DATE_COLUMNS
            .iter()
            .map(|&column| tabulate_days(&listings, column))
            .collect();

        // Step 5: Registration year outliers, kept aside from the main table
        let registration_year_stats = describe_column(&listings, NumericColumn::RegistrationYear);
        let year_filter = self.config.filters.year_filter();
        let dated = year_filter.apply(listings.clone());
        let year_filter_summary = year_filter.summarize(&dated);
        let registration_years = column_counts(
            &dated.kept,
            Column::RegistrationYear,
            CountOptions {
                sort_by: SortBy::Key,
                dropna: true,
            },
        );

        // Step 6: Brand aggregates
        let aggregate_rows = if self.config.aggregates.apply_year_filter {
            &dated.kept
        } else {
            &listings
        };
        let brand_shares = column_counts(aggregate_rows, Column::Brand, CountOptions::default());
        let brands = brand_summary(aggregate_rows, self.config.aggregates.top_n);

        info!(
            "Analysis complete: {} rows loaded, {} after price filter, {} brands compared",
            rows_loaded,
            listings.len(),
            brands.rows.len()
        );

        Ok(AnalysisReport {
            source,
            overview,
            validation,
            odometer_stats,
            price_stats_before,
            price_filter: price_filter_summary,
            price_stats,
            registration_month_stats,
            date_distributions,
            registration_year_stats,
            year_filter: year_filter_summary,
            registration_years,
            brand_shares,
            brands,
        })
    }
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to analyse a listings file with default settings
pub fn analyze_listings(csv_path: &Path) -> AnalysisResult<AnalysisReport> {
    AnalysisPipeline::new().process(csv_path)
}
