//! Used-vehicle listings analysis.
//!
//! Loads a Latin-1 listings export, normalises its columns, cleans the price
//! and odometer fields, removes outliers and computes the descriptive tables
//! and per-brand means printed by the `autos-report` binary.

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod parsing;
pub mod preprocessing;
pub mod services;
pub mod transformations;

pub use config::AnalysisConfig;
pub use error::{AnalysisError, AnalysisResult};
pub use preprocessing::{analyze_listings, AnalysisPipeline};
pub use services::report::{render_text, AnalysisReport};
