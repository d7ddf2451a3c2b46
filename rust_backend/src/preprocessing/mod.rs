pub mod pipeline;
pub mod validator;

pub use pipeline::{analyze_listings, AnalysisPipeline};
pub use validator::{ListingValidator, ValidationResult, ValidationStats};
