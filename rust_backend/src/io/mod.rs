//! High-level data loading utilities.
//!
//! This module combines file access, decoding and CSV parsing into one
//! loader, and fingerprints the raw input so reports can be traced back to
//! the exact file they were computed from.
//!
//! # Example
//!
//! ```no_run
//! use autos_analysis::io::loaders::ListingLoader;
//! use std::path::Path;
//!
//! let result = ListingLoader::new()
//!     .load_from_file(Path::new("autos.csv"))
//!     .expect("Failed to load");
//! println!("Loaded {} listings", result.num_rows);
//! ```

pub mod checksum;
pub mod loaders;


pub use checksum::calculate_checksum;
pub use loaders::{ListingLoadResult, ListingLoader};
