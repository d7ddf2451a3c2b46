//! Parsers for the vehicle listings export.
//!
//! # Parsers
//!
//! - [`columns`]: Ordered header mapping from the camelCase export to snake_case
//! - [`csv_parser`]: Decode (Latin-1 by default) and deserialize CSV rows
//!
//! # Example
//!
//! ```no_run
//! use autos_analysis::parsing::csv_parser::{parse_listings_bytes, resolve_encoding};
//!
//! let bytes = std::fs::read("autos.csv").expect("Failed to read file");
//! let encoding = resolve_encoding("latin1").expect("Unknown encoding");
//! let table = parse_listings_bytes(&bytes, encoding, b',').expect("Failed to parse listings");
//! println!("Loaded {} rows", table.len());
//! ```

pub mod columns;
pub mod csv_parser;


pub use columns::{rename_column, rename_headers, COLUMN_MAPPING};
pub use csv_parser::{parse_listings_bytes, parse_listings_csv, resolve_encoding};
