use std::fs;
use std::path::Path;

use encoding_rs::Encoding;
use log::info;

use crate::core::domain::RawTable;
use crate::error::{AnalysisError, AnalysisResult};
use crate::io::checksum::calculate_checksum;
use crate::parsing::csv_parser::{self, DEFAULT_ENCODING};

/// Result of loading the listings file
#[derive(Debug)]
pub struct ListingLoadResult {
    pub table: RawTable,
    /// SHA-256 of the raw bytes, before decoding
    pub checksum: String,
    pub num_rows: usize,
}

impl ListingLoadResult {
    pub fn new(table: RawTable, checksum: String) -> Self {
        let num_rows = table.len();
        Self {
            table,
            checksum,
            num_rows,
        }
    }
}

/// Reads the listings CSV with a fixed encoding and delimiter
#[derive(Debug, Clone)]
pub struct ListingLoader {
    encoding: &'static Encoding,
    delimiter: u8,
}

impl ListingLoader {
    /// Latin-1, comma-delimited
    ///
    /// "Latin-1" here is windows-1252, the encoding `encoding_rs` uses for
    /// the `latin1` label. Bytes 0x80-0x9F decode to printable characters
    /// (0x80 is `€`) rather than ISO-8859-1 control codes.
    pub fn new() -> Self {
        Self {
            encoding: encoding_rs::WINDOWS_1252,
            delimiter: b',',
        }
    }

    pub fn with_encoding_label(mut self, label: &str) -> AnalysisResult<Self> {
        self.encoding = csv_parser::resolve_encoding(label)?;
        Ok(self)
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Load listings from a CSV file
    pub fn load_from_file(&self, path: &Path) -> AnalysisResult<ListingLoadResult> {
        let bytes = fs::read(path).map_err(|e| {
            AnalysisError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read {}: {}", path.display(), e),
            ))
        })?;
        info!("Read {} bytes from {}", bytes.len(), path.display());
        self.load_from_bytes(&bytes)
    }

    /// Load listings from raw CSV bytes
    pub fn load_from_bytes(&self, bytes: &[u8]) -> AnalysisResult<ListingLoadResult> {
        let checksum = calculate_checksum(bytes);
        let table = csv_parser::parse_listings_bytes(bytes, self.encoding, self.delimiter)?;

        info!(
            "Loaded {} listings ({} decoding, sha256 {})",
            table.len(),
            self.encoding.name(),
            checksum
        );

        Ok(ListingLoadResult::new(table, checksum))
    }
}

impl Default for ListingLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Label of the loader's default encoding, for configuration defaults.
pub fn default_encoding_label() -> String {
    DEFAULT_ENCODING.to_string()
}
