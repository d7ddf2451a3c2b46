use csv::{ReaderBuilder, Trim};
use encoding_rs::Encoding;
use log::{debug, warn};

use crate::core::domain::{RawListing, RawTable};
use crate::error::{AnalysisError, AnalysisResult};
use crate::parsing::columns::rename_headers;

/// Default encoding label of the listings export.
pub const DEFAULT_ENCODING: &str = "latin1";

/// Resolve an encoding label (`"latin1"`, `"utf-8"`, ...) to an encoding.
///
/// Labels follow the WHATWG Encoding Standard, so `"latin1"` and
/// `"iso-8859-1"` resolve to windows-1252. The two agree on every byte
/// except 0x80-0x9F, which windows-1252 maps to printable characters.
pub fn resolve_encoding(label: &str) -> AnalysisResult<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| AnalysisError::Encoding(format!("Unknown encoding label: {}", label)))
}

/// Decode raw CSV bytes with the given encoding.
///
/// Byte order marks are not sniffed; the caller's encoding always wins.
pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        warn!(
            "Input contained byte sequences invalid in {}; replaced with U+FFFD",
            encoding.name()
        );
    }
    text.into_owned()
}

/// Parse decoded listings CSV content into a [`RawTable`].
///
/// The header is renamed with the ordered column mapping before rows are
/// deserialized, so fields bind by their snake_case names.
pub fn parse_listings_csv(content: &str, delimiter: u8) -> AnalysisResult<RawTable> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(Trim::Headers)
        .from_reader(content.as_bytes());

    let source_headers = reader.headers()?.clone();
    let renamed = rename_headers(&source_headers)?;
    reader.set_headers(renamed.clone());

    let mut rows = Vec::new();
    for result in reader.deserialize::<RawListing>() {
        rows.push(result?);
    }

    debug!("Parsed {} listing rows", rows.len());

    Ok(RawTable {
        columns: renamed.iter().map(str::to_string).collect(),
        rows,
    })
}

/// Decode and parse listings CSV bytes in one step.
pub fn parse_listings_bytes(
    bytes: &[u8],
    encoding: &'static Encoding,
    delimiter: u8,
) -> AnalysisResult<RawTable> {
    let content = decode_bytes(bytes, encoding);
    parse_listings_csv(&content, delimiter)
}
