//! Error types for listing analysis operations.

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Error type for analysis operations
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Cannot convert {value:?} in column '{column}' (row {row}) to an integer")]
    Coercion {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl AnalysisError {
    /// Whether this error came from numeric coercion of a cell.
    pub fn is_coercion(&self) -> bool {
        matches!(self, AnalysisError::Coercion { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coercion_message_names_column_and_row() {
        let err = AnalysisError::Coercion {
            column: "price".to_string(),
            row: 12,
            value: "abc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'price'"));
        assert!(msg.contains("row 12"));
        assert!(msg.contains("\"abc\""));
        assert!(err.is_coercion());
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AnalysisError = io.into();
        assert!(matches!(err, AnalysisError::Io(_)));
        assert!(!err.is_coercion());
    }
}
