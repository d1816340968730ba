//! Error types for the data-loader crate.
//!
//! Loading a catalog can fail in two broad ways:
//! - the source itself is unusable (missing file, I/O failure) which is fatal
//! - a single row is malformed, which the loader may skip depending on
//!   the configured [`MalformedRowPolicy`](crate::loader::MalformedRowPolicy)

use thiserror::Error;

/// Errors that can occur while loading and parsing the movie catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be found or opened
    #[error("Catalog source not found: {path}")]
    SourceNotFound { path: String },

    /// I/O error occurred while reading the catalog
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Row couldn't be decoded by the CSV reader
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    /// Row has fewer fields than the positional contract requires
    #[error("Expected at least {expected} fields but found {found} in line {line}")]
    FieldCountMismatch {
        expected: usize,
        found: usize,
        line: u64,
    },

    /// A field had a value that couldn't be converted
    #[error("Invalid value for {field} at line {line}: {value:?}")]
    InvalidValue {
        field: &'static str,
        value: String,
        line: u64,
    },
}

impl CatalogError {
    /// True for errors that concern a single row rather than the whole source.
    ///
    /// These are the errors the loader is allowed to skip past.
    pub fn is_malformed_record(&self) -> bool {
        matches!(
            self,
            CatalogError::MalformedRecord { .. }
                | CatalogError::FieldCountMismatch { .. }
                | CatalogError::InvalidValue { .. }
        )
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_classification() {
        let row = CatalogError::FieldCountMismatch {
            expected: 21,
            found: 3,
            line: 7,
        };
        assert!(row.is_malformed_record());

        let value = CatalogError::InvalidValue {
            field: "popularity",
            value: "abc".to_string(),
            line: 2,
        };
        assert!(value.is_malformed_record());

        let missing = CatalogError::SourceNotFound {
            path: "movies.csv".to_string(),
        };
        assert!(!missing.is_malformed_record());
    }

    #[test]
    fn test_error_messages_carry_context() {
        let err = CatalogError::InvalidValue {
            field: "popularity",
            value: "high".to_string(),
            line: 12,
        };
        let message = err.to_string();
        assert!(message.contains("popularity"));
        assert!(message.contains("12"));
        assert!(message.contains("high"));
    }
}
