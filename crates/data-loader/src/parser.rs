//! Parser for catalog rows.
//!
//! The catalog is a comma-delimited file with one header row. Only a handful
//! of positional fields are read; their positions are a fixed contract with
//! the data source:
//!
//! | field | use                                         |
//! |-------|---------------------------------------------|
//! | 0     | adult flag                                  |
//! | 3     | weighted text column (repeated in the text) |
//! | 5     | identifier                                  |
//! | 9     | extra text column                           |
//! | 10    | popularity                                  |
//! | 19    | extra text column                           |
//! | 20    | title                                       |

use crate::error::{CatalogError, Result};
use crate::normalize::normalize;
use crate::types::MovieRecord;
use csv::StringRecord;

pub const ADULT_FIELD: usize = 0;
pub const WEIGHTED_TEXT_FIELD: usize = 3;
pub const ID_FIELD: usize = 5;
pub const EXTRA_TEXT_FIELDS: [usize; 2] = [9, 19];
pub const POPULARITY_FIELD: usize = 10;
pub const TITLE_FIELD: usize = 20;

/// Rows with fewer fields than this cannot satisfy the positional contract
pub const MIN_FIELDS: usize = TITLE_FIELD + 1;

/// Check whether a row is flagged as adult content
///
/// The flag column holds `True`/`False`; `1` is accepted as well.
pub fn is_adult(row: &StringRecord) -> bool {
    row.get(ADULT_FIELD)
        .map(str::trim)
        .is_some_and(|flag| flag.eq_ignore_ascii_case("true") || flag == "1")
}

/// Parse one catalog row into a [`MovieRecord`].
///
/// The record's tokens come from a composite text: the weighted column
/// repeated `weighted_text_repeat` times followed by each extra column once,
/// joined by single spaces.
///
/// # Errors
/// - `FieldCountMismatch` when the row is too short
/// - `InvalidValue` when popularity is not a finite, non-negative number
pub fn parse_record(row: &StringRecord, weighted_text_repeat: usize) -> Result<MovieRecord> {
    let line = line_of(row);

    if row.len() < MIN_FIELDS {
        return Err(CatalogError::FieldCountMismatch {
            expected: MIN_FIELDS,
            found: row.len(),
            line,
        });
    }

    // Length was checked above, so positional access can't miss
    let field = move |idx: usize| row.get(idx).unwrap_or_default();

    let popularity = parse_popularity(field(POPULARITY_FIELD), line)?;
    let text = composite_text(
        field(WEIGHTED_TEXT_FIELD),
        EXTRA_TEXT_FIELDS.map(field),
        weighted_text_repeat,
    );

    Ok(MovieRecord {
        id: field(ID_FIELD).to_string(),
        title: field(TITLE_FIELD).to_string(),
        tokens: normalize(&text),
        popularity,
    })
}

/// Build the text blob that gets tokenised for a row
fn composite_text(weighted: &str, extra: [&str; 2], repeat: usize) -> String {
    std::iter::repeat_n(weighted, repeat)
        .chain(extra)
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_popularity(value: &str, line: u64) -> Result<f64> {
    let invalid = || CatalogError::InvalidValue {
        field: "popularity",
        value: value.to_string(),
        line,
    };

    let popularity: f64 = value.trim().parse().map_err(|_| invalid())?;
    if !popularity.is_finite() || popularity < 0.0 {
        return Err(invalid());
    }
    Ok(popularity)
}

fn line_of(row: &StringRecord) -> u64 {
    row.position().map(|p| p.line()).unwrap_or(0)
}

/// Map a CSV reader error onto the catalog error kinds.
///
/// I/O failures stay fatal; anything else is a problem with one row.
pub(crate) fn from_csv_error(err: csv::Error) -> CatalogError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => CatalogError::Io(io),
        _ => CatalogError::MalformedRecord { line, reason },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(adult: &str, weighted: &str, id: &str, popularity: &str, title: &str) -> StringRecord {
        let mut fields = vec![String::new(); 24];
        fields[ADULT_FIELD] = adult.to_string();
        fields[WEIGHTED_TEXT_FIELD] = weighted.to_string();
        fields[ID_FIELD] = id.to_string();
        fields[9] = "A lonely robot".to_string();
        fields[POPULARITY_FIELD] = popularity.to_string();
        fields[19] = "Space adventure".to_string();
        fields[TITLE_FIELD] = title.to_string();
        StringRecord::from(fields)
    }

    #[test]
    fn test_parse_record() {
        let record = parse_record(&row("False", "Sci-Fi", "862", "21.9", "WALL-E"), 5).unwrap();

        assert_eq!(record.id, "862");
        assert_eq!(record.title, "WALL-E");
        assert_eq!(record.popularity, 21.9);
        assert_eq!(
            record.tokens,
            vec!["sci-fi", "sci-fi", "sci-fi", "sci-fi", "sci-fi", "a", "lonely", "robot", "space", "adventure"]
        );
    }

    #[test]
    fn test_weighted_repeat_is_configurable() {
        let record = parse_record(&row("False", "drama", "1", "3", "X"), 1).unwrap();
        assert_eq!(record.tokens.iter().filter(|t| *t == "drama").count(), 1);
    }

    #[test]
    fn test_non_numeric_popularity_is_an_error() {
        let err = parse_record(&row("False", "", "1", "popular", "X"), 5).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidValue { field: "popularity", .. }
        ));
    }

    #[test]
    fn test_negative_or_nan_popularity_is_an_error() {
        assert!(parse_record(&row("False", "", "1", "-2.5", "X"), 5).is_err());
        assert!(parse_record(&row("False", "", "1", "NaN", "X"), 5).is_err());
        assert!(parse_record(&row("False", "", "1", "inf", "X"), 5).is_err());
    }

    #[test]
    fn test_short_row() {
        let short = StringRecord::from(vec!["False", "x", "y"]);
        let err = parse_record(&short, 5).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::FieldCountMismatch { expected: 21, found: 3, .. }
        ));
    }

    #[test]
    fn test_is_adult() {
        assert!(is_adult(&row("True", "", "1", "1", "X")));
        assert!(is_adult(&row("true", "", "1", "1", "X")));
        assert!(is_adult(&row("1", "", "1", "1", "X")));
        assert!(!is_adult(&row("False", "", "1", "1", "X")));
        assert!(!is_adult(&StringRecord::new()));
    }
}
