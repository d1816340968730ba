//! Core domain types for the movie catalog.
//!
//! A [`Corpus`] is the ordered set of [`MovieRecord`]s that every query is
//! compared against. Records are built once by the loader and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier as it appears in the catalog.
///
/// Kept as a string: the id column is not guaranteed to be numeric.
pub type MovieId = String;

// =============================================================================
// Movie Records
// =============================================================================

/// One accepted catalog row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    /// Display title; compared case-insensitively
    pub title: String,
    /// Normalised tokens of the composite text column.
    ///
    /// Duplicates are preserved since term frequency is a raw count.
    pub tokens: Vec<String>,
    /// Non-negative popularity score
    pub popularity: f64,
}

impl MovieRecord {
    pub fn new(
        id: impl Into<MovieId>,
        title: impl Into<String>,
        tokens: Vec<String>,
        popularity: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tokens,
            popularity,
        }
    }

    /// Case-insensitive title comparison against an already lowercased title
    pub fn title_matches(&self, lowercase_title: &str) -> bool {
        self.title.to_lowercase() == lowercase_title
    }
}

// =============================================================================
// Corpus - The Comparison Pool
// =============================================================================

/// Ordered, immutable collection of catalog records.
///
/// Insertion order is the catalog's row order; searches that tie on score
/// resolve to the earliest record, so the order is significant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    records: Vec<MovieRecord>,
}

impl Corpus {
    /// Creates an empty corpus
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get a record by position
    pub fn get(&self, position: usize) -> Option<&MovieRecord> {
        self.records.get(position)
    }

    /// First record whose title matches case-insensitively
    pub fn find_by_title(&self, title: &str) -> Option<&MovieRecord> {
        let title = title.to_lowercase();
        self.records.iter().find(|r| r.title_matches(&title))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MovieRecord> {
        self.records.iter()
    }
}

impl From<Vec<MovieRecord>> for Corpus {
    fn from(records: Vec<MovieRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<MovieRecord> for Corpus {
    fn from_iter<I: IntoIterator<Item = MovieRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a MovieRecord;
    type IntoIter = std::slice::Iter<'a, MovieRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// =============================================================================
// Load Statistics
// =============================================================================

/// Counters gathered while loading a catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Data rows read, header excluded
    pub rows_read: usize,
    pub accepted: usize,
    pub skipped_adult: usize,
    pub skipped_malformed: usize,
    /// Set when the record cap stopped the scan before end of file
    pub truncated: bool,
}
