//! Corpus loading from a catalog file.
//!
//! Steps:
//! 1. Open the catalog (missing file is fatal)
//! 2. Stream rows through the CSV reader, header skipped
//! 3. Drop adult-flagged rows
//! 4. Parse accepted rows, applying the malformed-row policy
//! 5. Stop once `max_records` rows have been accepted

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::{Corpus, LoadReport, MovieRecord};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Catalog file looked up when no path is given
pub const DEFAULT_CATALOG_PATH: &str = "movies.csv";

/// Default cap on accepted rows per build
pub const DEFAULT_MAX_RECORDS: usize = 19_000;

/// Default number of times the weighted text column is repeated
pub const DEFAULT_WEIGHTED_TEXT_REPEAT: usize = 5;

/// What to do with a row that can't be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedRowPolicy {
    /// Log the row and keep loading
    #[default]
    Skip,
    /// Fail the whole load with the row's error
    Abort,
}

/// Options controlling a catalog load
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub max_records: usize,
    pub weighted_text_repeat: usize,
    pub malformed_rows: MalformedRowPolicy,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self {
            max_records: DEFAULT_MAX_RECORDS,
            weighted_text_repeat: DEFAULT_WEIGHTED_TEXT_REPEAT,
            malformed_rows: MalformedRowPolicy::Skip,
        }
    }

    /// Configure the accepted-row cap (default: 19,000)
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }

    /// Configure how often the weighted column is repeated (default: 5)
    pub fn with_weighted_text_repeat(mut self, repeat: usize) -> Self {
        self.weighted_text_repeat = repeat;
        self
    }

    pub fn with_malformed_rows(mut self, policy: MalformedRowPolicy) -> Self {
        self.malformed_rows = policy;
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl Corpus {
    /// Load a corpus from a catalog file on disk.
    ///
    /// The file handle is owned by the reader and released on every exit
    /// path, including a mid-stream abort.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path, options: &LoadOptions) -> Result<(Self, LoadReport)> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                CatalogError::SourceNotFound {
                    path: path.display().to_string(),
                }
            }
            _ => CatalogError::Io(e),
        })?;

        Self::load_from_reader(file, options)
    }

    /// Load a corpus from any byte source laid out like the catalog file
    pub fn load_from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<(Self, LoadReport)> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut report = LoadReport::default();
        let mut records: Vec<MovieRecord> = Vec::new();

        for result in csv_reader.records() {
            if records.len() >= options.max_records {
                report.truncated = true;
                break;
            }
            report.rows_read += 1;

            let parsed = result.map_err(parser::from_csv_error).and_then(|row| {
                if parser::is_adult(&row) {
                    return Ok(None);
                }
                parser::parse_record(&row, options.weighted_text_repeat).map(Some)
            });

            match parsed {
                Ok(Some(record)) => records.push(record),
                Ok(None) => report.skipped_adult += 1,
                Err(err)
                    if err.is_malformed_record()
                        && options.malformed_rows == MalformedRowPolicy::Skip =>
                {
                    warn!("Skipping malformed catalog row: {}", err);
                    report.skipped_malformed += 1;
                }
                Err(err) => return Err(err),
            }
        }

        report.accepted = records.len();
        debug!(
            "Catalog scan finished after {} rows (truncated: {})",
            report.rows_read, report.truncated
        );
        info!(
            "Loaded {} records ({} adult, {} malformed skipped)",
            report.accepted, report.skipped_adult, report.skipped_malformed
        );

        Ok((Corpus::from(records), report))
    }
}
