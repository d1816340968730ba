//! # Data Loader Crate
//!
//! This crate loads the movie catalog into an immutable, ordered [`Corpus`].
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, Corpus, LoadReport)
//! - **normalize**: Raw text to lowercase tokens
//! - **parser**: Positional catalog rows into MovieRecords
//! - **loader**: File loading with row filters and the record cap
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{Corpus, LoadOptions};
//! use std::path::Path;
//!
//! let (corpus, report) = Corpus::load(Path::new("movies.csv"), &LoadOptions::default())?;
//! println!("Loaded {} movies, skipped {} bad rows", corpus.len(), report.skipped_malformed);
//! ```

// Public modules
pub mod error;
pub mod loader;
pub mod normalize;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use loader::{LoadOptions, MalformedRowPolicy, DEFAULT_CATALOG_PATH, DEFAULT_MAX_RECORDS};
pub use normalize::normalize;
pub use types::{Corpus, LoadReport, MovieId, MovieRecord};
