//! Eligibility filtering and nearest-neighbour search over the catalog.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate eligibility
//! - FilterPipeline for composing filters
//! - NearestNeighbor search returning the single best eligible match
//!
//! ## Architecture
//! A search processes the corpus in stages:
//! 1. Filters remove ineligible records (excluded titles, low popularity)
//! 2. Remaining records are scored against the query's TF-IDF vector
//! 3. The best strictly-positive score wins, or the search reports no match
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{NearestNeighbor, SearchConfig};
//! use similarity::Query;
//!
//! let searcher = NearestNeighbor::new(&SearchConfig::default());
//! let query = Query::new(description, [title, searched_title]);
//! let recommendation = searcher.search(&query, &corpus, &vectors, &idf)?;
//! println!("{}", recommendation.title());
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod search;
pub mod traits;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use search::{
    candidates, nearest_neighbor, Candidate, NearestNeighbor, Recommendation, SearchConfig,
    DEFAULT_MIN_POPULARITY, NO_RECOMMENDATION,
};
pub use traits::Filter;
