//! Core traits for the eligibility pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible eligibility rules to be applied to search candidates.

use crate::search::Candidate;
use anyhow::Result;
use similarity::Query;

/// Core trait for filtering candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across concurrent searches
/// - Filters take ownership of the Vec<Candidate> and return a filtered Vec
/// - Filters must keep the relative order of the candidates they retain
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership)
    /// * `query` - The query being answered, including its exclusion set
    ///
    /// # Returns
    /// * `Ok(Vec<Candidate>)` - The candidates still eligible
    /// * `Err` - If filtering fails
    fn apply<'a>(&self, candidates: Vec<Candidate<'a>>, query: &Query) -> Result<Vec<Candidate<'a>>>;
}
