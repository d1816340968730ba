//! Filter to ensure a minimum popularity.
//!
//! Removes obscure titles so that recommendations stay recognisable.

use crate::search::Candidate;
use crate::traits::Filter;
use anyhow::Result;
use similarity::Query;

/// Removes candidates at or below a popularity threshold.
///
/// The comparison is strict: a record is kept only when its popularity
/// exceeds `min_popularity`.
pub struct MinimumPopularityFilter {
    min_popularity: f64,
}

impl MinimumPopularityFilter {
    /// Create a new MinimumPopularityFilter.
    ///
    /// # Arguments
    /// * `min_popularity` - Threshold that popularity must exceed (typically 10.0)
    pub fn new(min_popularity: f64) -> Self {
        Self { min_popularity }
    }
}

impl Filter for MinimumPopularityFilter {
    fn name(&self) -> &str {
        "MinimumPopularityFilter"
    }

    fn apply<'a>(&self, candidates: Vec<Candidate<'a>>, _query: &Query) -> Result<Vec<Candidate<'a>>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| candidate.record.popularity > self.min_popularity)
            .collect();

        Ok(filtered)
    }
}
