//! Filter to keep a movie from being recommended back to itself.
//!
//! The query's exclusion set usually holds the title the description came
//! from and the title originally searched for.

use crate::search::Candidate;
use crate::traits::Filter;
use anyhow::Result;
use similarity::Query;

/// Removes candidates whose title is in the query's exclusion set.
///
/// ## Algorithm
/// Titles are compared case-insensitively using the HashSet in
/// `Query.excluded_titles` for O(1) lookups.
pub struct ExcludedTitlesFilter;

impl Filter for ExcludedTitlesFilter {
    fn name(&self) -> &str {
        "ExcludedTitlesFilter"
    }

    fn apply<'a>(&self, candidates: Vec<Candidate<'a>>, query: &Query) -> Result<Vec<Candidate<'a>>> {
        if query.excluded_titles.is_empty() {
            return Ok(candidates);
        }

        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| !query.is_excluded(&candidate.record.title))
            .collect();
        Ok(filtered)
    }
}
