//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! eligibility filters together using the builder pattern.

use crate::search::Candidate;
use crate::traits::Filter;
use anyhow::Result;
use similarity::Query;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(ExcludedTitlesFilter)
///     .add_filter(MinimumPopularityFilter::new(10.0));
///
/// let eligible = pipeline.apply(candidates, &query)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the configured filters, in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// # Returns
    /// * `Ok(Vec<Candidate>)` - The candidates after all filters
    /// * `Err` - If any filter fails
    pub fn apply<'a>(
        &self,
        candidates: Vec<Candidate<'a>>,
        query: &Query,
    ) -> Result<Vec<Candidate<'a>>> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, query)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
