//! Filter implementations for the eligibility pipeline.
//!
//! A record is eligible as a recommendation only if it passes every filter.

pub mod excluded_titles;
pub mod minimum_popularity;

// Re-export for convenience
pub use excluded_titles::ExcludedTitlesFilter;
pub use minimum_popularity::MinimumPopularityFilter;
