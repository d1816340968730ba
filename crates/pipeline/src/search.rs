//! Nearest-neighbour search over the corpus.
//!
//! ## Algorithm
//! 1. Every corpus record becomes a candidate, in corpus order
//! 2. The filter pipeline removes ineligible candidates
//!    (excluded titles, popularity at or below the threshold)
//! 3. Each remaining candidate is scored by cosine similarity against the
//!    query's TF-IDF vector, in parallel
//! 4. The highest strictly-greater score wins, so ties keep the earliest record
//! 5. If nothing scores above 0 the result is [`Recommendation::NotFound`]

use crate::filter_pipeline::FilterPipeline;
use crate::filters::{ExcludedTitlesFilter, MinimumPopularityFilter};
use anyhow::Result;
use data_loader::{Corpus, MovieRecord};
use rayon::prelude::*;
use similarity::{cosine_similarity, CorpusVectors, IdfTable, Query};
use std::fmt;
use tracing::{debug, instrument};

/// Title reported when no eligible record is similar to the query
pub const NO_RECOMMENDATION: &str = "No Recommendation Found";

/// Popularity a record must exceed to be recommended
pub const DEFAULT_MIN_POPULARITY: f64 = 10.0;

/// A corpus record under consideration, with its position in the corpus
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub position: usize,
    pub record: &'a MovieRecord,
}

/// Every record of the corpus as a candidate, in corpus order
pub fn candidates(corpus: &Corpus) -> Vec<Candidate<'_>> {
    corpus
        .iter()
        .enumerate()
        .map(|(position, record)| Candidate { position, record })
        .collect()
}

/// Outcome of a search
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recommendation<'a> {
    Match {
        record: &'a MovieRecord,
        similarity: f64,
    },
    NotFound,
}

impl<'a> Recommendation<'a> {
    /// Recommended title, or [`NO_RECOMMENDATION`]
    pub fn title(&self) -> &'a str {
        match *self {
            Recommendation::Match { record, .. } => &record.title,
            Recommendation::NotFound => NO_RECOMMENDATION,
        }
    }

    pub fn record(&self) -> Option<&'a MovieRecord> {
        match *self {
            Recommendation::Match { record, .. } => Some(record),
            Recommendation::NotFound => None,
        }
    }

    pub fn similarity(&self) -> f64 {
        match *self {
            Recommendation::Match { similarity, .. } => similarity,
            Recommendation::NotFound => 0.0,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Recommendation::Match { .. })
    }
}

impl fmt::Display for Recommendation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Search settings
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub min_popularity: f64,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self {
            min_popularity: DEFAULT_MIN_POPULARITY,
        }
    }

    /// Configure the popularity threshold (default: 10.0)
    pub fn with_min_popularity(mut self, min_popularity: f64) -> Self {
        self.min_popularity = min_popularity;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Single best-match searcher.
///
/// Holds no corpus state; the corpus, its vectors and IDF table are passed
/// by reference on every call so one searcher can serve many corpora.
pub struct NearestNeighbor {
    pipeline: FilterPipeline,
}

impl NearestNeighbor {
    /// Searcher with the standard eligibility rules
    pub fn new(config: &SearchConfig) -> Self {
        Self::with_pipeline(
            FilterPipeline::new()
                .add_filter(ExcludedTitlesFilter)
                .add_filter(MinimumPopularityFilter::new(config.min_popularity)),
        )
    }

    /// Searcher with a custom eligibility pipeline
    pub fn with_pipeline(pipeline: FilterPipeline) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &FilterPipeline {
        &self.pipeline
    }

    /// Find the eligible record most similar to the query.
    #[instrument(skip_all, fields(query_tokens = query.tokens.len(), records = corpus.len()))]
    pub fn search<'a>(
        &self,
        query: &Query,
        corpus: &'a Corpus,
        vectors: &CorpusVectors,
        idf: &IdfTable,
    ) -> Result<Recommendation<'a>> {
        let mut eligible = self.pipeline.apply(candidates(corpus), query)?;
        debug!("{} eligible candidates", eligible.len());

        // Tie-breaking relies on corpus order, whatever order the filters left
        eligible.sort_by_key(|c| c.position);

        let query_vector = query.vector(idf);
        let scores: Vec<f64> = eligible
            .par_iter()
            .map(|candidate| {
                vectors
                    .get(&candidate.record.id)
                    .map_or(0.0, |v| cosine_similarity(&query_vector, v))
            })
            .collect();

        let mut best = Recommendation::NotFound;
        let mut best_similarity = 0.0;
        for (candidate, similarity) in eligible.iter().zip(scores) {
            if similarity > best_similarity {
                best_similarity = similarity;
                best = Recommendation::Match {
                    record: candidate.record,
                    similarity,
                };
            }
        }

        debug!("Best match: {} ({:.4})", best, best_similarity);
        Ok(best)
    }
}

impl Default for NearestNeighbor {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}

/// Find the eligible record most similar to the query using the standard
/// eligibility rules.
///
/// An empty corpus, or one where nothing eligible shares a weighted token
/// with the query, yields [`Recommendation::NotFound`].
pub fn nearest_neighbor<'a>(
    query: &Query,
    corpus: &'a Corpus,
    vectors: &CorpusVectors,
    idf: &IdfTable,
) -> Result<Recommendation<'a>> {
    NearestNeighbor::default().search(query, corpus, vectors, idf)
}
