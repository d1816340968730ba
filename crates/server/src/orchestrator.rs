//! # Recommendation Orchestrator
//!
//! This module coordinates the recommendation flow:
//! 1. Load the catalog into a corpus (once)
//! 2. Compute the IDF table over the whole corpus (once)
//! 3. Compute a TF-IDF vector per record (once, in parallel)
//! 4. Per request: normalise the description, build the exclusion set
//! 5. Per request: run the nearest-neighbour search and report the title
//!
//! The built state is immutable and shared behind `Arc`, so clones of the
//! orchestrator can answer requests concurrently.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::RecommenderConfig;
use data_loader::{Corpus, LoadReport, MovieId};
use pipeline::{NearestNeighbor, Recommendation};
use similarity::{compute_corpus_tf_idf, compute_idf, CorpusVectors, IdfTable, Query};

/// What the caller knows about the movie it wants a recommendation for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Title the description belongs to
    pub title: String,
    /// Free-text description, typically synopsis plus genre
    pub description: String,
    /// Title the user originally searched for
    pub searched_title: String,
}

impl RecommendationRequest {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        searched_title: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            searched_title: searched_title.into(),
        }
    }
}

/// Final recommendation returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecommendation {
    pub source_title: String,
    /// Recommended title, or "No Recommendation Found"
    pub recommended_title: String,
    pub movie_id: Option<MovieId>,
    pub similarity: f64,
    pub popularity: Option<f64>,
}

impl MovieRecommendation {
    fn from_search(source_title: &str, recommendation: &Recommendation<'_>) -> Self {
        let record = recommendation.record();
        Self {
            source_title: source_title.to_string(),
            recommended_title: recommendation.title().to_string(),
            movie_id: record.map(|r| r.id.clone()),
            similarity: recommendation.similarity(),
            popularity: record.map(|r| r.popularity),
        }
    }

    pub fn is_found(&self) -> bool {
        self.movie_id.is_some()
    }
}

/// Main orchestrator that owns the built corpus state
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    corpus: Arc<Corpus>,
    idf: Arc<IdfTable>,
    vectors: Arc<CorpusVectors>,
    searcher: Arc<NearestNeighbor>,
    load_report: Option<LoadReport>,
}

impl RecommendationOrchestrator {
    /// Build the corpus statistics for an already-loaded corpus
    #[instrument(skip_all, fields(records = corpus.len()))]
    pub fn new(corpus: Corpus, config: &RecommenderConfig) -> Self {
        let start_time = Instant::now();

        let idf = compute_idf(&corpus);
        let vectors = compute_corpus_tf_idf(&corpus, &idf);
        let searcher = NearestNeighbor::new(&config.search);

        info!(
            "Built {} vectors over {} distinct tokens in {:.2?}",
            vectors.len(),
            idf.len(),
            start_time.elapsed()
        );

        Self {
            corpus: Arc::new(corpus),
            idf: Arc::new(idf),
            vectors: Arc::new(vectors),
            searcher: Arc::new(searcher),
            load_report: None,
        }
    }

    /// Load a catalog file and build the corpus statistics from it
    pub fn from_catalog(path: &Path, config: &RecommenderConfig) -> Result<Self> {
        let (corpus, report) = Corpus::load(path, &config.load)
            .with_context(|| format!("Failed to load movie catalog {}", path.display()))?;

        let mut orchestrator = Self::new(corpus, config);
        orchestrator.load_report = Some(report);
        Ok(orchestrator)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn idf(&self) -> &IdfTable {
        &self.idf
    }

    /// Load statistics, when built from a catalog file
    pub fn load_report(&self) -> Option<&LoadReport> {
        self.load_report.as_ref()
    }

    /// Recommend one movie for a request
    ///
    /// Both the request's title and the searched title are excluded from
    /// the result.
    #[instrument(skip_all, fields(title = %request.title))]
    pub fn recommend(&self, request: &RecommendationRequest) -> Result<MovieRecommendation> {
        let start_time = Instant::now();

        let query = Query::new(
            &request.description,
            [request.title.as_str(), request.searched_title.as_str()],
        );
        debug!("Query has {} tokens", query.tokens.len());

        let recommendation = self
            .searcher
            .search(&query, &self.corpus, &self.vectors, &self.idf)
            .context("Failed to search corpus")?;

        info!(
            "Recommended {:?} for {:?} in {:.2?}",
            recommendation.title(),
            request.title,
            start_time.elapsed()
        );

        Ok(MovieRecommendation::from_search(&request.title, &recommendation))
    }

    /// Recommend a movie for each request, evaluating them in parallel.
    ///
    /// Results come back in request order.
    pub async fn recommend_batch(
        &self,
        requests: Vec<RecommendationRequest>,
    ) -> Result<Vec<MovieRecommendation>> {
        let handles: Vec<_> = requests
            .into_iter()
            .map(|request| {
                let orchestrator = self.clone();
                tokio::task::spawn_blocking(move || orchestrator.recommend(&request))
            })
            .collect();

        let mut recommendations = Vec::with_capacity(handles.len());
        for handle in handles {
            let recommendation = handle.await.context("Recommendation task panicked")??;
            recommendations.push(recommendation);
        }
        Ok(recommendations)
    }
}
