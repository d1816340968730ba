//! Corpus statistics: term frequency, inverse document frequency and
//! TF-IDF vectors.
//!
//! ## Formulas
//! - TF(token) = raw occurrence count in one token sequence
//! - IDF(token) = ln(N / df) where N = corpus size, df = records containing token
//! - TF-IDF(token) = TF(token) * IDF(token), unseen tokens weigh 0
//!
//! TF is deliberately an absolute count, not a fraction of the sequence
//! length.

use data_loader::{Corpus, MovieId};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, instrument};

/// Raw occurrence count per token
pub type TermFrequencies = HashMap<String, usize>;

/// Sparse token -> weight mapping; absent tokens weigh 0.
///
/// Ordered by token so that sums over a vector are reproducible: records
/// with the same tokens always get bit-identical scores.
pub type TfIdfVector = BTreeMap<String, f64>;

/// One TF-IDF vector per record, keyed by record id
pub type CorpusVectors = HashMap<MovieId, TfIdfVector>;

/// Inverse document frequencies for every token seen in a corpus.
///
/// Built once per corpus and immutable afterwards; rebuild it whenever the
/// corpus changes.
#[derive(Debug, Clone, Default)]
pub struct IdfTable {
    weights: HashMap<String, f64>,
    document_count: usize,
}

impl IdfTable {
    /// IDF of a token, 0 for tokens the corpus never contained
    pub fn get(&self, token: &str) -> f64 {
        self.weights.get(token).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.weights.contains_key(token)
    }

    /// Number of distinct tokens in the table
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Number of records the table was computed from
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(token, idf)| (token.as_str(), *idf))
    }
}

/// Compute the IDF table for a corpus.
///
/// Each record contributes at most once per token, so repeated tokens
/// within a record don't inflate the document count.
#[instrument(skip_all, fields(records = corpus.len()))]
pub fn compute_idf(corpus: &Corpus) -> IdfTable {
    let mut appearances: HashMap<&str, usize> = HashMap::new();

    for record in corpus {
        let distinct: HashSet<&str> = record.tokens.iter().map(String::as_str).collect();
        for token in distinct {
            *appearances.entry(token).or_insert(0) += 1;
        }
    }

    // A token only enters the map after appearing in a record, so count >= 1
    let n = corpus.len() as f64;
    let weights: HashMap<String, f64> = appearances
        .into_iter()
        .map(|(token, count)| (token.to_string(), (n / count as f64).ln()))
        .collect();

    debug!("Computed IDF for {} distinct tokens", weights.len());

    IdfTable {
        weights,
        document_count: corpus.len(),
    }
}

/// Count occurrences of each token
pub fn compute_tf(tokens: &[String]) -> TermFrequencies {
    let mut frequencies = TermFrequencies::new();
    for token in tokens {
        *frequencies.entry(token.clone()).or_insert(0) += 1;
    }
    frequencies
}

/// Compute the TF-IDF vector of a token sequence against a corpus IDF table.
///
/// Tokens the corpus never saw are kept with weight 0.
pub fn compute_tf_idf(tokens: &[String], idf: &IdfTable) -> TfIdfVector {
    compute_tf(tokens)
        .into_iter()
        .map(|(token, count)| {
            let weight = count as f64 * idf.get(&token);
            (token, weight)
        })
        .collect()
}

/// Compute a TF-IDF vector for every record in the corpus.
///
/// Records are vectorised in parallel. Ids are expected to be unique; when
/// two records share an id only one of their vectors is kept.
#[instrument(skip_all, fields(records = corpus.len()))]
pub fn compute_corpus_tf_idf(corpus: &Corpus, idf: &IdfTable) -> CorpusVectors {
    let vectors: CorpusVectors = corpus
        .records()
        .par_iter()
        .map(|record| (record.id.clone(), compute_tf_idf(&record.tokens, idf)))
        .collect();

    debug!("Vectorised {} records", vectors.len());
    vectors
}
