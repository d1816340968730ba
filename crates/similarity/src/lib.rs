//! # Similarity Crate
//!
//! Bag-of-words vector space over the movie catalog.
//!
//! ## Components
//!
//! ### Corpus Statistics
//! - IDF table computed once from the whole corpus
//! - TF-IDF vector per record, built in parallel
//!
//! ### Cosine Similarity
//! Directional similarity of two sparse vectors, 0 for zero-norm input.
//!
//! ### Queries
//! Normalised description tokens plus the titles excluded from the result.
//!
//! ## Example Usage
//!
//! ```ignore
//! use similarity::{compute_idf, compute_corpus_tf_idf, cosine_similarity, Query};
//!
//! let idf = compute_idf(&corpus);
//! let vectors = compute_corpus_tf_idf(&corpus, &idf);
//!
//! let query = Query::new("A robot falls in love", ["WALL-E"]);
//! let query_vector = query.vector(&idf);
//! let score = cosine_similarity(&query_vector, &vectors["862"]);
//! ```

// Public modules
pub mod cosine;
pub mod query;
pub mod stats;

// Re-export commonly used types
pub use cosine::cosine_similarity;
pub use query::{Query, QueryDescription};
pub use stats::{
    compute_corpus_tf_idf, compute_idf, compute_tf, compute_tf_idf, CorpusVectors, IdfTable,
    TermFrequencies, TfIdfVector,
};
