//! Query construction.
//!
//! A [`Query`] bundles everything a similarity search needs from the caller:
//! the normalised tokens of a free-text description and the set of titles
//! that must never come back as the answer.

use crate::stats::{compute_tf_idf, IdfTable, TfIdfVector};
use data_loader::normalize;
use std::collections::HashSet;

/// How often the genre text is repeated when composing a description
pub const GENRE_REPEAT: usize = 3;

/// Builds query descriptions from the pieces a caller typically has.
pub struct QueryDescription;

impl QueryDescription {
    /// Compose a description from a synopsis and an optional genre line.
    ///
    /// The genre is repeated [`GENRE_REPEAT`] times so that it outweighs
    /// individual synopsis words.
    pub fn compose(synopsis: &str, genre: Option<&str>) -> String {
        let mut parts = vec![synopsis];
        if let Some(genre) = genre.filter(|g| !g.trim().is_empty()) {
            parts.extend(std::iter::repeat_n(genre, GENRE_REPEAT));
        }
        parts.join(" ")
    }
}

/// A normalised query plus its exclusion set
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub tokens: Vec<String>,
    /// Lowercased titles that are not eligible as results
    pub excluded_titles: HashSet<String>,
}

impl Query {
    /// Normalise a description and collect the excluded titles.
    ///
    /// Callers normally exclude both the title the description came from and
    /// the title the user originally searched for.
    pub fn new<I, S>(description: &str, excluded_titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_tokens(normalize(description), excluded_titles)
    }

    /// Build a query from tokens that are already normalised
    pub fn from_tokens<I, S>(tokens: Vec<String>, excluded_titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tokens,
            excluded_titles: excluded_titles
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Case-insensitive check against the exclusion set
    pub fn is_excluded(&self, title: &str) -> bool {
        self.excluded_titles.contains(&title.to_lowercase())
    }

    /// TF-IDF vector of the query against a corpus IDF table
    pub fn vector(&self, idf: &IdfTable) -> TfIdfVector {
        compute_tf_idf(&self.tokens, idf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::compute_idf;
    use data_loader::{Corpus, MovieRecord};

    #[test]
    fn test_compose_repeats_genre() {
        let description = QueryDescription::compose("A heist goes wrong", Some("Crime"));
        assert_eq!(description, "A heist goes wrong Crime Crime Crime");
    }

    #[test]
    fn test_compose_without_genre() {
        assert_eq!(QueryDescription::compose("Just a plot", None), "Just a plot");
        assert_eq!(QueryDescription::compose("Just a plot", Some("  ")), "Just a plot");
    }

    #[test]
    fn test_query_normalises_description() {
        let query = Query::new("Two Robots, 1 Planet", ["WALL-E"]);
        assert_eq!(query.tokens, vec!["two", "robots", "planet"]);
    }

    #[test]
    fn test_exclusion_is_case_insensitive() {
        let query = Query::new("robots", ["WALL-E", "Wall-E (2008)"]);

        assert!(query.is_excluded("wall-e"));
        assert!(query.is_excluded("WALL-E (2008)"));
        assert!(!query.is_excluded("Short Circuit"));
        assert_eq!(query.excluded_titles.len(), 2);
    }

    #[test]
    fn test_duplicate_exclusions_collapse() {
        let query = Query::new("robots", vec!["Heat".to_string(), "heat".to_string()]);
        assert_eq!(query.excluded_titles.len(), 1);
    }

    #[test]
    fn test_query_vector_uses_corpus_idf() {
        let corpus = Corpus::from(vec![
            MovieRecord::new("1", "A", vec!["robot".to_string()], 20.0),
            MovieRecord::new("2", "B", vec!["ocean".to_string()], 20.0),
        ]);
        let idf = compute_idf(&corpus);

        let vector = Query::new("robot robot dragon", Vec::<String>::new()).vector(&idf);

        assert!((vector["robot"] - 2.0 * 2f64.ln()).abs() < 1e-12);
        assert_eq!(vector["dragon"], 0.0);
    }
}
