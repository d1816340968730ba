//! Cosine similarity between sparse TF-IDF vectors.

use crate::stats::TfIdfVector;

/// Euclidean norm of a sparse vector
pub fn norm(vector: &TfIdfVector) -> f64 {
    vector.values().map(|w| w * w).sum::<f64>().sqrt()
}

/// Cosine similarity of two non-negative weight vectors.
///
/// The dot product runs over the union of keys with absent keys weighing 0.
/// When either vector has zero norm the similarity is 0 rather than an error.
/// The result lies in `[0, 1]`.
pub fn cosine_similarity(a: &TfIdfVector, b: &TfIdfVector) -> f64 {
    let denominator = norm(a) * norm(b);
    if denominator == 0.0 {
        return 0.0;
    }

    // Only shared keys contribute; walk the smaller map in token order
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(token, weight)| large.get(token).map(|other| weight * other))
        .sum();

    (dot / denominator).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vector(entries: &[(&str, f64)]) -> TfIdfVector {
        entries.iter().map(|(t, w)| (t.to_string(), *w)).collect()
    }

    #[test]
    fn test_identical_vectors() {
        let v = vector(&[("space", 1.5), ("robot", 0.7)]);
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_vector_is_zero() {
        let v = vector(&[("space", 1.5)]);
        assert_eq!(cosine_similarity(&v, &TfIdfVector::new()), 0.0);
        assert_eq!(cosine_similarity(&TfIdfVector::new(), &v), 0.0);
        assert_eq!(cosine_similarity(&TfIdfVector::new(), &TfIdfVector::new()), 0.0);
    }

    #[test]
    fn test_zero_weights_are_zero_norm() {
        let zeros = vector(&[("dog", 0.0)]);
        assert_eq!(cosine_similarity(&zeros, &zeros), 0.0);
    }

    #[test]
    fn test_disjoint_vectors() {
        let a = vector(&[("space", 1.0)]);
        let b = vector(&[("ocean", 1.0)]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        let a = vector(&[("x", 1.0), ("y", 1.0)]);
        let b = vector(&[("x", 1.0)]);
        let expected = 1.0 / 2f64.sqrt();
        assert!((cosine_similarity(&a, &b) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_equal_vectors_score_identically() {
        let tokens: Vec<String> = (0..24).map(|i| format!("tok{i}")).collect();
        let build = || -> TfIdfVector {
            tokens
                .iter()
                .enumerate()
                .map(|(i, t)| (t.clone(), 0.1 + i as f64 * 0.37))
                .collect()
        };
        let query: TfIdfVector = tokens
            .iter()
            .rev()
            .enumerate()
            .map(|(i, t)| (t.clone(), 1.3 + i as f64 * 0.11))
            .collect();

        let first = cosine_similarity(&query, &build());
        for _ in 0..50 {
            assert_eq!(cosine_similarity(&query, &build()).to_bits(), first.to_bits());
        }
    }

    #[test]
    fn test_norm() {
        assert_eq!(norm(&vector(&[("a", 3.0), ("b", 4.0)])), 5.0);
        assert_eq!(norm(&TfIdfVector::new()), 0.0);
    }

    fn weights() -> impl Strategy<Value = TfIdfVector> {
        prop::collection::btree_map("[a-f]", 0.0f64..10.0, 0..6)
    }

    proptest! {
        #[test]
        fn prop_symmetric(a in weights(), b in weights()) {
            let ab = cosine_similarity(&a, &b);
            let ba = cosine_similarity(&b, &a);
            prop_assert!((ab - ba).abs() < 1e-12);
        }

        #[test]
        fn prop_bounded(a in weights(), b in weights()) {
            let s = cosine_similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&s));
        }

        #[test]
        fn prop_self_similarity_is_one(v in weights()) {
            prop_assume!(norm(&v) > 1e-6);
            prop_assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
        }
    }
}
