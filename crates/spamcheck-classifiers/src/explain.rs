//! Influential-word ranking for linear models

use crate::sparse::SparseVector;
use spamcheck_core::{InfluentialWord, Label};

/// Rank the input's features by absolute model weight.
///
/// Only features present (non-zero) in `vector` are considered. The sort is
/// stable, so ties keep column order. `positive` is the class that a weight
/// above zero pushes toward; zero and negative weights are labelled with the
/// other class.
pub fn influential_words(
    vector: &SparseVector,
    feature_names: &[String],
    coefficients: &[f64],
    positive: Label,
    top_k: usize,
) -> Vec<InfluentialWord> {
    let mut ranked: Vec<(&str, f64)> = vector
        .nonzero()
        .filter_map(|i| {
            let token = feature_names.get(i)?;
            let weight = *coefficients.get(i)?;
            Some((token.as_str(), weight))
        })
        .collect();

    ranked.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
    ranked.truncate(top_k);

    ranked
        .into_iter()
        .map(|(token, weight)| InfluentialWord {
            token: token.to_string(),
            weight,
            label: if weight > 0.0 {
                positive
            } else {
                positive.opposite()
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn present(dim: usize, columns: &[usize]) -> SparseVector {
        SparseVector::from_entries(dim, columns.iter().map(|&c| (c, 1.0)).collect())
    }

    #[test]
    fn test_sorted_by_absolute_weight_and_capped() {
        let features = names(&["a", "b", "c", "d", "e", "f", "g"]);
        let weights = [0.1, -3.0, 2.0, 0.5, -0.2, 1.0, 4.0];
        let x = present(7, &[0, 1, 2, 3, 4, 5, 6]);

        let words = influential_words(&x, &features, &weights, Label::Spam, 5);
        let tokens: Vec<_> = words.iter().map(|w| w.token.as_str()).collect();
        assert_eq!(tokens, vec!["g", "b", "c", "f", "d"]);
        assert_eq!(words[0].label, Label::Spam);
        assert_eq!(words[1].label, Label::Ham);
    }

    #[test]
    fn test_only_present_features() {
        let features = names(&["free", "meeting", "prize"]);
        let weights = [2.0, -1.0, 3.0];
        let words = influential_words(&present(3, &[1]), &features, &weights, Label::Spam, 5);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].token, "meeting");
        assert_eq!(words[0].label, Label::Ham);
    }

    #[test]
    fn test_no_present_features_yields_empty_list() {
        let features = names(&["free"]);
        let words = influential_words(&SparseVector::zeros(1), &features, &[1.0], Label::Spam, 5);
        assert!(words.is_empty());
    }

    #[test]
    fn test_zero_weight_is_not_positive() {
        let features = names(&["the"]);
        let words = influential_words(&present(1, &[0]), &features, &[0.0], Label::Spam, 5);
        assert_eq!(words[0].label, Label::Ham);
    }

    #[test]
    fn test_positive_class_can_be_ham() {
        let features = names(&["invoice"]);
        let words = influential_words(&present(1, &[0]), &features, &[1.2], Label::Ham, 5);
        assert_eq!(words[0].label, Label::Ham);
    }

    #[test]
    fn test_ties_keep_column_order() {
        let features = names(&["x", "y", "z"]);
        let weights = [1.0, -1.0, 1.0];
        let words = influential_words(&present(3, &[0, 1, 2]), &features, &weights, Label::Spam, 5);
        let tokens: Vec<_> = words.iter().map(|w| w.token.as_str()).collect();
        assert_eq!(tokens, vec!["x", "y", "z"]);
    }
}
