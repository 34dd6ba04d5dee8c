//! Token-based Jaccard similarity.

use std::collections::{HashMap, HashSet};

use super::SimilarityMeasure;
use super::tokenizer::Tokenizer;

/// Jaccard similarity over tokens.
///
/// With set semantics the score is `|A ∩ B| / |A ∪ B|`. With bag semantics
/// duplicates count: the intersection takes the smaller multiplicity of each
/// token and the union is the sum of both bag sizes, so the maximum is 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Jaccard {
    pub tokenizer: Tokenizer,
    pub bag_semantics: bool,
}

impl Jaccard {
    pub fn new(tokenizer: Tokenizer, bag_semantics: bool) -> Self {
        Self {
            tokenizer,
            bag_semantics,
        }
    }

    /// Compare two already tokenized inputs.
    pub fn compare_tokens<T: AsRef<str>>(&self, a: &[T], b: &[T]) -> f64 {
        if a.is_empty() && b.is_empty() {
            return 1.0;
        }

        if self.bag_semantics {
            let counts_a = counts(a);
            let counts_b = counts(b);
            let shared: usize = counts_a
                .iter()
                .filter_map(|(token, &n)| counts_b.get(token).map(|&m| n.min(m)))
                .sum();
            shared as f64 / (a.len() + b.len()) as f64
        } else {
            let set_a: HashSet<&str> = a.iter().map(|t| t.as_ref()).collect();
            let set_b: HashSet<&str> = b.iter().map(|t| t.as_ref()).collect();
            let shared = set_a.intersection(&set_b).count();
            shared as f64 / (set_a.len() + set_b.len() - shared) as f64
        }
    }
}

impl SimilarityMeasure for Jaccard {
    fn compare(&self, a: &str, b: &str) -> f64 {
        let tokens_a = self.tokenizer.tokenize(a);
        let tokens_b = self.tokenizer.tokenize(b);
        self.compare_tokens(&tokens_a, &tokens_b)
    }

    fn name(&self) -> &'static str {
        if self.bag_semantics {
            "jaccard-bag"
        } else {
            "jaccard"
        }
    }
}

fn counts<T: AsRef<str>>(tokens: &[T]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_ref()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_set_semantics() {
        let jaccard = Jaccard::new(Tokenizer::Words, false);

        assert!(close(jaccard.compare("a b c", "b c d"), 0.5));
        assert!(close(jaccard.compare("a a b", "a b"), 1.0));
        assert!(close(jaccard.compare("x", "y"), 0.0));
    }

    #[test]
    fn test_bag_semantics() {
        let jaccard = Jaccard::new(Tokenizer::Words, true);

        assert!(close(jaccard.compare("a b", "a b"), 0.5));
        // min counts: a -> 1, b -> 1; sizes 3 + 2
        assert!(close(jaccard.compare("a a b", "a b"), 2.0 / 5.0));
    }

    #[test]
    fn test_empty_inputs() {
        let jaccard = Jaccard::default();
        assert!(close(jaccard.compare("", ""), 1.0));
        assert!(close(jaccard.compare("", "abc"), 0.0));
    }

    #[test]
    fn test_bigram_similarity() {
        let jaccard = Jaccard::new(Tokenizer::NGrams(2), false);
        // {#n, ni, ig, gh, ht, t#} vs {#n, ni, ig, gh, ht, ts, s#}
        assert!(close(jaccard.compare("night", "nights"), 5.0 / 8.0));
    }
}
