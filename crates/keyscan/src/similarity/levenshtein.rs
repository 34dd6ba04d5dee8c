//! Edit-distance similarity.

use super::SimilarityMeasure;

/// Normalized Levenshtein similarity: `1 - distance / max(len_a, len_b)`.
///
/// With `damerau` set, swapping two adjacent elements costs one edit
/// (optimal string alignment distance). Lengths are counted in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Levenshtein {
    pub damerau: bool,
}

impl Levenshtein {
    pub fn new(damerau: bool) -> Self {
        Self { damerau }
    }

    /// Edit distance between two sequences.
    pub fn distance<T: PartialEq>(&self, a: &[T], b: &[T]) -> usize {
        // Three rolling rows; `before` is only read for transpositions.
        let mut before: Vec<usize> = vec![0; b.len() + 1];
        let mut previous: Vec<usize> = (0..=b.len()).collect();
        let mut current: Vec<usize> = vec![0; b.len() + 1];

        for i in 1..=a.len() {
            current[0] = i;
            for j in 1..=b.len() {
                let cost = usize::from(a[i - 1] != b[j - 1]);
                let mut best = (previous[j] + 1)
                    .min(current[j - 1] + 1)
                    .min(previous[j - 1] + cost);

                let transposed =
                    i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1];
                if self.damerau && transposed {
                    best = best.min(before[j - 2] + 1);
                }
                current[j] = best;
            }

            std::mem::swap(&mut before, &mut previous);
            std::mem::swap(&mut previous, &mut current);
        }

        previous[b.len()]
    }

    /// Similarity of two token sequences, treating each token as one element.
    pub fn compare_tokens<T: PartialEq>(&self, a: &[T], b: &[T]) -> f64 {
        let longest = a.len().max(b.len());
        if longest == 0 {
            return 1.0;
        }
        1.0 - self.distance(a, b) as f64 / longest as f64
    }
}

impl SimilarityMeasure for Levenshtein {
    fn compare(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        self.compare_tokens(&a, &b)
    }

    fn name(&self) -> &'static str {
        if self.damerau {
            "damerau-levenshtein"
        } else {
            "levenshtein"
        }
    }
}
