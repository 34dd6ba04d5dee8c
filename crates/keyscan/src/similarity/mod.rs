//! String similarity measures.
//!
//! Every measure implements [`SimilarityMeasure`] and returns a score in
//! `[0, 1]`, where 1 means identical under that measure.

mod jaccard;
mod levenshtein;
mod tokenizer;

pub use jaccard::Jaccard;
pub use levenshtein::Levenshtein;
pub use tokenizer::Tokenizer;

/// A similarity score between two strings.
pub trait SimilarityMeasure: Send + Sync {
    /// Compare two strings, returning a score in `[0, 1]`.
    fn compare(&self, a: &str, b: &str) -> f64;

    /// Short identifier for reports.
    fn name(&self) -> &'static str;
}
