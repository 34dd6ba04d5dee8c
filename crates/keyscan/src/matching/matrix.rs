//! Attribute-to-attribute similarity scores of two relations.

use serde::{Deserialize, Serialize};

use crate::error::{KeyscanError, Result};
use crate::input::Relation;

/// Similarity of every source attribute to every target attribute.
///
/// Rows follow the source relation's attributes and columns follow the
/// target's. Every score lies in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    pub source: String,
    pub target: String,
    pub source_attributes: Vec<String>,
    pub target_attributes: Vec<String>,
    scores: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    /// Wrap precomputed scores for `source` x `target`.
    ///
    /// Fails with [`KeyscanError::Config`] if the dimensions do not match the
    /// relations or a score falls outside `[0, 1]`.
    pub fn new(source: &Relation, target: &Relation, scores: Vec<Vec<f64>>) -> Result<Self> {
        if scores.len() != source.attribute_count() {
            return Err(KeyscanError::Config(format!(
                "similarity matrix has {} rows, source '{}' has {} attributes",
                scores.len(),
                source.name(),
                source.attribute_count()
            )));
        }

        for (row, values) in scores.iter().enumerate() {
            if values.len() != target.attribute_count() {
                return Err(KeyscanError::Config(format!(
                    "similarity matrix row {} has {} columns, target '{}' has {} attributes",
                    row,
                    values.len(),
                    target.name(),
                    target.attribute_count()
                )));
            }
            if let Some(bad) = values.iter().find(|s| !(0.0..=1.0).contains(*s)) {
                return Err(KeyscanError::Config(format!(
                    "similarity score {} in row {} is outside [0, 1]",
                    bad, row
                )));
            }
        }

        Ok(Self {
            source: source.name().to_string(),
            target: target.name().to_string(),
            source_attributes: source.attributes().to_vec(),
            target_attributes: target.attributes().to_vec(),
            scores,
        })
    }

    /// Score of source attribute `source` against target attribute `target`.
    pub fn get(&self, source: usize, target: usize) -> Option<f64> {
        self.scores.get(source).and_then(|row| row.get(target)).copied()
    }

    /// Row-major scores.
    pub fn scores(&self) -> &[Vec<f64>] {
        &self.scores
    }

    /// (source attributes, target attributes)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.source_attributes.len(), self.target_attributes.len())
    }

    /// Best-scoring target attribute for one source attribute, ignoring
    /// every other source attribute. Ties go to the lower index.
    pub fn best_target(&self, source: usize) -> Option<(usize, f64)> {
        self.scores.get(source)?.iter().copied().enumerate().fold(
            None,
            |best, (target, score)| match best {
                Some((_, top)) if top >= score => best,
                _ => Some((target, score)),
            },
        )
    }
}
