//! Value-overlap schema matcher.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::assignment::optimal_assignment;
use super::matrix::SimilarityMatrix;
use crate::error::{KeyscanError, Result};
use crate::input::Relation;
use crate::similarity::{Jaccard, Tokenizer};

/// A matched pair of attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correspondence {
    pub source: usize,
    pub source_name: String,
    pub target: usize,
    pub target_name: String,
    pub similarity: f64,
}

/// Matches the attributes of two relations by the values they hold.
///
/// Two columns are similar when their value sets overlap: the score is the
/// set Jaccard similarity of the columns' distinct values. With a tokenizer
/// configured, every value is split first and the columns are compared on
/// their pooled tokens instead, which tolerates formatting differences
/// between sources.
#[derive(Debug, Clone, Default)]
pub struct SchemaMatcher {
    tokenizer: Option<Tokenizer>,
    min_similarity: f64,
}

impl SchemaMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare columns on the tokens of their values instead of whole values.
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    /// Drop assigned pairs scoring below `min_similarity`.
    pub fn with_min_similarity(mut self, min_similarity: f64) -> Self {
        self.min_similarity = min_similarity;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_similarity) {
            return Err(KeyscanError::Config(format!(
                "min_similarity must be within [0, 1], got {}",
                self.min_similarity
            )));
        }
        if self.tokenizer == Some(Tokenizer::NGrams(0)) {
            return Err(KeyscanError::Config(
                "n-gram size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Score every source attribute against every target attribute.
    pub fn similarity_matrix(
        &self,
        source: &Relation,
        target: &Relation,
    ) -> Result<SimilarityMatrix> {
        self.validate()?;

        let source_columns: Vec<Vec<String>> =
            source.columns().iter().map(|c| self.column_tokens(c)).collect();
        let target_columns: Vec<Vec<String>> =
            target.columns().iter().map(|c| self.column_tokens(c)).collect();

        let jaccard = Jaccard::default();
        let scores = source_columns
            .iter()
            .map(|left| {
                target_columns
                    .iter()
                    .map(|right| jaccard.compare_tokens(left, right))
                    .collect()
            })
            .collect();

        debug!(
            source = source.name(),
            target = target.name(),
            source_attributes = source.attribute_count(),
            target_attributes = target.attribute_count(),
            "similarity matrix computed"
        );

        SimilarityMatrix::new(source, target, scores)
    }

    /// Pick the one-to-one attribute assignment with the highest total
    /// similarity.
    ///
    /// Each attribute appears in at most one correspondence. When one side
    /// has more attributes, its surplus stays unmatched. Results are ordered
    /// by source attribute.
    pub fn assign(&self, matrix: &SimilarityMatrix) -> Result<Vec<Correspondence>> {
        self.validate()?;

        let costs: Vec<Vec<f64>> = matrix
            .scores()
            .iter()
            .map(|row| row.iter().map(|score| 1.0 - score).collect())
            .collect();

        let correspondences: Vec<Correspondence> = optimal_assignment(&costs)
            .into_iter()
            .enumerate()
            .filter_map(|(source, target)| {
                let target = target?;
                let similarity = matrix.get(source, target)?;
                (similarity >= self.min_similarity).then(|| Correspondence {
                    source,
                    source_name: matrix.source_attributes[source].clone(),
                    target,
                    target_name: matrix.target_attributes[target].clone(),
                    similarity,
                })
            })
            .collect();

        debug!(
            source = %matrix.source,
            target = %matrix.target,
            correspondences = correspondences.len(),
            "attributes assigned"
        );

        Ok(correspondences)
    }

    /// Compute the similarity matrix and assign attributes in one step.
    pub fn match_relations(
        &self,
        source: &Relation,
        target: &Relation,
    ) -> Result<Vec<Correspondence>> {
        let matrix = self.similarity_matrix(source, target)?;
        self.assign(&matrix)
    }

    fn column_tokens(&self, values: &[String]) -> Vec<String> {
        match self.tokenizer {
            Some(tokenizer) => values.iter().flat_map(|v| tokenizer.tokenize(v)).collect(),
            None => values.to_vec(),
        }
    }
}
