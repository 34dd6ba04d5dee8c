//! Weighted record similarity.

use std::fmt;
use std::sync::Arc;

use crate::error::{KeyscanError, Result};
use crate::input::Relation;
use crate::similarity::{Jaccard, Levenshtein, SimilarityMeasure, Tokenizer};

/// How one attribute contributes to a record comparison.
#[derive(Clone)]
pub struct AttributeSimilarity {
    pub attribute: usize,
    pub measure: Arc<dyn SimilarityMeasure>,
    pub weight: f64,
}

impl fmt::Debug for AttributeSimilarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeSimilarity")
            .field("attribute", &self.attribute)
            .field("measure", &self.measure.name())
            .field("weight", &self.weight)
            .finish()
    }
}

/// Scores a pair of records and decides whether they are duplicates.
///
/// The score is the weighted average of the configured attribute
/// similarities, so it stays in `[0, 1]` whatever the weights sum to. A pair
/// is a duplicate when its score reaches the threshold.
#[derive(Debug, Clone)]
pub struct RecordComparator {
    attributes: Vec<AttributeSimilarity>,
    threshold: f64,
}

impl RecordComparator {
    pub fn new(threshold: f64) -> Self {
        Self {
            attributes: Vec::new(),
            threshold,
        }
    }

    /// Add an attribute with the measure used to compare its values.
    pub fn with_attribute(
        mut self,
        attribute: usize,
        measure: impl SimilarityMeasure + 'static,
        weight: f64,
    ) -> Self {
        self.attributes.push(AttributeSimilarity {
            attribute,
            measure: Arc::new(measure),
            weight,
        });
        self
    }

    /// A comparator covering every attribute of `relation`, with measures
    /// and weights chosen from the attribute names.
    ///
    /// Names and titles are compared by Damerau-Levenshtein, descriptions by
    /// bigram Jaccard, and everything else by plain Levenshtein with a low
    /// weight. The threshold is 0.5.
    pub fn suggest_for(relation: &Relation) -> Self {
        relation
            .attributes()
            .iter()
            .enumerate()
            .fold(Self::new(0.5), |comparator, (index, name)| {
                match name.to_lowercase().as_str() {
                    "name" | "title" => {
                        comparator.with_attribute(index, Levenshtein::new(true), 0.3)
                    }
                    "description" => comparator.with_attribute(
                        index,
                        Jaccard::new(Tokenizer::NGrams(2), false),
                        0.2,
                    ),
                    _ => comparator.with_attribute(index, Levenshtein::new(false), 0.1),
                }
            })
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn attributes(&self) -> &[AttributeSimilarity] {
        &self.attributes
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Check the comparator against the relation it will run on.
    pub fn validate(&self, relation: &Relation) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(KeyscanError::Config(format!(
                "duplicate threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        if self.attributes.is_empty() {
            return Err(KeyscanError::Config(
                "record comparator has no attributes".to_string(),
            ));
        }

        for similarity in &self.attributes {
            relation.try_column(similarity.attribute)?;
            if !similarity.weight.is_finite() || similarity.weight < 0.0 {
                return Err(KeyscanError::Config(format!(
                    "weight for attribute {} must be a non-negative number, got {}",
                    similarity.attribute, similarity.weight
                )));
            }
        }

        if self.total_weight() <= 0.0 {
            return Err(KeyscanError::Config(
                "record comparator weights sum to zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Weighted similarity of two records. Missing cells compare as empty
    /// strings.
    pub fn compare<S: AsRef<str>>(&self, left: &[S], right: &[S]) -> f64 {
        let total = self.total_weight();
        if total <= 0.0 {
            return 0.0;
        }

        let weighted: f64 = self
            .attributes
            .iter()
            .map(|similarity| {
                let a = left.get(similarity.attribute).map_or("", |v| v.as_ref());
                let b = right.get(similarity.attribute).map_or("", |v| v.as_ref());
                similarity.weight * similarity.measure.compare(a, b)
            })
            .sum();

        weighted / total
    }

    pub fn is_duplicate(&self, score: f64) -> bool {
        score >= self.threshold
    }

    fn total_weight(&self) -> f64 {
        self.attributes.iter().map(|s| s.weight).sum()
    }
}
