//! Sorted neighborhood blocking.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::comparator::RecordComparator;
use crate::error::{KeyscanError, Result};
use crate::input::Relation;

/// Two rows of one relation judged to describe the same entity.
///
/// Rows are stored with `left < right`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Duplicate {
    pub left: usize,
    pub right: usize,
    pub similarity: f64,
}

impl Duplicate {
    pub fn new(a: usize, b: usize, similarity: f64) -> Self {
        Self {
            left: a.min(b),
            right: a.max(b),
            similarity,
        }
    }

    pub fn pair(&self) -> (usize, usize) {
        (self.left, self.right)
    }
}

/// Sorted neighborhood duplicate detection.
///
/// Each pass sorts the rows by one key attribute and compares every row with
/// the next `window - 1` rows in that order. Passes with different keys
/// catch duplicates that one ordering would separate.
#[derive(Debug, Clone)]
pub struct SortedNeighborhood {
    window: usize,
}

impl SortedNeighborhood {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Detect duplicate rows of `relation`.
    ///
    /// Ties in a sort key keep row order. A pair found by several passes is
    /// reported once. Results are ordered by `(left, right)`.
    pub fn detect(
        &self,
        relation: &Relation,
        sorting_keys: &[usize],
        comparator: &RecordComparator,
    ) -> Result<Vec<Duplicate>> {
        if self.window < 2 {
            return Err(KeyscanError::Config(format!(
                "window must cover at least 2 rows, got {}",
                self.window
            )));
        }
        if sorting_keys.is_empty() {
            return Err(KeyscanError::Config(
                "at least one sorting key is required".to_string(),
            ));
        }
        comparator.validate(relation)?;
        let columns = sorting_keys
            .iter()
            .map(|&key| relation.try_column(key))
            .collect::<Result<Vec<_>>>()?;

        let records = relation.records();
        // Score of every compared pair, so later passes skip known pairs.
        let mut scores: BTreeMap<(usize, usize), f64> = BTreeMap::new();

        for column in columns {
            let mut order: Vec<usize> = (0..records.len()).collect();
            order.sort_by(|&a, &b| column[a].cmp(&column[b]));

            for (position, &row) in order.iter().enumerate() {
                let end = records.len().min(position + self.window);
                for &other in &order[position + 1..end] {
                    let pair = (row.min(other), row.max(other));
                    if scores.contains_key(&pair) {
                        continue;
                    }

                    let score = comparator.compare(&records[row], &records[other]);
                    if comparator.is_duplicate(score) {
                        trace!(left = pair.0, right = pair.1, score, "duplicate");
                    }
                    scores.insert(pair, score);
                }
            }
        }

        let duplicates: Vec<Duplicate> = scores
            .into_iter()
            .filter(|&(_, score)| comparator.is_duplicate(score))
            .map(|((left, right), similarity)| Duplicate {
                left,
                right,
                similarity,
            })
            .collect();

        debug!(
            relation = relation.name(),
            passes = sorting_keys.len(),
            window = self.window,
            duplicates = duplicates.len(),
            "sorted neighborhood finished"
        );

        Ok(duplicates)
    }
}
