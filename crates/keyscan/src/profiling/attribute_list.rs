//! Sorted attribute index sets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered set of attribute (column) indices.
///
/// Indices are kept sorted and free of duplicates, so two lists with the same
/// content compare and hash equal regardless of how they were built. The
/// derived ordering is lexicographic over the index sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeList(Vec<usize>);

impl AttributeList {
    /// Build from any collection of indices; order and duplicates are ignored.
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        let mut indices: Vec<usize> = indices.into_iter().collect();
        indices.sort_unstable();
        indices.dedup();
        Self(indices)
    }

    /// A list holding exactly one attribute.
    pub fn single(index: usize) -> Self {
        Self(vec![index])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Highest index in the list.
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.binary_search(&index).is_ok()
    }

    /// Set union as a sorted merge.
    pub fn union(&self, other: &AttributeList) -> AttributeList {
        let (a, b) = (&self.0, &other.0);
        let mut merged = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);

        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => {
                    merged.push(a[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    merged.push(b[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    merged.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&a[i..]);
        merged.extend_from_slice(&b[j..]);

        AttributeList(merged)
    }

    /// True if every index of `self` also appears in `other`.
    pub fn is_subset_of(&self, other: &AttributeList) -> bool {
        if self.len() > other.len() {
            return false;
        }

        let mut theirs = other.0.iter();
        self.0
            .iter()
            .all(|mine| theirs.by_ref().any(|candidate| candidate == mine))
    }

    pub fn is_superset_of(&self, other: &AttributeList) -> bool {
        other.is_subset_of(self)
    }

    /// True iff both lists have the same length and agree on every index but
    /// the last. This is the join condition for level-wise candidate
    /// generation; two single-attribute lists always share the empty prefix.
    pub fn shares_prefix_with(&self, other: &AttributeList) -> bool {
        let len = self.len();
        len == other.len() && len > 0 && self.0[..len - 1] == other.0[..len - 1]
    }

    /// All lists obtained by dropping exactly one index.
    pub fn direct_subsets(&self) -> impl Iterator<Item = AttributeList> + '_ {
        (0..self.0.len()).map(move |skip| {
            AttributeList(
                self.0
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != skip)
                    .map(|(_, &index)| index)
                    .collect(),
            )
        })
    }
}

impl From<Vec<usize>> for AttributeList {
    fn from(indices: Vec<usize>) -> Self {
        Self::new(indices)
    }
}

impl fmt::Display for AttributeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", index)?;
        }
        write!(f, "]")
    }
}
