//! Position list indexes (stripped partitions).
//!
//! A position list index groups the rows of a relation into clusters of
//! rows that agree on an attribute combination. Clusters of size one carry
//! no information for uniqueness and are never stored, which keeps the
//! structure small for high-cardinality columns. Each PLI also keeps the
//! inverse mapping from row to cluster so that partitions can be refined
//! against each other without touching the raw values again.

use indexmap::IndexMap;

use super::attribute_list::AttributeList;
use crate::error::{KeyscanError, Result};
use crate::input::{Relation, RelationId};

/// Stripped partition of a relation's rows on an attribute combination.
#[derive(Debug, Clone)]
pub struct PositionListIndex {
    /// Relation the partition was built from; `None` for PLIs built from
    /// free-standing values.
    relation: Option<RelationId>,
    attributes: AttributeList,
    clusters: Vec<Vec<usize>>,
    /// Cluster id per row; `None` for rows in an implicit singleton cluster.
    inverted: Vec<Option<usize>>,
}

impl PositionListIndex {
    /// Partition rows by equality of the given values, one value per row.
    pub fn from_values<S: AsRef<str>>(attributes: AttributeList, values: &[S]) -> Self {
        let mut groups: IndexMap<&str, Vec<usize>> = IndexMap::with_capacity(values.len());
        for (row, value) in values.iter().enumerate() {
            groups.entry(value.as_ref()).or_default().push(row);
        }

        let clusters = groups
            .into_values()
            .filter(|cluster| cluster.len() > 1)
            .collect();

        Self::from_clusters(None, attributes, clusters, values.len())
    }

    /// Build the PLI of a single column of `relation`.
    pub fn for_column(relation: &Relation, attribute: usize) -> Result<Self> {
        let values = relation.try_column(attribute)?;
        let mut pli = Self::from_values(AttributeList::single(attribute), values);
        pli.relation = Some(relation.id());
        Ok(pli)
    }

    /// Build the PLI of an arbitrary attribute combination directly from the
    /// raw values. Level-wise discovery never needs this; it exists to check
    /// refined partitions against ground truth.
    pub fn for_attributes(relation: &Relation, attributes: &AttributeList) -> Result<Self> {
        for index in attributes.iter() {
            relation.try_column(index)?;
        }

        let mut groups: IndexMap<Vec<&str>, Vec<usize>> = IndexMap::new();
        for (row, record) in relation.records().iter().enumerate() {
            let key = attributes.iter().map(|i| record[i].as_str()).collect();
            groups.entry(key).or_default().push(row);
        }

        let clusters = groups
            .into_values()
            .filter(|cluster| cluster.len() > 1)
            .collect();

        Ok(Self::from_clusters(
            Some(relation.id()),
            attributes.clone(),
            clusters,
            relation.row_count(),
        ))
    }

    fn from_clusters(
        relation: Option<RelationId>,
        attributes: AttributeList,
        clusters: Vec<Vec<usize>>,
        relation_length: usize,
    ) -> Self {
        let mut inverted = vec![None; relation_length];
        for (cluster_id, cluster) in clusters.iter().enumerate() {
            for &row in cluster {
                inverted[row] = Some(cluster_id);
            }
        }

        Self {
            relation,
            attributes,
            clusters,
            inverted,
        }
    }

    /// Refine this partition by `other`.
    ///
    /// Each cluster of `self` is split by the cluster ids `other` assigns to
    /// its rows. Two rows agree on the union of both attribute lists exactly
    /// when they share a cluster in both partitions, so the result equals the
    /// partition computed from the combined raw values. Runs in time linear
    /// in the number of rows held by `self`'s clusters.
    ///
    /// Fails with [`KeyscanError::RelationMismatch`] if the two partitions
    /// come from different relations or cover a different number of rows.
    pub fn intersect(&self, other: &PositionListIndex) -> Result<PositionListIndex> {
        if let (Some(left), Some(right)) = (self.relation, other.relation) {
            if left != right {
                return Err(KeyscanError::RelationMismatch(format!(
                    "relation {left} vs relation {right}"
                )));
            }
        }
        if self.relation_length() != other.relation_length() {
            return Err(KeyscanError::RelationMismatch(format!(
                "{} rows vs {} rows",
                self.relation_length(),
                other.relation_length()
            )));
        }

        let mut clusters = Vec::new();
        let mut refined: IndexMap<usize, Vec<usize>> = IndexMap::new();

        for cluster in &self.clusters {
            for &row in cluster {
                // Rows unique in `other` are unique in the intersection too.
                if let Some(other_id) = other.inverted[row] {
                    refined.entry(other_id).or_default().push(row);
                }
            }

            clusters.extend(
                refined
                    .drain(..)
                    .map(|(_, rows)| rows)
                    .filter(|rows| rows.len() > 1),
            );
        }

        Ok(Self::from_clusters(
            self.relation.or(other.relation),
            self.attributes.union(&other.attributes),
            clusters,
            self.relation_length(),
        ))
    }

    /// True if no two rows agree on all of this PLI's attributes.
    pub fn is_unique(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Relation this partition was built from, if it came from one.
    pub fn relation(&self) -> Option<RelationId> {
        self.relation
    }

    /// Number of rows in the partitioned relation.
    pub fn relation_length(&self) -> usize {
        self.inverted.len()
    }

    pub fn attributes(&self) -> &AttributeList {
        &self.attributes
    }

    /// Non-singleton clusters, in no particular order.
    pub fn clusters(&self) -> &[Vec<usize>] {
        &self.clusters
    }

    /// Cluster id of a row, or `None` if the row's value is unique.
    pub fn cluster_of(&self, row: usize) -> Option<usize> {
        self.inverted.get(row).copied().flatten()
    }

    /// Clusters in a canonical order, for comparing partitions.
    pub fn sorted_clusters(&self) -> Vec<Vec<usize>> {
        let mut clusters: Vec<Vec<usize>> = self
            .clusters
            .iter()
            .map(|cluster| {
                let mut cluster = cluster.clone();
                cluster.sort_unstable();
                cluster
            })
            .collect();
        clusters.sort_unstable();
        clusters
    }
}
