//! Transitive closure over detected duplicate pairs.

use std::collections::BTreeMap;

use super::neighborhood::Duplicate;

/// Group the rows connected by `duplicates` into clusters.
///
/// Only clusters of at least two rows are returned. Each cluster is sorted
/// and the clusters are ordered by their smallest row.
pub fn duplicate_clusters(duplicates: &[Duplicate]) -> Vec<Vec<usize>> {
    let mut forest = DisjointSet::default();
    for duplicate in duplicates {
        forest.union(duplicate.left, duplicate.right);
    }

    let rows: Vec<usize> = forest.parent.keys().copied().collect();
    let mut clusters: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for row in rows {
        let root = forest.find(row);
        clusters.entry(root).or_default().push(row);
    }

    // Rows were visited in ascending order, so clusters are already sorted.
    let mut clusters: Vec<Vec<usize>> = clusters
        .into_values()
        .filter(|cluster| cluster.len() > 1)
        .collect();
    clusters.sort_unstable_by_key(|cluster| cluster[0]);
    clusters
}

/// Complete `duplicates` so that duplicate-of is transitive.
///
/// Every pair of rows in the same cluster is returned once, with
/// `left < right`. All pairs of the closure describe one entity, so each
/// carries similarity 1.0. Results are ordered by `(left, right)`.
pub fn transitive_closure(duplicates: &[Duplicate]) -> Vec<Duplicate> {
    duplicate_clusters(duplicates)
        .iter()
        .flat_map(|cluster| {
            cluster.iter().enumerate().flat_map(move |(i, &left)| {
                cluster[i + 1..]
                    .iter()
                    .map(move |&right| Duplicate::new(left, right, 1.0))
            })
        })
        .map(|duplicate| (duplicate.pair(), duplicate))
        .collect::<BTreeMap<_, _>>()
        .into_values()
        .collect()
}

/// Union-find keyed by row, with path halving and union by size.
#[derive(Debug, Default)]
struct DisjointSet {
    parent: BTreeMap<usize, usize>,
    size: BTreeMap<usize, usize>,
}

impl DisjointSet {
    fn find(&mut self, row: usize) -> usize {
        let mut current = *self.parent.entry(row).or_insert(row);
        if current == row {
            return row;
        }

        let mut node = row;
        while current != node {
            let grandparent = self.parent[&current];
            self.parent.insert(node, grandparent);
            node = current;
            current = grandparent;
        }
        current
    }

    fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return;
        }

        let size_a = *self.size.get(&root_a).unwrap_or(&1);
        let size_b = *self.size.get(&root_b).unwrap_or(&1);
        let (big, small) = if size_a >= size_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.parent.insert(small, big);
        self.size.insert(big, size_a + size_b);
    }
}
