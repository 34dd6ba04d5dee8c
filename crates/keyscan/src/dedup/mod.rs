//! Duplicate record detection within one relation.
//!
//! [`SortedNeighborhood`] avoids comparing all pairs of records: for each
//! sorting key it orders the records by that key and only compares records
//! that land within a sliding window of each other. A [`RecordComparator`]
//! scores each pair as the weighted average of per-attribute similarities.
//! Detected pairs are not transitive on their own, so
//! [`transitive_closure`] completes them into consistent clusters.

mod closure;
mod comparator;
mod neighborhood;

pub use closure::{duplicate_clusters, transitive_closure};
pub use comparator::{AttributeSimilarity, RecordComparator};
pub use neighborhood::{Duplicate, SortedNeighborhood};
