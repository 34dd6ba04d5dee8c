//! Keyscan: structural profiling for tabular relations.
//!
//! Keyscan discovers the structural properties data integration relies on:
//!
//! - **Unique column combinations** (UCCs): minimal attribute sets whose
//!   projected values never repeat across rows. Found by a level-wise search
//!   over stripped partitions (position list indexes).
//! - **Unary inclusion dependencies** (INDs): column pairs where one column's
//!   value set is contained in another's.
//!
//! Built on the same relations and similarity measures:
//!
//! - **Schema matching** ([`matching`]): pairs the attributes of two
//!   relations one-to-one by the overlap of their values.
//! - **Duplicate detection** ([`dedup`]): finds rows describing the same
//!   entity with sorted neighborhood blocking and closes the result
//!   transitively.
//!
//! String similarity measures used when comparing values live in
//! [`similarity`].
//!
//! # Example
//!
//! ```no_run
//! use keyscan::Keyscan;
//!
//! let keyscan = Keyscan::new();
//! let report = keyscan.profile_file("customers.csv").unwrap();
//!
//! for ucc in &report.uccs {
//!     println!("{}", ucc.columns.join(", "));
//! }
//! ```

pub mod dedup;
pub mod error;
pub mod input;
pub mod matching;
pub mod profiling;
pub mod similarity;

mod keyscan;

pub use crate::keyscan::{
    DedupConfig, DuplicateReport, Keyscan, KeyscanConfig, MatchReport, ProfileReport,
    ProfileSummary, UccReport,
};
pub use dedup::{
    AttributeSimilarity, Duplicate, RecordComparator, SortedNeighborhood, duplicate_clusters,
    transitive_closure,
};
pub use error::{KeyscanError, Result};
pub use input::{Parser, ParserConfig, Relation, RelationId, SourceMetadata};
pub use matching::{Correspondence, SchemaMatcher, SimilarityMatrix, optimal_assignment};
pub use profiling::{
    AttributeList, ColumnRef, Ind, IndProfiler, NoopObserver, PositionListIndex, ProfileEvent,
    ProfileObserver, TracingObserver, Ucc, UccConfig, UccProfiler,
};
pub use similarity::{Jaccard, Levenshtein, SimilarityMeasure, Tokenizer};
