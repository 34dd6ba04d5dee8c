//! Instance-based schema matching.
//!
//! Matching runs in two lines. The first line scores every source column
//! against every target column by the overlap of their values, producing a
//! [`SimilarityMatrix`]. The second line turns the matrix into a one-to-one
//! set of [`Correspondence`]s by solving the assignment problem that
//! maximizes total similarity.

mod assignment;
mod matcher;
mod matrix;

pub use assignment::optimal_assignment;
pub use matcher::{Correspondence, SchemaMatcher};
pub use matrix::SimilarityMatrix;
