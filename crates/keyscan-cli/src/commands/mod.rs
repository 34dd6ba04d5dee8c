//! CLI command implementations.

pub mod dedup;
pub mod ind;
pub mod matching;
pub mod similarity;
pub mod ucc;
