//! Relation loading and source metadata.

mod parser;
mod relation;

pub use parser::{Parser, ParserConfig};
pub use relation::{Relation, RelationId, SourceMetadata};
