//! Dependency discovery: unique column combinations and inclusion dependencies.

mod attribute_list;
mod ind;
mod observer;
mod pli;
mod ucc;

pub use attribute_list::AttributeList;
pub use ind::{ColumnRef, Ind, IndProfiler};
pub use observer::{NoopObserver, ProfileEvent, ProfileObserver, TracingObserver};
pub use pli::PositionListIndex;
pub use ucc::{Ucc, UccConfig, UccProfiler};
