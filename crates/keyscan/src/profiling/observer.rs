//! Progress events emitted during UCC discovery.

use std::sync::Arc;

use tracing::{debug, trace};

use super::attribute_list::AttributeList;

/// A step of the level-wise search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileEvent<'a> {
    /// Candidate generation for `level` is about to start.
    LevelStarted { level: usize, frontier: usize },
    /// A candidate survived pruning and will be tested.
    CandidateGenerated { attributes: &'a AttributeList },
    /// A candidate has a subset that is already unique.
    CandidatePruned { attributes: &'a AttributeList },
    /// A new minimal unique column combination.
    UniqueFound { attributes: &'a AttributeList },
    /// Unique, but a known UCC is a subset.
    NonMinimalUnique { attributes: &'a AttributeList },
    /// Not unique; carried forward to the next level.
    NonUnique { attributes: &'a AttributeList },
    /// All candidates of `level` were classified.
    LevelFinished {
        level: usize,
        uniques: usize,
        non_uniques: usize,
    },
}

/// Receives [`ProfileEvent`]s from a running discovery.
///
/// Observers must not assume anything about timing beyond the order events
/// are delivered in.
pub trait ProfileObserver: Send + Sync {
    fn on_event(&self, event: &ProfileEvent<'_>);
}

impl<T: ProfileObserver + ?Sized> ProfileObserver for Arc<T> {
    fn on_event(&self, event: &ProfileEvent<'_>) {
        (**self).on_event(event);
    }
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProfileObserver for NoopObserver {
    fn on_event(&self, _event: &ProfileEvent<'_>) {}
}

/// Forwards events to `tracing`: level boundaries and results at debug,
/// per-candidate chatter at trace.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ProfileObserver for TracingObserver {
    fn on_event(&self, event: &ProfileEvent<'_>) {
        match *event {
            ProfileEvent::LevelStarted { level, frontier } => {
                debug!(level, frontier, "level started");
            }
            ProfileEvent::CandidateGenerated { attributes } => {
                trace!(%attributes, "candidate generated");
            }
            ProfileEvent::CandidatePruned { attributes } => {
                trace!(%attributes, "candidate pruned");
            }
            ProfileEvent::UniqueFound { attributes } => {
                debug!(%attributes, arity = attributes.len(), "unique column combination");
            }
            ProfileEvent::NonMinimalUnique { attributes } => {
                trace!(%attributes, "non-minimal unique");
            }
            ProfileEvent::NonUnique { attributes } => {
                trace!(%attributes, "non-unique");
            }
            ProfileEvent::LevelFinished {
                level,
                uniques,
                non_uniques,
            } => {
                debug!(level, uniques, non_uniques, "level finished");
            }
        }
    }
}
