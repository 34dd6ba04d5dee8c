//! Minimal unique column combination discovery.
//!
//! The search is level-wise: level 1 partitions every single column, and each
//! following level joins pairs of non-unique combinations from the previous
//! level that agree on all but their last attribute. A candidate is only
//! tested if every one of its direct subsets is still non-unique; otherwise
//! some subset is already unique and the candidate cannot be minimal.
//! Partitions for new candidates come from refining the parents' partitions,
//! never from rescanning the relation.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::ptr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use tracing::debug;

use super::attribute_list::AttributeList;
use super::observer::{ProfileEvent, ProfileObserver, TracingObserver};
use super::pli::PositionListIndex;
use crate::error::{KeyscanError, Result};
use crate::input::Relation;

/// Non-unique combinations of the current level, keyed by attribute list so
/// that enumeration order never depends on hashing.
type Frontier = BTreeMap<AttributeList, PositionListIndex>;

/// A unique column combination of a relation.
#[derive(Clone)]
pub struct Ucc<'r> {
    relation: &'r Relation,
    attributes: AttributeList,
}

impl<'r> Ucc<'r> {
    pub fn new(relation: &'r Relation, attributes: AttributeList) -> Self {
        Self {
            relation,
            attributes,
        }
    }

    pub fn relation(&self) -> &'r Relation {
        self.relation
    }

    pub fn attributes(&self) -> &AttributeList {
        &self.attributes
    }

    /// Number of attributes in the combination.
    pub fn arity(&self) -> usize {
        self.attributes.len()
    }

    /// Column names of the combination, in attribute order.
    pub fn column_names(&self) -> Vec<&'r str> {
        self.relation.attribute_names(&self.attributes)
    }
}

impl PartialEq for Ucc<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.relation, other.relation) && self.attributes == other.attributes
    }
}

impl Eq for Ucc<'_> {}

impl fmt::Debug for Ucc<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ucc")
            .field("relation", &self.relation.name())
            .field("attributes", &self.attributes)
            .finish()
    }
}

impl fmt::Display for Ucc<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.relation.name(), self.column_names().join(", "))
    }
}

/// Configuration for UCC discovery.
#[derive(Debug, Clone, Default)]
pub struct UccConfig {
    /// Stop after this level (None = run to completion).
    pub max_arity: Option<usize>,
}

impl UccConfig {
    /// Only report combinations of at most `max_arity` attributes.
    pub fn with_max_arity(mut self, max_arity: usize) -> Self {
        self.max_arity = Some(max_arity);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_arity == Some(0) {
            return Err(KeyscanError::Config(
                "max_arity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Discovers all minimal unique column combinations of a relation.
pub struct UccProfiler {
    config: UccConfig,
    observer: Arc<dyn ProfileObserver>,
    cancel: Option<Arc<AtomicBool>>,
}

impl UccProfiler {
    /// Create a profiler with default configuration.
    pub fn new() -> Self {
        Self::with_config(UccConfig::default())
    }

    pub fn with_config(config: UccConfig) -> Self {
        Self {
            config,
            observer: Arc::new(TracingObserver),
            cancel: None,
        }
    }

    /// Replace the default tracing observer.
    pub fn with_observer(mut self, observer: impl ProfileObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Abort at the next level boundary once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &UccConfig {
        &self.config
    }

    /// Run discovery on `relation`.
    ///
    /// Results are sorted by arity, then by attribute indices. A relation
    /// without rows or attributes yields no UCCs.
    pub fn profile<'r>(&self, relation: &'r Relation) -> Result<Vec<Ucc<'r>>> {
        self.config.validate()?;

        let mut uniques: Vec<Ucc<'r>> = Vec::new();
        if relation.attribute_count() == 0 || relation.row_count() == 0 {
            debug!(relation = relation.name(), "empty relation, nothing to profile");
            return Ok(uniques);
        }

        let mut frontier = self.first_level(relation, &mut uniques)?;
        let mut level = 1;

        while !frontier.is_empty() {
            if self.config.max_arity.is_some_and(|max| level >= max) {
                debug!(level, remaining = frontier.len(), "arity limit reached");
                break;
            }
            level += 1;

            if self.is_cancelled() {
                return Err(KeyscanError::Cancelled { level });
            }

            self.observer.on_event(&ProfileEvent::LevelStarted {
                level,
                frontier: frontier.len(),
            });
            frontier = self.next_level(level, &frontier, relation, &mut uniques)?;
        }

        uniques.sort_by(|a, b| compare_combinations(a.attributes(), b.attributes()));
        debug!(
            relation = relation.name(),
            uccs = uniques.len(),
            levels = level,
            "discovery finished"
        );

        Ok(uniques)
    }

    fn first_level<'r>(
        &self,
        relation: &'r Relation,
        uniques: &mut Vec<Ucc<'r>>,
    ) -> Result<Frontier> {
        self.observer.on_event(&ProfileEvent::LevelStarted {
            level: 1,
            frontier: relation.attribute_count(),
        });

        let mut frontier = Frontier::new();
        for attribute in 0..relation.attribute_count() {
            let pli = PositionListIndex::for_column(relation, attribute)?;
            let attributes = pli.attributes().clone();

            if pli.is_unique() {
                self.observer
                    .on_event(&ProfileEvent::UniqueFound { attributes: &attributes });
                uniques.push(Ucc::new(relation, attributes));
            } else {
                self.observer
                    .on_event(&ProfileEvent::NonUnique { attributes: &attributes });
                frontier.insert(attributes, pli);
            }
        }

        self.observer.on_event(&ProfileEvent::LevelFinished {
            level: 1,
            uniques: uniques.len(),
            non_uniques: frontier.len(),
        });

        Ok(frontier)
    }

    fn next_level<'r>(
        &self,
        level: usize,
        frontier: &Frontier,
        relation: &'r Relation,
        uniques: &mut Vec<Ucc<'r>>,
    ) -> Result<Frontier> {
        let candidates = self.generate_candidates(frontier);
        let mut next = Frontier::new();
        let mut found = 0;

        for (candidate, (left, right)) in candidates {
            let pli = frontier[left].intersect(&frontier[right])?;

            if !pli.is_unique() {
                self.observer
                    .on_event(&ProfileEvent::NonUnique { attributes: &candidate });
                next.insert(candidate, pli);
            } else if uniques
                .iter()
                .any(|ucc| candidate.is_superset_of(ucc.attributes()))
            {
                // Pruning already excludes these; minimality guard.
                self.observer
                    .on_event(&ProfileEvent::NonMinimalUnique { attributes: &candidate });
            } else {
                self.observer
                    .on_event(&ProfileEvent::UniqueFound { attributes: &candidate });
                uniques.push(Ucc::new(relation, candidate));
                found += 1;
            }
        }

        self.observer.on_event(&ProfileEvent::LevelFinished {
            level,
            uniques: found,
            non_uniques: next.len(),
        });

        Ok(next)
    }

    /// Join frontier members that share a prefix, keeping only candidates
    /// whose direct subsets are all in the frontier.
    fn generate_candidates<'f>(
        &self,
        frontier: &'f Frontier,
    ) -> BTreeMap<AttributeList, (&'f AttributeList, &'f AttributeList)> {
        let members: Vec<&AttributeList> = frontier.keys().collect();
        let mut candidates = BTreeMap::new();

        for (i, &left) in members.iter().enumerate() {
            // Sorted keys place every list sharing `left`'s prefix right after it.
            for &right in &members[i + 1..] {
                if !left.shares_prefix_with(right) {
                    break;
                }

                let candidate = left.union(right);
                if candidate
                    .direct_subsets()
                    .all(|subset| frontier.contains_key(&subset))
                {
                    self.observer
                        .on_event(&ProfileEvent::CandidateGenerated { attributes: &candidate });
                    candidates.insert(candidate, (left, right));
                } else {
                    self.observer
                        .on_event(&ProfileEvent::CandidatePruned { attributes: &candidate });
                }
            }
        }

        candidates
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(AtomicOrdering::Relaxed))
    }
}

impl Default for UccProfiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Order by arity, then lexicographically by attribute index.
fn compare_combinations(a: &AttributeList, b: &AttributeList) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
