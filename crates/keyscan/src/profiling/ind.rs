//! Unary inclusion dependency discovery.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{KeyscanError, Result};
use crate::input::Relation;

/// A column of a named relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    pub relation: String,
    pub attribute: usize,
    pub name: String,
}

impl ColumnRef {
    fn new(relation: &Relation, attribute: usize) -> Self {
        Self {
            relation: relation.name().to_string(),
            attribute,
            name: relation.attributes()[attribute].clone(),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.relation, self.name)
    }
}

/// Every value of `dependent` also occurs in `referenced`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ind {
    pub dependent: ColumnRef,
    pub referenced: ColumnRef,
}

impl fmt::Display for Ind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ⊆ {}", self.dependent, self.referenced)
    }
}

/// Hash-based unary IND discovery across one or more relations.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndProfiler;

impl IndProfiler {
    pub fn new() -> Self {
        Self
    }

    /// Find all non-trivial unary INDs among the columns of `relations`.
    ///
    /// Values are compared after trimming whitespace and one pair of
    /// surrounding double quotes. Results are ordered by dependent column,
    /// then referenced column, in input order. N-ary discovery is not
    /// available and is reported as [`KeyscanError::NotImplemented`].
    pub fn profile(&self, relations: &[Relation], discover_nary: bool) -> Result<Vec<Ind>> {
        if discover_nary {
            return Err(KeyscanError::NotImplemented(
                "n-ary inclusion dependency discovery".to_string(),
            ));
        }

        let columns: Vec<(&Relation, usize, HashSet<&str>)> = relations
            .iter()
            .flat_map(|relation| {
                relation
                    .columns()
                    .iter()
                    .enumerate()
                    .map(move |(index, values)| (relation, index, distinct_values(values)))
            })
            .collect();

        let mut inds = Vec::new();
        for (i, (dep_relation, dep_index, dep_values)) in columns.iter().enumerate() {
            for (j, (ref_relation, ref_index, ref_values)) in columns.iter().enumerate() {
                if i == j || dep_values.len() > ref_values.len() {
                    continue;
                }

                if dep_values.is_subset(ref_values) {
                    inds.push(Ind {
                        dependent: ColumnRef::new(dep_relation, *dep_index),
                        referenced: ColumnRef::new(ref_relation, *ref_index),
                    });
                }
            }
        }

        debug!(
            relations = relations.len(),
            columns = columns.len(),
            inds = inds.len(),
            "inclusion dependency discovery finished"
        );

        Ok(inds)
    }
}

fn distinct_values(values: &[String]) -> HashSet<&str> {
    values.iter().map(|v| normalize(v)).collect()
}

/// Trim and strip one leading and one trailing double quote.
fn normalize(value: &str) -> &str {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    trimmed.strip_suffix('"').unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders() -> Relation {
        Relation::from_rows(
            "orders",
            &["order_id", "customer"],
            &[&["o1", "c1"], &["o2", "c2"], &["o3", "c1"]],
        )
    }

    fn customers() -> Relation {
        Relation::from_rows(
            "customers",
            &["id", "name"],
            &[&["c1", "Ann"], &["\"c2\"", "Bo"], &["c3", "Cy"]],
        )
    }

    #[test]
    fn test_foreign_key_found() {
        let inds = IndProfiler::new()
            .profile(&[orders(), customers()], false)
            .unwrap();

        let rendered: Vec<String> = inds.iter().map(|i| i.to_string()).collect();
        assert_eq!(rendered, vec!["orders.customer ⊆ customers.id"]);
    }

    #[test]
    fn test_within_single_relation() {
        let relation = Relation::from_rows(
            "r",
            &["a", "b"],
            &[&["1", "1"], &["2", "1"], &["3", "2"]],
        );

        let inds = IndProfiler::new().profile(&[relation], false).unwrap();
        assert_eq!(inds.len(), 1);
        assert_eq!(inds[0].dependent.name, "b");
        assert_eq!(inds[0].referenced.name, "a");
    }

    #[test]
    fn test_equal_columns_include_each_other() {
        let relation = Relation::from_rows("r", &["a", "b"], &[&["1", " 2 "], &["2", "1"]]);

        let inds = IndProfiler::new().profile(&[relation], false).unwrap();
        let pairs: Vec<(usize, usize)> = inds
            .iter()
            .map(|i| (i.dependent.attribute, i.referenced.attribute))
            .collect();
        assert_eq!(pairs, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_nary_not_implemented() {
        let err = IndProfiler::new()
            .profile(&[orders()], true)
            .unwrap_err();
        assert!(matches!(err, KeyscanError::NotImplemented(_)));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  \"abc\" "), "abc");
        assert_eq!(normalize("\"abc"), "abc");
        assert_eq!(normalize("plain"), "plain");
        assert_eq!(normalize("\"\""), "");
    }
}
