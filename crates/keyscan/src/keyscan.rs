//! Main Keyscan struct and public API.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use serde::{Deserialize, Serialize};

use crate::dedup::{Duplicate, RecordComparator, SortedNeighborhood, duplicate_clusters};
use crate::error::{KeyscanError, Result};
use crate::input::{Parser, ParserConfig, Relation, SourceMetadata};
use crate::matching::{Correspondence, SchemaMatcher, SimilarityMatrix};
use crate::profiling::{Ind, IndProfiler, ProfileObserver, Ucc, UccConfig, UccProfiler};

/// Configuration for a profiling run.
#[derive(Debug, Clone, Default)]
pub struct KeyscanConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// UCC discovery configuration.
    pub ucc: UccConfig,
    /// Schema matching configuration.
    pub matcher: SchemaMatcher,
    /// Duplicate detection configuration.
    pub dedup: DedupConfig,
}

/// Settings for duplicate detection on a file.
#[derive(Debug, Clone)]
pub struct DedupConfig {
    /// Rows compared around each row in one sorted pass.
    pub window: usize,
    /// Override the suggested comparator's threshold.
    pub threshold: Option<f64>,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            window: 5,
            threshold: None,
        }
    }
}

/// A discovered unique column combination, resolved to column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UccReport {
    pub columns: Vec<String>,
    pub indices: Vec<usize>,
    pub arity: usize,
}

impl From<&Ucc<'_>> for UccReport {
    fn from(ucc: &Ucc<'_>) -> Self {
        Self {
            columns: ucc.column_names().into_iter().map(String::from).collect(),
            indices: ucc.attributes().indices().to_vec(),
            arity: ucc.arity(),
        }
    }
}

/// Result of profiling one relation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    /// Metadata about the source file, when profiled from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    /// Relation name.
    pub relation: String,
    /// Attribute names in column order.
    pub attributes: Vec<String>,
    /// Number of data rows.
    pub row_count: usize,
    /// Minimal UCCs, by arity then attribute indices.
    pub uccs: Vec<UccReport>,
    /// Summary statistics.
    pub summary: ProfileSummary,
}

/// Summary of the discovered UCCs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub total_uccs: usize,
    /// Number of single-column keys.
    pub unary_uccs: usize,
    /// Arity of the largest minimal UCC (0 if none).
    pub max_arity: usize,
    /// Columns not covered by any UCC.
    pub uncovered_columns: Vec<String>,
}

impl ProfileSummary {
    fn compute(relation: &Relation, uccs: &[UccReport]) -> Self {
        let uncovered_columns = relation
            .attributes()
            .iter()
            .enumerate()
            .filter(|(index, _)| !uccs.iter().any(|u| u.indices.contains(index)))
            .map(|(_, name)| name.clone())
            .collect();

        Self {
            total_uccs: uccs.len(),
            unary_uccs: uccs.iter().filter(|u| u.arity == 1).count(),
            max_arity: uccs.iter().map(|u| u.arity).max().unwrap_or(0),
            uncovered_columns,
        }
    }
}

/// Result of matching the schemas of two relations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub source: String,
    pub target: String,
    pub matrix: SimilarityMatrix,
    /// One-to-one attribute pairs, by source attribute.
    pub correspondences: Vec<Correspondence>,
}

/// Result of duplicate detection on one relation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateReport {
    pub relation: String,
    pub row_count: usize,
    /// Pairs found by the sorted neighborhood passes.
    pub duplicates: Vec<Duplicate>,
    /// Rows grouped by the transitive closure of `duplicates`.
    pub clusters: Vec<Vec<usize>>,
}

/// The main profiling entry point.
pub struct Keyscan {
    parser: Parser,
    ucc: UccProfiler,
    ind: IndProfiler,
    matcher: SchemaMatcher,
    dedup: DedupConfig,
}

impl Keyscan {
    /// Create a new Keyscan instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(KeyscanConfig::default())
    }

    /// Create a Keyscan instance with custom configuration.
    pub fn with_config(config: KeyscanConfig) -> Self {
        Self {
            parser: Parser::with_config(config.parser),
            ucc: UccProfiler::with_config(config.ucc),
            ind: IndProfiler::new(),
            matcher: config.matcher,
            dedup: config.dedup,
        }
    }

    /// Receive discovery progress events instead of the default tracing output.
    pub fn with_observer(mut self, observer: impl ProfileObserver + 'static) -> Self {
        self.ucc = self.ucc.with_observer(observer);
        self
    }

    /// Stop UCC discovery at the next level boundary once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.ucc = self.ucc.with_cancel_flag(flag);
        self
    }

    /// Load a file and discover its minimal UCCs.
    pub fn profile_file(&self, path: impl AsRef<Path>) -> Result<ProfileReport> {
        let (relation, source) = self.parser.parse_file(path)?;
        let mut report = self.profile_relation(&relation)?;
        report.source = Some(source);
        Ok(report)
    }

    /// Discover the minimal UCCs of an in-memory relation.
    pub fn profile_relation(&self, relation: &Relation) -> Result<ProfileReport> {
        let uccs: Vec<UccReport> = self
            .ucc
            .profile(relation)?
            .iter()
            .map(UccReport::from)
            .collect();
        let summary = ProfileSummary::compute(relation, &uccs);

        Ok(ProfileReport {
            source: None,
            relation: relation.name().to_string(),
            attributes: relation.attributes().to_vec(),
            row_count: relation.row_count(),
            uccs,
            summary,
        })
    }

    /// Load several files and discover unary inclusion dependencies between
    /// all of their columns.
    ///
    /// Requesting n-ary discovery fails before any file is read.
    pub fn inclusion_dependencies<P: AsRef<Path>>(
        &self,
        paths: &[P],
        discover_nary: bool,
    ) -> Result<Vec<Ind>> {
        if discover_nary {
            return Err(KeyscanError::NotImplemented(
                "n-ary inclusion dependency discovery".to_string(),
            ));
        }

        let relations = paths
            .iter()
            .map(|path| self.parser.parse_file(path).map(|(relation, _)| relation))
            .collect::<Result<Vec<_>>>()?;

        self.ind.profile(&relations, discover_nary)
    }

    /// Load two files and match their attributes one-to-one.
    pub fn match_files(
        &self,
        source: impl AsRef<Path>,
        target: impl AsRef<Path>,
    ) -> Result<MatchReport> {
        let (source, _) = self.parser.parse_file(source)?;
        let (target, _) = self.parser.parse_file(target)?;
        self.match_relations(&source, &target)
    }

    /// Match the attributes of two in-memory relations.
    pub fn match_relations(&self, source: &Relation, target: &Relation) -> Result<MatchReport> {
        let matrix = self.matcher.similarity_matrix(source, target)?;
        let correspondences = self.matcher.assign(&matrix)?;

        Ok(MatchReport {
            source: source.name().to_string(),
            target: target.name().to_string(),
            matrix,
            correspondences,
        })
    }

    /// Load a file and find duplicate rows, sorting by each of
    /// `sorting_keys` in turn.
    pub fn find_duplicates(
        &self,
        path: impl AsRef<Path>,
        sorting_keys: &[usize],
    ) -> Result<DuplicateReport> {
        let (relation, _) = self.parser.parse_file(path)?;
        self.duplicates_in(&relation, sorting_keys)
    }

    /// Find duplicate rows of an in-memory relation with a comparator
    /// suggested from its attribute names.
    ///
    /// Empty `sorting_keys` sorts by every attribute in turn.
    pub fn duplicates_in(
        &self,
        relation: &Relation,
        sorting_keys: &[usize],
    ) -> Result<DuplicateReport> {
        let all_keys: Vec<usize>;
        let sorting_keys = if sorting_keys.is_empty() {
            all_keys = (0..relation.attribute_count()).collect();
            &all_keys
        } else {
            sorting_keys
        };

        let mut comparator = RecordComparator::suggest_for(relation);
        if let Some(threshold) = self.dedup.threshold {
            comparator = comparator.with_threshold(threshold);
        }

        let duplicates =
            SortedNeighborhood::new(self.dedup.window).detect(relation, sorting_keys, &comparator)?;
        let clusters = duplicate_clusters(&duplicates);

        Ok(DuplicateReport {
            relation: relation.name().to_string(),
            row_count: relation.row_count(),
            duplicates,
            clusters,
        })
    }
}

impl Default for Keyscan {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_relation_report() {
        let relation = Relation::from_rows(
            "items",
            &["id", "category", "note"],
            &[&["1", "A", "x"], &["2", "A", "x"], &["3", "B", "x"]],
        );

        let report = Keyscan::new().profile_relation(&relation).unwrap();

        assert_eq!(report.relation, "items");
        assert_eq!(report.row_count, 3);
        assert!(report.source.is_none());
        assert_eq!(
            report.uccs,
            vec![UccReport {
                columns: vec!["id".to_string()],
                indices: vec![0],
                arity: 1,
            }]
        );
        assert_eq!(report.summary.total_uccs, 1);
        assert_eq!(report.summary.unary_uccs, 1);
        assert_eq!(report.summary.max_arity, 1);
        assert_eq!(report.summary.uncovered_columns, vec!["category", "note"]);
    }

    #[test]
    fn test_nary_inds_rejected_before_loading() {
        let err = Keyscan::new()
            .inclusion_dependencies(&["/nonexistent/orders.csv", "/nonexistent/items.csv"], true)
            .unwrap_err();
        assert!(matches!(err, KeyscanError::NotImplemented(_)));
    }

    #[test]
    fn test_match_relations_report() {
        let source = Relation::from_rows("s", &["id", "city"], &[&["1", "Rome"], &["2", "Oslo"]]);
        let target = Relation::from_rows("t", &["town", "key"], &[&["Oslo", "2"], &["Rome", "3"]]);

        let report = Keyscan::new().match_relations(&source, &target).unwrap();

        assert_eq!(report.matrix.dimensions(), (2, 2));
        let pairs: Vec<(usize, usize)> = report
            .correspondences
            .iter()
            .map(|c| (c.source, c.target))
            .collect();
        assert_eq!(pairs, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_duplicates_in_groups_rows() {
        let relation = Relation::from_rows(
            "people",
            &["name", "city"],
            &[
                &["Jonathan", "Berlin"],
                &["Jonathon", "Berlin"],
                &["Zoe", "Rome"],
                &["Jonathn", "Berlin"],
            ],
        );
        let keyscan = Keyscan::with_config(KeyscanConfig {
            dedup: DedupConfig {
                window: 2,
                threshold: Some(0.8),
            },
            ..Default::default()
        });

        let report = keyscan.duplicates_in(&relation, &[0]).unwrap();
        assert_eq!(report.row_count, 4);
        assert_eq!(report.clusters, vec![vec![0, 1, 3]]);

        let every_key = keyscan.duplicates_in(&relation, &[]).unwrap();
        assert_eq!(every_key.clusters, report.clusters);
    }

    #[test]
    fn test_report_serializes() {
        let relation = Relation::from_rows("r", &["a"], &[&["1"], &["2"]]);
        let report = Keyscan::new().profile_relation(&relation).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["uccs"][0]["columns"][0], "a");
        assert!(json.get("source").is_none());
    }
}
