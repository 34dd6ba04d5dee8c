//! Integration tests for keyscan.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use tempfile::NamedTempFile;

use keyscan::{DedupConfig, Keyscan, KeyscanConfig, KeyscanError, ParserConfig, UccConfig};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn ucc_columns(report: &keyscan::ProfileReport) -> Vec<Vec<String>> {
    report.uccs.iter().map(|u| u.columns.clone()).collect()
}

// =============================================================================
// UCC Discovery
// =============================================================================

#[test]
fn test_profile_identifier_column() {
    let content = "id,category\n\
                   1,A\n\
                   2,A\n\
                   3,B\n";
    let file = create_test_file(content);

    let report = Keyscan::new().profile_file(file.path()).expect("Profiling failed");

    assert_eq!(ucc_columns(&report), vec![vec!["id"]]);
    let source = report.source.expect("source metadata");
    assert_eq!(source.format, "csv");
    assert_eq!(source.row_count, 3);
    assert_eq!(source.column_count, 2);
    assert!(source.hash.starts_with("sha256:"));
}

#[test]
fn test_profile_tsv_composite_key() {
    let content = "sample\tvisit\tsite\n\
                   S1\t1\tgut\n\
                   S1\t2\tgut\n\
                   S2\t1\tgut\n\
                   S2\t2\tskin\n";
    let file = create_test_file(content);

    let report = Keyscan::new().profile_file(file.path()).expect("Profiling failed");

    assert_eq!(report.source.as_ref().map(|s| s.format.as_str()), Some("tsv"));
    assert_eq!(ucc_columns(&report), vec![vec!["sample", "visit"]]);
    assert_eq!(report.summary.max_arity, 2);
    assert_eq!(report.summary.uncovered_columns, vec!["site"]);
}

#[test]
fn test_profile_several_keys_sorted() {
    let content = "a,b,c,d\n\
                   1,1,1,1\n\
                   1,2,2,2\n\
                   2,1,2,3\n\
                   2,2,1,4\n";
    let file = create_test_file(content);

    let report = Keyscan::new().profile_file(file.path()).expect("Profiling failed");

    assert_eq!(
        ucc_columns(&report),
        vec![
            vec!["d"],
            vec!["a", "b"],
            vec!["a", "c"],
            vec!["b", "c"],
        ]
    );
}

#[test]
fn test_quoted_and_missing_values() {
    // Missing cells are empty strings and compare equal to each other.
    let content = "name,code\n\
                   \"Smith, J\",\n\
                   \"Smith, K\",\n\
                   Jones,X\n";
    let file = create_test_file(content);

    let report = Keyscan::new().profile_file(file.path()).expect("Profiling failed");
    assert_eq!(ucc_columns(&report), vec![vec!["name"]]);
}

#[test]
fn test_header_only_file_has_no_uccs() {
    let file = create_test_file("a,b,c\n");

    let report = Keyscan::new().profile_file(file.path()).expect("Profiling failed");
    assert_eq!(report.row_count, 0);
    assert!(report.uccs.is_empty());
}

#[test]
fn test_max_arity_config() {
    let content = "x,y\n1,1\n1,2\n2,1\n";
    let file = create_test_file(content);

    let config = KeyscanConfig {
        parser: ParserConfig::default(),
        ucc: UccConfig::default().with_max_arity(1),
        ..Default::default()
    };
    let report = Keyscan::with_config(config)
        .profile_file(file.path())
        .expect("Profiling failed");

    assert!(report.uccs.is_empty());
}

#[test]
fn test_max_rows_config() {
    let content = "x,y\n1,a\n2,a\n3,a\n3,b\n";
    let file = create_test_file(content);

    let config = KeyscanConfig {
        parser: ParserConfig::default().with_max_rows(3),
        ..Default::default()
    };
    let report = Keyscan::with_config(config)
        .profile_file(file.path())
        .expect("Profiling failed");

    assert_eq!(ucc_columns(&report), vec![vec!["x"]]);
}

#[test]
fn test_cancelled_run_returns_no_partial_result() {
    let file = create_test_file("x,y\n1,1\n1,2\n2,1\n");

    let flag = Arc::new(AtomicBool::new(true));
    let result = Keyscan::new()
        .with_cancel_flag(flag)
        .profile_file(file.path());

    assert!(matches!(result, Err(KeyscanError::Cancelled { level: 2 })));
}

#[test]
fn test_missing_file() {
    let result = Keyscan::new().profile_file("/nonexistent/keyscan/input.csv");
    assert!(matches!(result, Err(KeyscanError::Io { .. })));
}

// =============================================================================
// Inclusion Dependencies
// =============================================================================

#[test]
fn test_inclusion_dependencies_across_files() {
    let mut orders = tempfile::Builder::new()
        .prefix("orders")
        .suffix(".csv")
        .tempfile()
        .unwrap();
    orders.write_all(b"order_id,customer\no1,c1\no2,c2\no3,c1\n").unwrap();
    let mut customers = tempfile::Builder::new()
        .prefix("customers")
        .suffix(".csv")
        .tempfile()
        .unwrap();
    customers.write_all(b"id,name\nc1,Ann\nc2,Bo\nc3,Cy\n").unwrap();

    let inds = Keyscan::new()
        .inclusion_dependencies(&[orders.path(), customers.path()], false)
        .expect("IND discovery failed");

    assert_eq!(inds.len(), 1);
    assert_eq!(inds[0].dependent.name, "customer");
    assert_eq!(inds[0].referenced.name, "id");
    assert!(inds[0].dependent.relation.starts_with("orders"));
    assert!(inds[0].referenced.relation.starts_with("customers"));
}

#[test]
fn test_nary_inclusion_dependencies_unsupported() {
    let file = create_test_file("a,b\n1,1\n");

    let result = Keyscan::new().inclusion_dependencies(&[file.path()], true);
    assert!(matches!(result, Err(KeyscanError::NotImplemented(_))));
}

#[test]
fn test_nary_request_fails_before_reading_files() {
    let result = Keyscan::new().inclusion_dependencies(&["/nonexistent/a.csv"], true);
    assert!(matches!(result, Err(KeyscanError::NotImplemented(_))));
}

// =============================================================================
// Schema Matching
// =============================================================================

#[test]
fn test_match_files_pairs_columns() {
    let source = create_test_file(
        "id,city,name\n\
         1,Berlin,Ada\n\
         2,Paris,Grace\n\
         3,Rome,Alan\n",
    );
    let target = create_test_file(
        "person;town;number\n\
         Ada;Berlin;1\n\
         Grace;Paris;2\n\
         Edsger;Oslo;4\n",
    );

    let report = Keyscan::new()
        .match_files(source.path(), target.path())
        .expect("Matching failed");

    let pairs: Vec<(&str, &str)> = report
        .correspondences
        .iter()
        .map(|c| (c.source_name.as_str(), c.target_name.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![("id", "number"), ("city", "town"), ("name", "person")]
    );
    assert_eq!(report.matrix.dimensions(), (3, 3));
}

// =============================================================================
// Duplicate Detection
// =============================================================================

#[test]
fn test_find_duplicates_in_file() {
    let file = create_test_file(
        "name,city\n\
         Jonathan,Berlin\n\
         Maria,Lisbon\n\
         Jonathon,Berlin\n\
         Mario,Lisbon\n\
         Zoe,Rome\n",
    );
    let keyscan = Keyscan::with_config(KeyscanConfig {
        dedup: DedupConfig {
            window: 3,
            threshold: Some(0.8),
        },
        ..Default::default()
    });

    let report = keyscan
        .find_duplicates(file.path(), &[0, 1])
        .expect("Duplicate detection failed");

    assert_eq!(report.row_count, 5);
    assert_eq!(report.clusters, vec![vec![0, 2], vec![1, 3]]);
    assert!(report.duplicates.iter().all(|d| d.left < d.right));
}

#[test]
fn test_find_duplicates_rejects_unknown_key() {
    let file = create_test_file("name,city\nAda,Rome\n");

    let result = Keyscan::new().find_duplicates(file.path(), &[4]);
    assert!(matches!(
        result,
        Err(KeyscanError::AttributeOutOfRange { index: 4, count: 2 })
    ));
}
