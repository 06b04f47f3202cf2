//! Integration tests for snapshot import/export through SnapshotService.

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use treeviz::application::services::SnapshotService;
use treeviz::application::ApplicationError;
use treeviz::domain::{BinaryTree, DomainError, NodeValue};
use treeviz::infrastructure::traits::RealFileSystem;

fn service() -> SnapshotService {
    SnapshotService::new(Arc::new(RealFileSystem))
}

#[test]
fn given_bst_when_exporting_and_importing_then_structure_and_values_equal() {
    // Arrange
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("nested/bst.json");
    let mut tree = BinaryTree::new();
    tree.create_bst([50i64, 20, 70, 10, 30, -5]);

    // Act
    service().export_json(&tree, &path).expect("export");
    let loaded = service().import_json(&path).expect("import");

    // Assert
    assert_eq!(loaded, tree);
    let content = fs::read_to_string(&path).expect("read");
    assert!(content.contains('\n'), "pretty printed");
    assert!(content.contains("\"value\": 50"));
}

#[test]
fn given_empty_tree_when_exporting_then_nothing_to_export() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("empty.json");

    let result = service().export_json(&BinaryTree::new(), &path);

    assert!(matches!(result, Err(ApplicationError::NothingToExport { .. })));
    assert!(!path.exists());
}

#[test]
fn given_null_document_when_importing_then_empty_tree() {
    let tree = BinaryTree::from_json("null").expect("parse");
    assert!(tree.is_empty());
    assert_eq!(BinaryTree::new().to_json().expect("json"), "null");
}

#[test]
fn given_mixed_values_when_importing_then_numbers_and_labels_kept() {
    let json = r#"{"value": 1, "left": {"value": "x"}, "right": null}"#;

    let tree = BinaryTree::from_json(json).expect("parse");

    assert_eq!(
        tree.preorder(),
        vec![NodeValue::Number(1), NodeValue::from("x")]
    );
}

#[rstest::rstest]
#[case::truncated(r#"{"value": 1, "left": "#)]
#[case::missing_value(r#"{"left": null}"#)]
#[case::float_value(r#"{"value": 1.5}"#)]
#[case::not_an_object("42")]
fn given_malformed_document_when_importing_then_snapshot_error(#[case] json: &str) {
    let result = BinaryTree::from_json(json);
    assert!(matches!(result, Err(DomainError::Snapshot(ref m)) if !m.is_empty()));
}

#[test]
fn given_missing_file_when_importing_then_operation_failed() {
    let dir = TempDir::new().expect("tempdir");

    let result = service().import_json(&dir.path().join("nope.json"));

    assert!(matches!(result, Err(ApplicationError::OperationFailed { .. })));
}

#[test]
fn given_svg_when_exporting_then_written_verbatim() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("tree.svg");

    service().export_svg("<svg/>", &path).expect("svg");

    assert_eq!(fs::read_to_string(&path).expect("read"), "<svg/>");
}
