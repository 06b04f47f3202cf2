//! Integration tests for build-mode session persistence on disk.

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use treeviz::application::services::{BuildSession, BUILD_TREE_KEY, SIMPLIFY_KEY};
use treeviz::domain::{BinaryTree, Side};
use treeviz::infrastructure::session::FileSessionStore;
use treeviz::infrastructure::traits::{RealFileSystem, SessionStore};

fn file_session(dir: &TempDir) -> (BuildSession, Arc<FileSessionStore>) {
    let store = Arc::new(FileSessionStore::new(
        Arc::new(RealFileSystem),
        dir.path().join("state/session.json"),
    ));
    (BuildSession::new(store.clone()), store)
}

fn built_tree() -> BinaryTree {
    let mut tree = BinaryTree::new();
    let root = tree.set_root("Root".into()).expect("root");
    tree.add_child(root, Side::Right, "R".into()).expect("child");
    tree
}

#[test]
fn given_built_tree_when_saved_then_restored_after_reopen() {
    // Arrange
    let dir = TempDir::new().expect("tempdir");
    let (session, _) = file_session(&dir);
    let tree = built_tree();

    // Act
    session.save(&tree, false).expect("save");
    let (reopened, _) = file_session(&dir);
    let (restored, simplify) = reopened.restore();

    // Assert
    assert_eq!(restored, tree);
    assert_eq!(simplify, Some(false));
}

#[test]
fn given_saved_tree_when_saving_empty_then_tree_key_removed_and_flag_kept() {
    let dir = TempDir::new().expect("tempdir");
    let (session, store) = file_session(&dir);
    session.save(&built_tree(), true).expect("save");

    session.save(&BinaryTree::new(), true).expect("save empty");

    assert_eq!(store.get(BUILD_TREE_KEY).expect("get"), None);
    assert_eq!(store.get(SIMPLIFY_KEY).expect("get").as_deref(), Some("true"));
    assert!(session.load_tree().expect("load").is_none());
}

#[test]
fn given_no_session_file_when_restoring_then_empty_tree_and_no_flag() {
    let dir = TempDir::new().expect("tempdir");
    let (session, store) = file_session(&dir);

    let (tree, simplify) = session.restore();

    assert!(tree.is_empty());
    assert_eq!(simplify, None);
    assert!(!store.path().exists());
}

#[test]
fn given_corrupt_tree_entry_when_restoring_then_falls_back_to_empty() {
    // Arrange
    let dir = TempDir::new().expect("tempdir");
    let (session, store) = file_session(&dir);
    store.set(BUILD_TREE_KEY, "{ broken").expect("set");
    store.set(SIMPLIFY_KEY, "false").expect("set");

    // Act
    let (tree, simplify) = session.restore();

    // Assert
    assert!(tree.is_empty());
    assert_eq!(simplify, Some(false));
    assert!(session.load_tree().is_err());
}

#[test]
fn given_session_file_when_inspected_then_flat_json_object() {
    let dir = TempDir::new().expect("tempdir");
    let (session, store) = file_session(&dir);
    session.save(&built_tree(), true).expect("save");

    let raw = fs::read_to_string(store.path()).expect("read");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("json");

    assert!(parsed[BUILD_TREE_KEY].is_string());
    assert_eq!(parsed[SIMPLIFY_KEY], "true");
}
