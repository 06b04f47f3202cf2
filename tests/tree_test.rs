//! Integration tests for the tree engine: BST operations, generation,
//! traversals and build-mode edits.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rstest::rstest;

use treeviz::domain::{max_nodes, BinaryTree, DomainError, NodeValue, Side, TraversalKind};
use treeviz::util::testing;

fn numbers(values: &[NodeValue]) -> Vec<i64> {
    values
        .iter()
        .map(|v| match v {
            NodeValue::Number(n) => *n,
            NodeValue::Label(l) => panic!("unexpected label {l}"),
        })
        .collect()
}

fn sample_bst() -> BinaryTree {
    testing::init_test_setup();
    let mut tree = BinaryTree::new();
    tree.create_bst([5i64, 3, 8, 1, 4, 7, 9]);
    tree
}

// ============================================================
// BST operations
// ============================================================

#[test]
fn given_sample_values_when_creating_bst_then_traversals_match() {
    let tree = sample_bst();

    assert_eq!(numbers(&tree.inorder()), [1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(numbers(&tree.preorder()), [5, 3, 1, 4, 8, 7, 9]);
    assert_eq!(numbers(&tree.postorder()), [1, 4, 3, 7, 9, 8, 5]);
    assert_eq!(numbers(&tree.levelorder()), [5, 3, 8, 1, 4, 7, 9]);
    assert!(tree.is_valid_bst());
}

#[test]
fn given_two_children_root_when_deleting_then_successor_takes_its_place() {
    // Arrange
    let mut tree = sample_bst();
    let root_before = tree.root();

    // Act
    let deleted = tree.delete(&NodeValue::Number(5));

    // Assert
    assert!(deleted);
    assert_eq!(tree.root(), root_before, "root node keeps its identity");
    assert_eq!(tree.value(tree.root().expect("root")), Some(&NodeValue::Number(7)));
    assert_eq!(numbers(&tree.inorder()), [1, 3, 4, 7, 8, 9]);
    assert!(!tree.contains(&NodeValue::Number(5)));
}

#[rstest]
#[case::leaf(1, vec![3, 4, 5, 7, 8, 9])]
#[case::inner(3, vec![1, 4, 5, 7, 8, 9])]
#[case::right_subtree_root(8, vec![1, 3, 4, 5, 7, 9])]
fn given_value_when_deleting_then_removed_and_still_bst(
    #[case] value: i64,
    #[case] expected: Vec<i64>,
) {
    let mut tree = sample_bst();

    assert!(tree.delete(&NodeValue::Number(value)));

    assert_eq!(numbers(&tree.inorder()), expected);
    assert!(tree.is_valid_bst());
    assert_eq!(tree.len(), 6);
}

#[test]
fn given_absent_value_when_deleting_then_tree_unchanged() {
    let mut tree = sample_bst();
    let before = tree.deep_clone();

    assert!(!tree.delete(&NodeValue::Number(6)));
    assert_eq!(tree, before);
}

#[test]
fn given_only_child_chain_when_deleting_root_then_child_becomes_root() {
    let mut tree = BinaryTree::new();
    tree.create_bst([1i64, 2, 3]);

    assert!(tree.delete(&NodeValue::Number(1)));

    assert_eq!(tree.value(tree.root().expect("root")), Some(&NodeValue::Number(2)));
    assert_eq!(numbers(&tree.preorder()), [2, 3]);
}

#[test]
fn given_existing_value_when_inserting_then_rejected_and_unchanged() {
    let mut tree = sample_bst();
    let before = tree.deep_clone();

    assert!(!tree.insert(NodeValue::Number(4)));
    assert_eq!(tree, before);
    assert!(tree.insert(NodeValue::Number(6)));
    assert_eq!(tree.len(), 8);
    assert!(tree.contains(&NodeValue::Number(6)));
}

#[test]
fn given_random_count_above_range_when_generating_bst_then_error() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut tree = BinaryTree::new();

    let result = tree.generate_random_bst(Some(101), &mut rng);

    assert!(matches!(result, Err(DomainError::TooManyNodes { .. })));
    assert!(tree.is_empty());
}

// ============================================================
// Random general trees
// ============================================================

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(3, 7)]
#[case(5, 31)]
#[case(10, 1023)]
fn given_depth_when_computing_max_nodes_then_two_pow_minus_one(
    #[case] depth: u32,
    #[case] expected: u64,
) {
    assert_eq!(max_nodes(depth), expected);
}

#[rstest]
#[case(1, 5)]
#[case(3, 7)]
#[case(4, 12)]
#[case(5, 26)]
fn given_bounds_when_generating_random_tree_then_respects_them(
    #[case] depth: usize,
    #[case] nodes: usize,
) {
    let mut rng = SmallRng::seed_from_u64(depth as u64 * 31 + nodes as u64);
    let mut tree = BinaryTree::new();

    tree.generate_random_tree(depth, nodes, &mut rng).expect("generate");

    assert!(tree.len() >= 1);
    assert!(tree.len() <= nodes);
    assert!(tree.depth() <= depth);
    // labels are unique letters
    let mut labels = tree.preorder();
    labels.sort();
    labels.dedup();
    assert_eq!(labels.len(), tree.len());
}

#[test]
fn given_more_than_alphabet_when_generating_then_too_many_nodes() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut tree = BinaryTree::new();

    let result = tree.generate_random_tree(6, 27, &mut rng);

    assert_eq!(
        result,
        Err(DomainError::TooManyNodes {
            requested: 27,
            max: 26
        })
    );
}

#[test]
fn given_zero_nodes_when_generating_then_empty_tree() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut tree = sample_bst();

    tree.generate_random_tree(3, 0, &mut rng).expect("generate");

    assert!(tree.is_empty());
    assert!(tree.preorder().is_empty());
}

// ============================================================
// Traversal orders
// ============================================================

#[rstest]
#[case(TraversalKind::Preorder)]
#[case(TraversalKind::Inorder)]
#[case(TraversalKind::Postorder)]
#[case(TraversalKind::LevelOrder)]
fn given_kind_when_ordering_nodes_then_values_agree(#[case] kind: TraversalKind) {
    let tree = sample_bst();

    let from_nodes: Vec<NodeValue> = tree
        .traversal_order(kind)
        .into_iter()
        .filter_map(|id| tree.value(id).cloned())
        .collect();

    assert_eq!(from_nodes, tree.traversal_values(kind));
    assert_eq!(from_nodes.len(), tree.len());
}

#[test]
fn given_empty_tree_when_traversing_then_empty_sequences() {
    let tree = BinaryTree::new();
    for kind in TraversalKind::ALL {
        assert!(tree.traversal_values(kind).is_empty());
    }
    assert_eq!(tree.depth(), 0);
}

// ============================================================
// Build-mode edits
// ============================================================

#[test]
fn given_root_when_adding_children_then_slots_fill_once() {
    // Arrange
    let mut tree = BinaryTree::new();
    let root = tree.set_root("A".into()).expect("root");

    // Act
    let left = tree.add_child(root, Side::Left, "B".into()).expect("left");
    let again = tree.add_child(root, Side::Left, "C".into());
    let second_root = tree.set_root("Z".into());

    // Assert
    assert_eq!(again, Err(DomainError::SlotOccupied { side: Side::Left }));
    assert_eq!(second_root, Err(DomainError::RootExists));
    assert_eq!(tree.parent_of(left), Some((root, Side::Left)));
    assert_eq!(tree.len(), 2);
}

#[test]
fn given_subtree_when_removing_then_all_descendants_freed() {
    let mut tree = BinaryTree::new();
    let root = tree.set_root("A".into()).expect("root");
    let b = tree.add_child(root, Side::Left, "B".into()).expect("b");
    tree.add_child(b, Side::Left, "C".into()).expect("c");
    tree.add_child(b, Side::Right, "D".into()).expect("d");
    tree.add_child(root, Side::Right, "E".into()).expect("e");

    let removed = tree.remove_subtree(b).expect("remove");

    assert_eq!(removed, 3);
    assert_eq!(tree.len(), 2);
    assert!(tree.node(b).is_none(), "stale handle does not resolve");
    assert_eq!(tree.remove_subtree(b), Err(DomainError::UnknownNode));
    let names: Vec<String> = tree.preorder().iter().map(ToString::to_string).collect();
    assert_eq!(names, ["A", "E"]);
}

#[test]
fn given_tree_when_renaming_then_value_replaced() {
    let mut tree = BinaryTree::new();
    let root = tree.set_root("A".into()).expect("root");

    tree.rename(root, "Root".into()).expect("rename");

    assert_eq!(tree.value(root), Some(&NodeValue::from("Root")));
}

// ============================================================
// Degenerate trees
// ============================================================

/// Sorted input builds a right-leaning chain as deep as the tree is long.
#[test]
fn given_sorted_chain_of_ten_thousand_when_editing_and_walking_then_no_stack_exhaustion() {
    // Arrange
    testing::init_test_setup();
    let mut tree = BinaryTree::new();
    tree.create_bst(1i64..=10_000);

    // Act
    let duplicate = tree.insert(NodeValue::from(10_000));
    let deleted_middle = tree.delete(&NodeValue::from(5_000));
    let deleted_tail = tree.delete(&NodeValue::from(10_000));
    let copy = tree.deep_clone();
    tree.calculate_positions(false);

    // Assert
    assert!(!duplicate);
    assert!(deleted_middle && deleted_tail);
    assert_eq!(tree.len(), 9_998);
    assert_eq!(tree.depth(), 9_998);
    assert!(tree.is_valid_bst());
    assert_eq!(tree.postorder().len(), 9_998);
    assert_eq!(tree.preorder().first(), Some(&NodeValue::from(1)));
    assert!(copy == tree);
}

