//! Property-based invariant tests for the tree engine.
//!
//! 1. Inserting any values yields a valid BST whose in-order walk is the sorted unique set.
//! 2. Re-inserting an existing value leaves the tree unchanged.
//! 3. Deleting a present value keeps the BST valid and removes exactly that value.
//! 4. Deleting an absent value leaves the tree unchanged.
//! 5. JSON snapshots round-trip shape and values.
//! 6. Random general trees respect the requested node count and depth.
//! 7. Chains deeper than the JSON parser's default nesting limit still round-trip.

use std::collections::BTreeSet;

use proptest::prelude::*;
use treeviz::domain::{BinaryTree, NodeValue, TraversalKind};
use treeviz::util::testing::seeded_rng;

fn bst_values() -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::vec(-50i64..=150, 0..=40)
}

fn bst_of(values: &[i64]) -> BinaryTree {
    let mut tree = BinaryTree::new();
    tree.create_bst(values.iter().copied());
    tree
}

fn shape(tree: &BinaryTree) -> (Vec<NodeValue>, Vec<NodeValue>) {
    (tree.preorder(), tree.inorder())
}

proptest! {
    #[test]
    fn inorder_is_sorted_unique_input(values in bst_values()) {
        let tree = bst_of(&values);

        let expected: Vec<NodeValue> = values
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(NodeValue::from)
            .collect();
        prop_assert!(tree.is_valid_bst());
        prop_assert_eq!(tree.inorder(), expected);
        prop_assert_eq!(tree.len(), tree.inorder().len());
    }

    #[test]
    fn duplicate_insert_is_a_no_op(values in bst_values(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!values.is_empty());
        let mut tree = bst_of(&values);
        let before = shape(&tree);

        let inserted = tree.insert(NodeValue::from(*pick.get(&values)));

        prop_assert!(!inserted);
        prop_assert_eq!(shape(&tree), before);
    }

    #[test]
    fn delete_present_keeps_bst(values in bst_values(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!values.is_empty());
        let mut tree = bst_of(&values);
        let target = NodeValue::from(*pick.get(&values));
        let len = tree.len();

        let deleted = tree.delete(&target);

        prop_assert!(deleted);
        prop_assert!(tree.is_valid_bst());
        prop_assert!(!tree.contains(&target));
        prop_assert_eq!(tree.len(), len - 1);
        prop_assert_eq!(tree.inorder().len(), len - 1);
    }

    #[test]
    fn delete_absent_is_a_no_op(values in bst_values(), absent in 200i64..=300) {
        let mut tree = bst_of(&values);
        let before = shape(&tree);

        let deleted = tree.delete(&NodeValue::from(absent));

        prop_assert!(!deleted);
        prop_assert_eq!(shape(&tree), before);
    }

    #[test]
    fn bst_snapshot_round_trips(values in bst_values()) {
        let tree = bst_of(&values);

        let json = tree.to_json().expect("serialize");
        let restored = BinaryTree::from_json(&json).expect("parse");

        prop_assert_eq!(shape(&restored), shape(&tree));
        prop_assert_eq!(restored.to_json().expect("serialize again"), json);
    }

    #[test]
    fn random_tree_respects_bounds(depth in 0usize..=6, nodes in 0usize..=26, seed in any::<u64>()) {
        let mut rng = seeded_rng(seed);
        let mut tree = BinaryTree::new();

        tree.generate_random_tree(depth, nodes, &mut rng).expect("within limits");

        prop_assert!(tree.len() <= nodes);
        prop_assert!(tree.depth() <= depth);
        prop_assert_eq!(tree.is_empty(), depth == 0 || nodes == 0);
        prop_assert_eq!(tree.traversal_order(TraversalKind::LevelOrder).len(), tree.len());
    }

    #[test]
    fn random_tree_snapshot_round_trips(depth in 1usize..=5, nodes in 1usize..=26, seed in any::<u64>()) {
        let mut rng = seeded_rng(seed);
        let mut tree = BinaryTree::new();
        tree.generate_random_tree(depth, nodes, &mut rng).expect("within limits");

        let restored = BinaryTree::from_json(&tree.to_json().expect("serialize")).expect("parse");

        prop_assert_eq!(shape(&restored), shape(&tree));
        prop_assert_eq!(restored.depth(), tree.depth());
    }

    #[test]
    fn deep_chain_snapshot_round_trips(len in 129i64..=400, descending in any::<bool>()) {
        let mut tree = BinaryTree::new();
        if descending {
            tree.create_bst((1..=len).rev());
        } else {
            tree.create_bst(1..=len);
        }

        let json = tree.to_json().expect("serialize");
        let restored = BinaryTree::from_json(&json).expect("parse");

        prop_assert_eq!(restored.depth(), len as usize);
        prop_assert_eq!(shape(&restored), shape(&tree));
    }
}
