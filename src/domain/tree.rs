//! Arena-backed binary tree engine.
//!
//! Owns the node graph and implements random generation, BST insert/delete,
//! manual build-mode edits, traversals and cloning. Child links are arena
//! handles; there are no parent back-references. Operations that need a
//! parent either pass it down the recursion or recompute it by walking
//! from the root.

use std::collections::VecDeque;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use generational_arena::Arena;
use rand::seq::{index, SliceRandom};
use rand::Rng;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{Node, NodeId, NodeValue, Side};

/// Labels used by the random general-tree generator, drawn without repetition.
pub const LABEL_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Upper bound for [`BinaryTree::generate_random_tree`]; one label per node.
pub const MAX_GENERATED_NODES: usize = 26;

/// Values drawn by [`BinaryTree::generate_random_bst`].
pub const BST_VALUE_RANGE: RangeInclusive<i64> = 1..=100;

/// Default size range of a random BST.
pub const RANDOM_BST_SIZE: RangeInclusive<usize> = 8..=12;

/// The four supported traversal orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalKind {
    Preorder,
    Inorder,
    Postorder,
    LevelOrder,
}

impl TraversalKind {
    pub const ALL: [TraversalKind; 4] = [
        TraversalKind::Preorder,
        TraversalKind::Inorder,
        TraversalKind::Postorder,
        TraversalKind::LevelOrder,
    ];

    /// Human readable title.
    pub fn title(self) -> &'static str {
        match self {
            TraversalKind::Preorder => "Preorder",
            TraversalKind::Inorder => "Inorder",
            TraversalKind::Postorder => "Postorder",
            TraversalKind::LevelOrder => "Level Order",
        }
    }
}

impl fmt::Display for TraversalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalKind::Preorder => "preorder",
            TraversalKind::Inorder => "inorder",
            TraversalKind::Postorder => "postorder",
            TraversalKind::LevelOrder => "levelorder",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for TraversalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "preorder" | "pre" => Ok(TraversalKind::Preorder),
            "inorder" | "in" => Ok(TraversalKind::Inorder),
            "postorder" | "post" => Ok(TraversalKind::Postorder),
            "levelorder" | "level" | "bfs" => Ok(TraversalKind::LevelOrder),
            _ => Err(format!(
                "unknown traversal '{}', expected preorder, inorder, postorder or levelorder",
                s
            )),
        }
    }
}

/// Maximum number of nodes of a binary tree with `depth` levels: `2^depth - 1`.
pub fn max_nodes(depth: u32) -> u64 {
    1u64.checked_shl(depth).map_or(u64::MAX, |n| n - 1)
}

/// Arena-based binary tree.
///
/// The arena doubles as the flat node registry: every live entry is
/// reachable from `root`, and removing a subtree frees its entries.
#[derive(Debug)]
pub struct BinaryTree {
    arena: Arena<Node>,
    root: Option<NodeId>,
}

impl Default for BinaryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id.0)
    }

    pub fn value(&self, id: NodeId) -> Option<&NodeValue> {
        self.node(id).map(|n| &n.value)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.arena.get_mut(id.0)
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    fn alloc(&mut self, value: NodeValue) -> NodeId {
        NodeId(self.arena.insert(Node::new(value)))
    }

    /// Pre-order iterator over `(id, node)` pairs starting at the root.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, self.root)
    }

    /// Pre-order iterator over the subtree rooted at `id`.
    pub fn iter_from(&self, id: NodeId) -> TreeIterator<'_> {
        TreeIterator::new(self, Some(id))
    }

    // ------------------------------------------------------------------
    // Generation
    // ------------------------------------------------------------------

    /// Replaces the tree with a random general binary tree (not a BST).
    ///
    /// At most `node_count` nodes, no node deeper than `max_depth` levels
    /// (root level counts as 1). Stops early when no node can take another
    /// child, so sparse trees are expected.
    #[instrument(level = "debug", skip(self, rng))]
    pub fn generate_random_tree<R: Rng + ?Sized>(
        &mut self,
        max_depth: usize,
        node_count: usize,
        rng: &mut R,
    ) -> DomainResult<()> {
        if node_count > MAX_GENERATED_NODES {
            return Err(DomainError::TooManyNodes {
                requested: node_count,
                max: MAX_GENERATED_NODES,
            });
        }
        self.clear();
        if node_count == 0 || max_depth == 0 {
            return Ok(());
        }

        let mut labels: Vec<char> = LABEL_ALPHABET.chars().collect();
        labels.shuffle(rng);

        let root = self.alloc(NodeValue::from(labels[0]));
        self.root = Some(root);

        // Nodes that may still receive a child, with their level (root = 1)
        let mut frontier: Vec<(NodeId, usize)> = Vec::new();
        if 1 < max_depth {
            frontier.push((root, 1));
        }

        for &label in &labels[1..node_count] {
            if frontier.is_empty() {
                debug!(nodes = self.len(), "frontier exhausted before node count reached");
                break;
            }
            let pick = rng.random_range(0..frontier.len());
            let (parent, depth) = frontier[pick];

            let parent_node = &self.arena[parent.0];
            let side = if parent_node.is_leaf() {
                if rng.random_bool(0.5) {
                    Side::Left
                } else {
                    Side::Right
                }
            } else if parent_node.left.is_none() {
                Side::Left
            } else {
                Side::Right
            };

            let child = self.alloc(NodeValue::from(label));
            self.arena[parent.0].set_child(side, Some(child));

            if depth + 1 < max_depth {
                frontier.push((child, depth + 1));
            }
            let parent_node = &self.arena[parent.0];
            if parent_node.left.is_some() && parent_node.right.is_some() {
                frontier.remove(pick);
            }
        }

        debug!(nodes = self.len(), depth = self.depth(), "generated random tree");
        Ok(())
    }

    /// Clears the tree and inserts `values` in order. Duplicates are skipped.
    #[instrument(level = "debug", skip(self, values))]
    pub fn create_bst<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<NodeValue>,
    {
        self.clear();
        for value in values {
            self.insert(value.into());
        }
    }

    /// Builds a BST from `count` unique random integers in [1, 100].
    ///
    /// `None` picks a size in 8..=12. Returns the values in insertion order.
    #[instrument(level = "debug", skip(self, rng))]
    pub fn generate_random_bst<R: Rng + ?Sized>(
        &mut self,
        count: Option<usize>,
        rng: &mut R,
    ) -> DomainResult<Vec<i64>> {
        let span = (BST_VALUE_RANGE.end() - BST_VALUE_RANGE.start() + 1) as usize;
        let count = count.unwrap_or_else(|| rng.random_range(RANDOM_BST_SIZE));
        if count > span {
            return Err(DomainError::TooManyNodes {
                requested: count,
                max: span,
            });
        }
        let values: Vec<i64> = index::sample(rng, span, count)
            .into_iter()
            .map(|i| BST_VALUE_RANGE.start() + i as i64)
            .collect();
        self.create_bst(values.iter().copied());
        Ok(values)
    }

    // ------------------------------------------------------------------
    // BST operations
    // ------------------------------------------------------------------

    /// Inserts `value` by BST descent. Returns `false` (tree untouched) if
    /// the value already exists.
    #[instrument(level = "debug", skip(self))]
    pub fn insert(&mut self, value: NodeValue) -> bool {
        match self.root {
            None => {
                let id = self.alloc(value);
                self.root = Some(id);
                true
            }
            Some(root) => {
                let inserted = self.insert_below(root, value);
                if !inserted {
                    debug!("duplicate value rejected");
                }
                inserted
            }
        }
    }

    fn insert_below(&mut self, mut current: NodeId, value: NodeValue) -> bool {
        loop {
            let node = &self.arena[current.0];
            let side = if value < node.value {
                Side::Left
            } else if value > node.value {
                Side::Right
            } else {
                return false;
            };
            match node.child(side) {
                Some(child) => current = child,
                None => {
                    let id = self.alloc(value);
                    self.arena[current.0].set_child(side, Some(id));
                    return true;
                }
            }
        }
    }

    /// BST lookup.
    pub fn find(&self, value: &NodeValue) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.arena[id.0];
            if *value == node.value {
                return Some(id);
            }
            current = if *value < node.value {
                node.left
            } else {
                node.right
            };
        }
        None
    }

    pub fn contains(&self, value: &NodeValue) -> bool {
        self.find(value).is_some()
    }

    /// Deletes `value` from a BST. Returns `false` (tree untouched) if absent.
    ///
    /// A node with two children keeps its place: it takes the value of its
    /// in-order successor, and the successor is then deleted from the right
    /// subtree. The successor has no left child, so that second delete is
    /// always a leaf or single-child splice.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, value: &NodeValue) -> bool {
        let Some((target, parent)) = self.locate(value) else {
            return false;
        };
        let node = &self.arena[target.0];
        match (node.left, node.right) {
            (Some(_), Some(right)) => {
                let mut successor_slot = (target, Side::Right);
                let mut successor = right;
                while let Some(left) = self.arena[successor.0].left {
                    successor_slot = (successor, Side::Left);
                    successor = left;
                }
                let successor_value = self.arena[successor.0].value.clone();
                let successor_right = self.arena[successor.0].right;
                self.arena[target.0].value = successor_value;
                self.replace_in_parent(Some(successor_slot), successor_right);
                self.arena.remove(successor.0);
            }
            (left, right) => {
                self.replace_in_parent(parent, left.or(right));
                self.arena.remove(target.0);
            }
        }
        debug!(remaining = self.len(), "deleted value");
        true
    }

    /// BST descent to `value`, with the slot that points at it.
    fn locate(&self, value: &NodeValue) -> Option<(NodeId, Option<(NodeId, Side)>)> {
        let mut parent = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.arena[id.0];
            let side = if *value < node.value {
                Side::Left
            } else if *value > node.value {
                Side::Right
            } else {
                return Some((id, parent));
            };
            parent = Some((id, side));
            current = node.child(side);
        }
        None
    }

    fn replace_in_parent(&mut self, parent: Option<(NodeId, Side)>, child: Option<NodeId>) {
        match parent {
            None => self.root = child,
            Some((p, side)) => self.arena[p.0].set_child(side, child),
        }
    }

    /// Strict BST invariant: in-order values strictly increasing.
    pub fn is_valid_bst(&self) -> bool {
        self.inorder().windows(2).all(|w| w[0] < w[1])
    }

    // ------------------------------------------------------------------
    // Manual edits (build mode)
    // ------------------------------------------------------------------

    pub fn set_root(&mut self, value: NodeValue) -> DomainResult<NodeId> {
        if self.root.is_some() {
            return Err(DomainError::RootExists);
        }
        let id = self.alloc(value);
        self.root = Some(id);
        Ok(id)
    }

    /// Attaches a new leaf in the empty `side` slot of `parent`.
    #[instrument(level = "debug", skip(self))]
    pub fn add_child(
        &mut self,
        parent: NodeId,
        side: Side,
        value: NodeValue,
    ) -> DomainResult<NodeId> {
        let node = self.node(parent).ok_or(DomainError::UnknownNode)?;
        if node.child(side).is_some() {
            return Err(DomainError::SlotOccupied { side });
        }
        let id = self.alloc(value);
        self.arena[parent.0].set_child(side, Some(id));
        Ok(id)
    }

    pub fn rename(&mut self, id: NodeId, value: NodeValue) -> DomainResult<()> {
        let node = self.node_mut(id).ok_or(DomainError::UnknownNode)?;
        node.value = value;
        Ok(())
    }

    /// Finds the parent of `id` and the slot it occupies by walking from the root.
    pub fn parent_of(&self, id: NodeId) -> Option<(NodeId, Side)> {
        self.iter().find_map(|(pid, node)| {
            if node.left == Some(id) {
                Some((pid, Side::Left))
            } else if node.right == Some(id) {
                Some((pid, Side::Right))
            } else {
                None
            }
        })
    }

    /// Detaches `id` and frees it together with its whole subtree.
    /// Returns the number of removed nodes.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_subtree(&mut self, id: NodeId) -> DomainResult<usize> {
        if !self.arena.contains(id.0) {
            return Err(DomainError::UnknownNode);
        }
        let parent = self.parent_of(id);
        if parent.is_none() && self.root != Some(id) {
            return Err(DomainError::UnknownNode);
        }
        let doomed: Vec<NodeId> = self.iter_from(id).map(|(nid, _)| nid).collect();
        self.replace_in_parent(parent, None);
        for nid in &doomed {
            self.arena.remove(nid.0);
        }
        Ok(doomed.len())
    }

    // ------------------------------------------------------------------
    // Traversals
    // ------------------------------------------------------------------

    pub fn preorder(&self) -> Vec<NodeValue> {
        self.values_of(&self.preorder_nodes())
    }

    pub fn inorder(&self) -> Vec<NodeValue> {
        self.values_of(&self.inorder_nodes())
    }

    pub fn postorder(&self) -> Vec<NodeValue> {
        self.values_of(&self.postorder_nodes())
    }

    pub fn levelorder(&self) -> Vec<NodeValue> {
        self.values_of(&self.levelorder_nodes())
    }

    pub fn preorder_nodes(&self) -> Vec<NodeId> {
        self.iter().map(|(id, _)| id).collect()
    }

    pub fn inorder_nodes(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.len());
        let mut stack: Vec<NodeId> = Vec::new();
        let mut current = self.root;
        loop {
            while let Some(id) = current {
                stack.push(id);
                current = self.arena[id.0].left;
            }
            let Some(id) = stack.pop() else {
                break;
            };
            order.push(id);
            current = self.arena[id.0].right;
        }
        order
    }

    /// Reverse of a (node, right, left) walk.
    pub fn postorder_nodes(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = &self.arena[id.0];
            order.push(id);
            stack.extend(node.left);
            stack.extend(node.right);
        }
        order.reverse();
        order
    }

    /// Breadth-first, FIFO from the root.
    pub fn levelorder_nodes(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.len());
        let mut queue: VecDeque<NodeId> = self.root.into_iter().collect();
        while let Some(id) = queue.pop_front() {
            let node = &self.arena[id.0];
            order.push(id);
            queue.extend(node.left);
            queue.extend(node.right);
        }
        order
    }

    /// Node references in `kind` order, for the step animator.
    #[instrument(level = "debug", skip(self))]
    pub fn traversal_order(&self, kind: TraversalKind) -> Vec<NodeId> {
        match kind {
            TraversalKind::Preorder => self.preorder_nodes(),
            TraversalKind::Inorder => self.inorder_nodes(),
            TraversalKind::Postorder => self.postorder_nodes(),
            TraversalKind::LevelOrder => self.levelorder_nodes(),
        }
    }

    pub fn traversal_values(&self, kind: TraversalKind) -> Vec<NodeValue> {
        self.values_of(&self.traversal_order(kind))
    }

    fn values_of(&self, ids: &[NodeId]) -> Vec<NodeValue> {
        ids.iter()
            .map(|id| self.arena[id.0].value.clone())
            .collect()
    }

    // ------------------------------------------------------------------
    // Shape
    // ------------------------------------------------------------------

    /// Number of levels: 0 for an empty tree, 1 for a lone root.
    pub fn depth(&self) -> usize {
        self.depth_of(self.root)
    }

    pub fn depth_of(&self, node: Option<NodeId>) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(NodeId, usize)> = node
            .filter(|id| self.arena.contains(id.0))
            .map(|id| (id, 1))
            .into_iter()
            .collect();
        while let Some((id, level)) = stack.pop() {
            deepest = deepest.max(level);
            let node = &self.arena[id.0];
            stack.extend(node.left.map(|c| (c, level + 1)));
            stack.extend(node.right.map(|c| (c, level + 1)));
        }
        deepest
    }

    /// Deep copy of values and shape into a fresh arena.
    ///
    /// Handles of the copy are unrelated to the original's. Layout is
    /// recomputed rather than copied.
    pub fn deep_clone(&self) -> BinaryTree {
        let mut copy = BinaryTree::new();
        if let Some(root) = self.root {
            let copy_root = copy.alloc(self.arena[root.0].value.clone());
            copy.root = Some(copy_root);
            let mut pending = vec![(root, copy_root)];
            while let Some((source, target)) = pending.pop() {
                let node = &self.arena[source.0];
                for side in [Side::Left, Side::Right] {
                    if let Some(child) = node.child(side) {
                        let id = copy.alloc(self.arena[child.0].value.clone());
                        copy.arena[target.0].set_child(side, Some(id));
                        pending.push((child, id));
                    }
                }
            }
        }
        copy.calculate_positions(true);
        copy
    }
}

/// Structural equality: same shape and values. Handles and layout
/// coordinates are ignored.
impl PartialEq for BinaryTree {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self.root, other.root)];
        while let Some((a, b)) = pending.pop() {
            match (a.map(|id| &self.arena[id.0]), b.map(|id| &other.arena[id.0])) {
                (None, None) => {}
                (Some(x), Some(y)) if x.value == y.value => {
                    pending.push((x.left, y.left));
                    pending.push((x.right, y.right));
                }
                _ => return false,
            }
        }
        true
    }
}

/// Pre-order (node, left, right) walk without recursion.
pub struct TreeIterator<'a> {
    tree: &'a BinaryTree,
    stack: Vec<NodeId>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a BinaryTree, start: Option<NodeId>) -> Self {
        Self {
            tree,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.node(current) {
                // Right first so left pops first
                self.stack.extend(node.right);
                self.stack.extend(node.left);
                return Some((current, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn labels(values: &[NodeValue]) -> String {
        values.iter().map(|v| v.to_string()).collect()
    }

    //      A
    //     / \
    //    B   C
    //     \
    //      D
    fn sample() -> (BinaryTree, [NodeId; 4]) {
        let mut tree = BinaryTree::new();
        let a = tree.set_root("A".into()).unwrap();
        let b = tree.add_child(a, Side::Left, "B".into()).unwrap();
        let c = tree.add_child(a, Side::Right, "C".into()).unwrap();
        let d = tree.add_child(b, Side::Right, "D".into()).unwrap();
        (tree, [a, b, c, d])
    }

    #[test]
    fn given_tree_when_traversing_then_orders_match_definitions() {
        let (tree, _) = sample();
        assert_eq!(labels(&tree.preorder()), "ABDC");
        assert_eq!(labels(&tree.inorder()), "BDAC");
        assert_eq!(labels(&tree.postorder()), "DBCA");
        assert_eq!(labels(&tree.levelorder()), "ABCD");
    }

    #[test]
    fn given_tree_when_iterating_then_yields_preorder() {
        let (tree, ids) = sample();
        let walked: Vec<NodeId> = tree.iter().map(|(id, _)| id).collect();
        assert_eq!(walked, vec![ids[0], ids[1], ids[3], ids[2]]);
        assert_eq!(walked, tree.preorder_nodes());
    }

    #[test]
    fn given_child_when_looking_up_parent_then_recomputes_slot() {
        let (tree, [a, b, _, d]) = sample();
        assert_eq!(tree.parent_of(d), Some((b, Side::Right)));
        assert_eq!(tree.parent_of(b), Some((a, Side::Left)));
        assert_eq!(tree.parent_of(a), None);
    }

    #[test]
    fn given_subtree_when_removing_then_frees_all_descendants() {
        let (mut tree, [a, b, c, d]) = sample();
        assert_eq!(tree.remove_subtree(b).unwrap(), 2);
        assert_eq!(tree.len(), 2);
        assert!(tree.node(d).is_none());
        assert_eq!(tree.node(a).unwrap().left, None);
        assert_eq!(tree.node(a).unwrap().right, Some(c));
        // stale handle is rejected
        assert_eq!(tree.remove_subtree(b), Err(DomainError::UnknownNode));
    }

    #[test]
    fn given_occupied_slot_when_adding_child_then_rejects() {
        let (mut tree, [a, ..]) = sample();
        let result = tree.add_child(a, Side::Left, "X".into());
        assert_eq!(result, Err(DomainError::SlotOccupied { side: Side::Left }));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn given_existing_root_when_setting_root_then_rejects() {
        let (mut tree, _) = sample();
        assert_eq!(tree.set_root("Z".into()), Err(DomainError::RootExists));
    }

    #[test]
    fn given_max_depth_one_when_generating_then_only_root() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut tree = BinaryTree::new();
        tree.generate_random_tree(1, 10, &mut rng).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn given_more_than_alphabet_when_generating_then_rejects() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut tree = BinaryTree::new();
        let result = tree.generate_random_tree(6, 27, &mut rng);
        assert_eq!(
            result,
            Err(DomainError::TooManyNodes {
                requested: 27,
                max: MAX_GENERATED_NODES
            })
        );
    }

    #[test]
    fn given_full_budget_when_generating_then_labels_are_unique() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut tree = BinaryTree::new();
        tree.generate_random_tree(5, 20, &mut rng).unwrap();
        let mut values = tree.preorder();
        let count = values.len();
        values.sort();
        values.dedup();
        assert_eq!(values.len(), count);
        assert!(count <= 20);
        assert!(tree.depth() <= 5);
    }

    #[test]
    fn test_max_nodes() {
        assert_eq!(max_nodes(0), 0);
        assert_eq!(max_nodes(1), 1);
        assert_eq!(max_nodes(4), 15);
        assert_eq!(max_nodes(64), u64::MAX);
    }

    #[test]
    fn test_traversal_kind_parse() {
        assert_eq!("Level-Order".parse(), Ok(TraversalKind::LevelOrder));
        assert_eq!("in".parse(), Ok(TraversalKind::Inorder));
        assert!("sideways".parse::<TraversalKind>().is_err());
    }
}
