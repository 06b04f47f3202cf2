//! JSON snapshot format: `{ "value": .., "left": .. | null, "right": .. | null }`.
//!
//! Layout coordinates are not part of the format; callers recompute them
//! after loading. Nesting depth is unbounded: parsing runs without serde_json's
//! recursion limit and each nested child may continue on a fresh stack segment.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{NodeId, NodeValue, Side};
use crate::domain::tree::BinaryTree;

/// Remaining stack below which a nested child moves to a new segment.
const RED_ZONE: usize = 64 * 1024;
const STACK_SEGMENT: usize = 1024 * 1024;

const FIELDS: &[&str] = &["value", "left", "right"];

/// Serializable mirror of one node and its subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSnapshot {
    pub value: NodeValue,
    pub left: Option<Box<NodeSnapshot>>,
    pub right: Option<Box<NodeSnapshot>>,
}

impl NodeSnapshot {
    pub fn leaf(value: impl Into<NodeValue>) -> Self {
        Self {
            value: value.into(),
            left: None,
            right: None,
        }
    }
}

// Unlinks descendants onto a heap stack so long chains do not drop recursively.
impl Drop for NodeSnapshot {
    fn drop(&mut self) {
        let mut pending: Vec<Box<NodeSnapshot>> = Vec::new();
        pending.extend(self.left.take());
        pending.extend(self.right.take());
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl Serialize for NodeSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("NodeSnapshot", FIELDS.len())?;
        node.serialize_field("value", &self.value)?;
        stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || {
            node.serialize_field("left", &self.left)?;
            node.serialize_field("right", &self.right)
        })?;
        node.end()
    }
}

impl<'de> Deserialize<'de> for NodeSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_struct("NodeSnapshot", FIELDS, NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = NodeSnapshot;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a tree node object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<NodeSnapshot, A::Error> {
        let mut value: Option<NodeValue> = None;
        let mut left: Option<Option<Box<NodeSnapshot>>> = None;
        let mut right: Option<Option<Box<NodeSnapshot>>> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "value" if value.is_some() => return Err(de::Error::duplicate_field("value")),
                "left" if left.is_some() => return Err(de::Error::duplicate_field("left")),
                "right" if right.is_some() => return Err(de::Error::duplicate_field("right")),
                "value" => value = Some(map.next_value()?),
                "left" => left = Some(next_child(&mut map)?),
                "right" => right = Some(next_child(&mut map)?),
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(NodeSnapshot {
            value: value.ok_or_else(|| de::Error::missing_field("value"))?,
            left: left.flatten(),
            right: right.flatten(),
        })
    }
}

fn next_child<'de, A: MapAccess<'de>>(map: &mut A) -> Result<Option<Box<NodeSnapshot>>, A::Error> {
    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || map.next_value())
}

fn snapshot_err(e: serde_json::Error) -> DomainError {
    DomainError::Snapshot(e.to_string())
}

impl BinaryTree {
    /// Snapshot of the whole tree, `None` when empty.
    pub fn to_snapshot(&self) -> Option<NodeSnapshot> {
        // post-order leaves a node's finished children on top of the stack
        let mut built: Vec<NodeSnapshot> = Vec::new();
        for id in self.postorder_nodes() {
            let Some(node) = self.node(id) else {
                continue;
            };
            let right = node.right.and_then(|_| built.pop()).map(Box::new);
            let left = node.left.and_then(|_| built.pop()).map(Box::new);
            built.push(NodeSnapshot {
                value: node.value.clone(),
                left,
                right,
            });
        }
        built.pop()
    }

    /// Rebuilds a tree from a snapshot. Coordinates are laid out with the
    /// default (simplified) layout.
    pub fn from_snapshot(snapshot: Option<&NodeSnapshot>) -> BinaryTree {
        let mut tree = BinaryTree::new();
        let Some(snap) = snapshot else {
            return tree;
        };
        if let Ok(root) = tree.set_root(snap.value.clone()) {
            let mut pending: Vec<(NodeId, &NodeSnapshot)> = vec![(root, snap)];
            while let Some((parent, snap)) = pending.pop() {
                for (side, child) in [(Side::Left, &snap.left), (Side::Right, &snap.right)] {
                    if let Some(child) = child {
                        if let Ok(id) = tree.add_child(parent, side, child.value.clone()) {
                            pending.push((id, child.as_ref()));
                        }
                    }
                }
            }
        }
        tree.calculate_positions(true);
        tree
    }

    /// Pretty-printed JSON; an empty tree serializes as `null`.
    #[instrument(level = "debug", skip(self))]
    pub fn to_json(&self) -> DomainResult<String> {
        serde_json::to_string_pretty(&self.to_snapshot()).map_err(snapshot_err)
    }

    /// Parses a snapshot document. The parser message is kept on failure.
    #[instrument(level = "debug", skip(json))]
    pub fn from_json(json: &str) -> DomainResult<BinaryTree> {
        let mut de = serde_json::Deserializer::from_str(json);
        de.disable_recursion_limit();
        let snapshot = Option::<NodeSnapshot>::deserialize(&mut de).map_err(snapshot_err)?;
        de.end().map_err(snapshot_err)?;
        let tree = BinaryTree::from_snapshot(snapshot.as_ref());
        debug!(nodes = tree.len(), "loaded tree from snapshot");
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_tree_when_serializing_then_uses_null_for_missing_children() {
        let mut tree = BinaryTree::new();
        tree.create_bst([2i64, 1]);
        let json = serde_json::to_value(tree.to_snapshot()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "value": 2,
                "left": { "value": 1, "left": null, "right": null },
                "right": null
            })
        );
    }

    #[test]
    fn given_empty_tree_when_serializing_then_null() {
        let tree = BinaryTree::new();
        assert_eq!(tree.to_json().unwrap(), "null");
        assert!(BinaryTree::from_json("null").unwrap().is_empty());
    }

    #[test]
    fn given_absent_child_keys_when_parsing_then_treated_as_null() {
        let tree = BinaryTree::from_json(r#"{"value":"A","right":{"value":"B"}}"#).unwrap();
        assert_eq!(tree.len(), 2);
        let root = tree.node(tree.root().unwrap()).unwrap();
        assert!(root.left.is_none());
        assert!(root.right.is_some());
    }

    #[test]
    fn given_malformed_json_when_parsing_then_reports_parser_message() {
        let err = BinaryTree::from_json("{\"value\": ").unwrap_err();
        match err {
            DomainError::Snapshot(msg) => assert!(msg.contains("EOF")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn given_duplicate_key_when_parsing_then_snapshot_error() {
        let err = BinaryTree::from_json(r#"{"value":1,"value":2}"#).unwrap_err();
        assert!(matches!(err, DomainError::Snapshot(ref m) if m.contains("duplicate field")));
    }

    #[test]
    fn given_chain_deeper_than_parser_default_when_round_tripping_then_restored() {
        let mut tree = BinaryTree::new();
        tree.create_bst(1i64..=200);

        let restored = BinaryTree::from_json(&tree.to_json().unwrap()).unwrap();

        assert_eq!(restored.depth(), 200);
        assert_eq!(restored, tree);
    }
}
