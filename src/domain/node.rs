//! Binary tree nodes stored in the arena.

use std::cmp::Ordering;
use std::fmt;

use generational_arena::Index;
use serde::{Deserialize, Serialize};

/// Handle to a node inside a [`BinaryTree`](crate::domain::BinaryTree) arena.
///
/// Handles are stable across mutations of other nodes and are invalidated
/// when their node is removed, so a stale handle never aliases a new node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) Index);

/// Value carried by a node: integers in BST mode, short labels otherwise.
///
/// Serialized untagged, so the snapshot format holds either a JSON number or
/// a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeValue {
    Number(i64),
    Label(String),
}

impl NodeValue {
    /// Length of the display form, used for font sizing.
    pub fn display_len(&self) -> usize {
        match self {
            NodeValue::Number(n) => n.to_string().len(),
            NodeValue::Label(s) => s.chars().count(),
        }
    }
}

impl fmt::Display for NodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeValue::Number(n) => write!(f, "{}", n),
            NodeValue::Label(s) => write!(f, "{}", s),
        }
    }
}

// Numbers order numerically, labels lexicographically, numbers before labels.
impl Ord for NodeValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (NodeValue::Number(a), NodeValue::Number(b)) => a.cmp(b),
            (NodeValue::Label(a), NodeValue::Label(b)) => a.cmp(b),
            (NodeValue::Number(_), NodeValue::Label(_)) => Ordering::Less,
            (NodeValue::Label(_), NodeValue::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for NodeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i64> for NodeValue {
    fn from(n: i64) -> Self {
        NodeValue::Number(n)
    }
}

impl From<&str> for NodeValue {
    fn from(s: &str) -> Self {
        NodeValue::Label(s.to_string())
    }
}

impl From<String> for NodeValue {
    fn from(s: String) -> Self {
        NodeValue::Label(s)
    }
}

impl From<char> for NodeValue {
    fn from(c: char) -> Self {
        NodeValue::Label(c.to_string())
    }
}

/// Which child slot of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Tree node in the arena.
///
/// `x`/`y` are derived layout coordinates (slot index and depth level). They
/// are rewritten by every layout pass and are not part of the node's identity.
#[derive(Debug, Clone)]
pub struct Node {
    pub value: NodeValue,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub x: f64,
    pub y: f64,
}

impl Node {
    pub fn new(value: NodeValue) -> Self {
        Self {
            value,
            left: None,
            right: None,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Exactly one of the two slots is filled.
    pub fn has_only_one_child(&self) -> bool {
        self.left.is_some() != self.right.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_mixed_values_when_ordering_then_numbers_sort_before_labels() {
        let mut values: Vec<NodeValue> = vec!["b".into(), 10i64.into(), "a".into(), 2i64.into()];
        values.sort();
        assert_eq!(
            values,
            vec![
                NodeValue::Number(2),
                NodeValue::Number(10),
                NodeValue::from("a"),
                NodeValue::from("b"),
            ]
        );
    }

    #[test]
    fn given_numbers_when_comparing_then_uses_numeric_order() {
        // "10" < "9" as strings, but not as numbers
        assert!(NodeValue::Number(9) < NodeValue::Number(10));
    }

    #[test]
    fn given_values_when_display_len_then_counts_characters() {
        assert_eq!(NodeValue::Number(-42).display_len(), 3);
        assert_eq!(NodeValue::from("äbc").display_len(), 3);
    }

    #[test]
    fn given_node_with_one_child_when_checking_then_reports_only_child() {
        let mut node = Node::new(1i64.into());
        assert!(node.is_leaf());
        assert!(!node.has_only_one_child());
        node.set_child(Side::Right, Some(NodeId(Index::from_raw_parts(0, 0))));
        assert!(node.has_only_one_child());
        assert_eq!(node.child(Side::Left), None);
    }
}
