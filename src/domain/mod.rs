//! Domain layer: tree engine, layout and snapshot format
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod layout;
pub mod node;
pub mod snapshot;
pub mod tree;
pub mod validation;

pub use error::{DomainError, DomainResult};
pub use node::{Node, NodeId, NodeValue, Side};
pub use snapshot::NodeSnapshot;
pub use tree::{max_nodes, BinaryTree, TraversalKind, TreeIterator};
