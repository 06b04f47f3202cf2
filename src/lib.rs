//! Educational binary tree visualizer.
//!
//! Random trees and traversal stepping, a BST insert/delete simulator,
//! a guess-the-tree quiz and manual tree construction. The core engines
//! (tree, layout, hit-testing, rendering) are front-end neutral; the CLI in
//! [`cli`] drives them through [`application::dispatch`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
pub mod view;

pub use application::{dispatch, AppState, Event, Mode, Outcome};
pub use domain::{BinaryTree, DomainError, NodeId, NodeValue, Side, TraversalKind};
