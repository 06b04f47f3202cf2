//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::node::{NodeValue, Side};

/// Domain errors represent rejected tree operations and invalid user input.
///
/// None of these are fatal: the operation that produced one was not applied
/// and the tree is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("value must not be empty")]
    EmptyValue,

    #[error("value is {len} characters long, maximum is {max}")]
    ValueTooLong { len: usize, max: usize },

    #[error("not a valid number: {0}")]
    NotANumber(String),

    #[error("value {0} already exists in the tree")]
    DuplicateValue(NodeValue),

    #[error("value {0} not found in the tree")]
    ValueNotFound(NodeValue),

    #[error("cannot generate {requested} nodes, maximum is {max}")]
    TooManyNodes { requested: usize, max: usize },

    #[error("{side} child slot is already occupied")]
    SlotOccupied { side: Side },

    #[error("node does not belong to this tree")]
    UnknownNode,

    #[error("root already exists, clear the tree first")]
    RootExists,

    #[error("tree is empty")]
    EmptyTree,

    #[error("invalid tree snapshot: {0}")]
    Snapshot(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
