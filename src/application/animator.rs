//! Step-through traversal driver.
//!
//! Advances only on explicit `next_step` calls; there is no timer.

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::{BinaryTree, NodeId, NodeValue, TraversalKind};
use crate::view::RenderState;

#[derive(Debug, Clone)]
pub struct TraversalAnimator {
    kind: TraversalKind,
    order: Vec<NodeId>,
    index: usize,
    output: Vec<NodeValue>,
}

impl TraversalAnimator {
    /// Snapshots the visiting order of `tree`. Later edits to the tree are
    /// not reflected.
    pub fn new(tree: &BinaryTree, kind: TraversalKind) -> Self {
        Self {
            kind,
            order: tree.traversal_order(kind),
            index: 0,
            output: Vec::new(),
        }
    }

    pub fn kind(&self) -> TraversalKind {
        self.kind
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.order.len()
    }

    /// Number of steps taken so far.
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn output(&self) -> &[NodeValue] {
        &self.output
    }

    /// Values emitted so far, comma separated.
    pub fn output_text(&self) -> String {
        self.output.iter().join(", ")
    }

    /// Visits the next node.
    ///
    /// The previous node turns visited and the new one is highlighted. On the
    /// final step the last node is marked visited too and the highlight is
    /// cleared. Returns `None` once the traversal is complete.
    #[instrument(level = "debug", skip(self, tree, render))]
    pub fn next_step(&mut self, tree: &BinaryTree, render: &mut RenderState) -> Option<NodeId> {
        if self.is_finished() {
            return None;
        }
        if self.index > 0 {
            render.mark_visited(self.order[self.index - 1]);
        }
        let current = self.order[self.index];
        render.highlight(Some(current));
        if let Some(value) = tree.value(current) {
            self.output.push(value.clone());
        }
        self.index += 1;

        if self.is_finished() {
            render.mark_visited(current);
            render.highlight(None);
            debug!(kind = %self.kind, "traversal complete");
        }
        Some(current)
    }

    /// Back to the first step, clearing all marks.
    pub fn reset(&mut self, render: &mut RenderState) {
        self.index = 0;
        self.output.clear();
        render.reset();
    }
}
