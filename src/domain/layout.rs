//! Layout engine: assigns abstract `(x, y)` slot coordinates to every node.
//!
//! `x` lives on the interval `[0, 2^depth - 1]`, `y` is the level index
//! (root = 0). Pixel placement is the view layer's job.

use tracing::instrument;

use crate::domain::node::NodeId;
use crate::domain::tree::BinaryTree;

/// Width of the slot interval for a tree of `depth` levels: `2^depth - 1`.
///
/// The renderer's spacing divides the canvas by `interval_width + 2`, so
/// both sides must agree on this value.
pub fn interval_width(depth: usize) -> f64 {
    let exponent = i32::try_from(depth).unwrap_or(i32::MAX);
    2f64.powi(exponent) - 1.0
}

impl BinaryTree {
    /// Recomputes the coordinates of all nodes.
    ///
    /// With `simplify_only_child` a node with exactly one child hands its
    /// whole interval down, so the child sits directly below it. Without it
    /// the child keeps its positional half of the interval.
    #[instrument(level = "trace", skip(self))]
    pub fn calculate_positions(&mut self, simplify_only_child: bool) {
        let Some(root) = self.root() else {
            return;
        };
        let width = interval_width(self.depth());

        // (node, left, right, level)
        let mut pending: Vec<(NodeId, f64, f64, usize)> = vec![(root, 0.0, width, 0)];
        while let Some((id, left, right, level)) = pending.pop() {
            let Some(node) = self.node_mut(id) else {
                continue;
            };
            let mid = (left + right) / 2.0;
            node.x = mid;
            node.y = level as f64;
            let next = level + 1;

            match (node.left, node.right) {
                (Some(only), None) | (None, Some(only)) if simplify_only_child => {
                    pending.push((only, left, right, next));
                }
                (l, r) => {
                    pending.extend(l.map(|lc| (lc, left, mid, next)));
                    pending.extend(r.map(|rc| (rc, mid, right, next)));
                }
            }
        }
    }
}
