//! Tree-space geometry shared by the renderer and hit-testing.
//!
//! Layout slots become pixels through one spacing formula:
//! `horizontal = canvas_width / (2^depth + 1)`, 100 units per level, and a
//! 50 unit top margin. Node center: `((x + 0.5) * horizontal, y * 100 + 50)`.

use kurbo::{Circle, Point, Vec2};

use crate::domain::layout::interval_width;
use crate::domain::{BinaryTree, Node, Side};

pub const NODE_RADIUS: f64 = 25.0;
pub const PLACEHOLDER_RADIUS: f64 = 20.0;
pub const BUTTON_RADIUS: f64 = 10.0;
/// Distance of the delete/add buttons from the node center along each axis.
pub const BUTTON_OFFSET: f64 = 22.0;
pub const LEVEL_SPACING: f64 = 100.0;
pub const TOP_MARGIN: f64 = 50.0;

/// Pixel spacing for one frame of a given tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Spacing {
    pub fn new(canvas_width: f64, depth: usize) -> Self {
        let slots = interval_width(depth) + 2.0;
        Self {
            horizontal: canvas_width / slots,
            vertical: LEVEL_SPACING,
        }
    }

    pub fn for_tree(tree: &BinaryTree, canvas_width: f64) -> Self {
        Self::new(canvas_width, tree.depth())
    }

    pub fn node_center(&self, node: &Node) -> Point {
        Point::new(
            (node.x + 0.5) * self.horizontal,
            node.y * self.vertical + TOP_MARGIN,
        )
    }

    pub fn node_circle(&self, node: &Node) -> Circle {
        Circle::new(self.node_center(node), NODE_RADIUS)
    }

    /// Empty slot one level below `node`. Pushed further out when the
    /// sibling slot is filled, since a lone child may sit centered.
    pub fn placeholder_circle(&self, node: &Node, side: Side) -> Circle {
        let divisor = if node.has_only_one_child() { 3.0 } else { 4.0 };
        let dx = self.horizontal / divisor;
        let center = self.node_center(node)
            + Vec2::new(side_sign(side) * dx, self.vertical);
        Circle::new(center, PLACEHOLDER_RADIUS)
    }

    pub fn delete_button(&self, node: &Node) -> Circle {
        let center = self.node_center(node) + Vec2::new(BUTTON_OFFSET, -BUTTON_OFFSET);
        Circle::new(center, BUTTON_RADIUS)
    }

    pub fn add_button(&self, node: &Node, side: Side) -> Circle {
        let center =
            self.node_center(node) + Vec2::new(side_sign(side) * BUTTON_OFFSET, BUTTON_OFFSET);
        Circle::new(center, BUTTON_RADIUS)
    }
}

fn side_sign(side: Side) -> f64 {
    match side {
        Side::Left => -1.0,
        Side::Right => 1.0,
    }
}

/// Inclusive Euclidean containment, so the rim counts as a hit.
pub fn circle_contains(circle: &Circle, point: Point) -> bool {
    circle.center.distance(point) <= circle.radius
}
