//! Pan/zoom state of the canvas.
//!
//! Screen = translate(offset) * scale(zoom) * tree. Pointer positions go the
//! other way before hit-testing.

use kurbo::{Affine, Point, Vec2};
use tracing::{debug, instrument};

use crate::domain::BinaryTree;
use crate::view::geometry::{Spacing, LEVEL_SPACING, TOP_MARGIN};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;
/// Multiplier of the zoom in/out buttons.
pub const ZOOM_STEP: f64 = 1.2;
const WHEEL_ZOOM_IN: f64 = 1.1;
const WHEEL_ZOOM_OUT: f64 = 0.9;
const CENTER_MIN_ZOOM: f64 = 0.3;
const CENTER_MAX_ZOOM: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset: Vec2,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    pub fn to_screen(&self, tree_point: Point) -> Point {
        self.transform() * tree_point
    }

    /// Inverts pan and zoom.
    pub fn to_tree_space(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.zoom,
            (screen.y - self.offset.y) / self.zoom,
        )
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    /// Scales by `factor` keeping the tree point under `anchor` fixed.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let scale = new_zoom / self.zoom;
        let anchor = anchor.to_vec2();
        self.offset = anchor - (anchor - self.offset) * scale;
        self.zoom = new_zoom;
    }

    /// Mouse wheel: positive delta zooms out.
    pub fn wheel(&mut self, anchor: Point, delta_y: f64) {
        let factor = if delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        self.zoom_at(anchor, factor);
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Fits the zoom to the tree height and puts the root at the top center.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn center_on_root(&mut self, tree: &BinaryTree, canvas_width: f64, canvas_height: f64) {
        let Some(root) = tree.root().and_then(|id| tree.node(id)) else {
            return;
        };
        let depth = tree.depth();
        let spacing = Spacing::new(canvas_width, depth);
        let root_center = spacing.node_center(root);

        let total_height = depth as f64 * LEVEL_SPACING + 100.0;
        self.zoom = (canvas_height / total_height).clamp(CENTER_MIN_ZOOM, CENTER_MAX_ZOOM);
        self.offset = Vec2::new(
            canvas_width / 2.0 - root_center.x * self.zoom,
            TOP_MARGIN - root_center.y * self.zoom,
        );
        debug!(zoom = self.zoom, offset = ?self.offset, "centered on root");
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
