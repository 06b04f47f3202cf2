//! Renderer: turns a laid-out tree plus interaction state into a display list.
//!
//! The scene is backend neutral. Coordinates are tree space; `transform`
//! carries pan/zoom for whoever rasterizes it.

use std::collections::HashSet;

use kurbo::{Affine, Circle, Point, Vec2};
use tracing::instrument;

use crate::domain::{BinaryTree, Node, NodeId, Side};
use crate::view::geometry::Spacing;
use crate::view::style::{
    ColorScheme, ADD_BUTTON_FILL, BUTTON_GLYPH, DELETE_BUTTON_FILL, EDGE_COLOR, HIGHLIGHT_FILL,
    PLACEHOLDER_EDGE_COLOR, PLACEHOLDER_FILL, PLACEHOLDER_STROKE, VISITED_FILL,
};
use crate::view::viewport::Viewport;

const EDGE_WIDTH: f64 = 2.0;
const NODE_STROKE_WIDTH: f64 = 3.0;
const PLUS_HALF: f64 = 8.0;
const CROSS_HALF: f64 = 4.0;
const BUTTON_FONT_SIZE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub dashed: bool,
}

impl Stroke {
    fn solid(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
            dashed: false,
        }
    }

    fn dashed(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
            dashed: true,
        }
    }
}

/// One drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Circle {
        circle: Circle,
        fill: Option<String>,
        stroke: Option<Stroke>,
    },
    Text {
        at: Point,
        text: String,
        size: f64,
        color: String,
    },
}

/// Per-frame interaction state: the animator's cursor and marks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderState {
    pub highlighted: Option<NodeId>,
    pub visited: HashSet<NodeId>,
    /// Nodes skipped together with their subtrees.
    pub hidden: HashSet<NodeId>,
}

impl RenderState {
    pub fn highlight(&mut self, node: Option<NodeId>) {
        self.highlighted = node;
    }

    pub fn mark_visited(&mut self, node: NodeId) {
        self.visited.insert(node);
    }

    pub fn hide(&mut self, node: NodeId) {
        self.hidden.insert(node);
    }

    pub fn reset(&mut self) {
        self.highlighted = None;
        self.visited.clear();
        self.hidden.clear();
    }

    /// Highlight beats visited beats the scheme's fill.
    pub fn fill_for<'a>(&self, node: NodeId, colors: &'a ColorScheme) -> &'a str {
        if self.highlighted == Some(node) {
            HIGHLIGHT_FILL
        } else if self.visited.contains(&node) {
            VISITED_FILL
        } else {
            &colors.node_fill
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Build-mode affordances: placeholders plus delete/add buttons.
    pub show_placeholders: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub transform: Affine,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn is_blank(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Label font size, shrinking as the label grows.
pub fn font_size(label_len: usize) -> f64 {
    match label_len {
        0..=2 => 18.0,
        3..=4 => 16.0,
        5..=6 => 14.0,
        7..=8 => 12.0,
        _ => 10.0,
    }
}

/// Draws `tree` using the coordinates from its last layout pass.
///
/// Edges come first so node circles cover their endpoints.
#[instrument(level = "debug", skip_all, fields(nodes = tree.len()))]
pub fn render(
    tree: &BinaryTree,
    state: &RenderState,
    colors: &ColorScheme,
    viewport: &Viewport,
    options: &RenderOptions,
) -> Scene {
    let mut commands = Vec::new();
    let spacing = Spacing::for_tree(tree, options.canvas_width);
    let visible = visible_nodes(tree, state);

    for (_, node) in &visible {
        let center = spacing.node_center(node);
        for child in [node.left, node.right].into_iter().flatten() {
            if state.hidden.contains(&child) {
                continue;
            }
            if let Some(child_node) = tree.node(child) {
                commands.push(DrawCommand::Line {
                    from: center,
                    to: spacing.node_center(child_node),
                    stroke: Stroke::solid(EDGE_COLOR, EDGE_WIDTH),
                });
            }
        }
        if options.show_placeholders {
            for side in empty_sides(node) {
                commands.push(DrawCommand::Line {
                    from: center,
                    to: spacing.placeholder_circle(node, side).center,
                    stroke: Stroke::dashed(PLACEHOLDER_EDGE_COLOR, EDGE_WIDTH),
                });
            }
        }
    }

    for (id, node) in &visible {
        if options.show_placeholders {
            for side in empty_sides(node) {
                push_placeholder(&mut commands, spacing.placeholder_circle(node, side));
            }
        }

        let center = spacing.node_center(node);
        commands.push(DrawCommand::Circle {
            circle: spacing.node_circle(node),
            fill: Some(state.fill_for(*id, colors).to_string()),
            stroke: Some(Stroke::solid(&colors.node_stroke, NODE_STROKE_WIDTH)),
        });
        commands.push(DrawCommand::Text {
            at: center,
            text: node.value.to_string(),
            size: font_size(node.value.display_len()),
            color: colors.node_text.clone(),
        });

        if options.show_placeholders {
            push_delete_button(&mut commands, spacing.delete_button(node));
            for side in empty_sides(node) {
                push_add_button(&mut commands, spacing.add_button(node, side), side);
            }
        }
    }

    Scene {
        width: options.canvas_width,
        height: options.canvas_height,
        transform: viewport.transform(),
        commands,
    }
}

/// Pre-order walk that prunes hidden subtrees.
fn visible_nodes<'a>(tree: &'a BinaryTree, state: &RenderState) -> Vec<(NodeId, &'a Node)> {
    let mut visible = Vec::with_capacity(tree.len());
    let mut stack: Vec<NodeId> = tree.root().into_iter().collect();
    while let Some(id) = stack.pop() {
        if state.hidden.contains(&id) {
            continue;
        }
        if let Some(node) = tree.node(id) {
            stack.extend(node.right);
            stack.extend(node.left);
            visible.push((id, node));
        }
    }
    visible
}

fn empty_sides(node: &Node) -> impl Iterator<Item = Side> + '_ {
    [Side::Left, Side::Right]
        .into_iter()
        .filter(move |&side| node.child(side).is_none())
}

fn push_placeholder(commands: &mut Vec<DrawCommand>, circle: Circle) {
    commands.push(DrawCommand::Circle {
        circle,
        fill: Some(PLACEHOLDER_FILL.to_string()),
        stroke: Some(Stroke::dashed(PLACEHOLDER_STROKE, 2.0)),
    });
    let c = circle.center;
    for d in [Vec2::new(PLUS_HALF, 0.0), Vec2::new(0.0, PLUS_HALF)] {
        commands.push(DrawCommand::Line {
            from: c - d,
            to: c + d,
            stroke: Stroke::solid(PLACEHOLDER_STROKE, 3.0),
        });
    }
}

fn push_delete_button(commands: &mut Vec<DrawCommand>, circle: Circle) {
    commands.push(DrawCommand::Circle {
        circle,
        fill: Some(DELETE_BUTTON_FILL.to_string()),
        stroke: None,
    });
    let c = circle.center;
    for d in [
        Vec2::new(CROSS_HALF, CROSS_HALF),
        Vec2::new(CROSS_HALF, -CROSS_HALF),
    ] {
        commands.push(DrawCommand::Line {
            from: c - d,
            to: c + d,
            stroke: Stroke::solid(BUTTON_GLYPH, 2.0),
        });
    }
}

fn push_add_button(commands: &mut Vec<DrawCommand>, circle: Circle, side: Side) {
    commands.push(DrawCommand::Circle {
        circle,
        fill: Some(ADD_BUTTON_FILL.to_string()),
        stroke: None,
    });
    let glyph = match side {
        Side::Left => "L",
        Side::Right => "R",
    };
    commands.push(DrawCommand::Text {
        at: circle.center,
        text: glyph.to_string(),
        size: BUTTON_FONT_SIZE,
        color: BUTTON_GLYPH.to_string(),
    });
}
