//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use termtree::Tree;

use crate::domain::{BinaryTree, NodeId, Side};
use crate::view::RenderState;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print prompt without newline (cyan)
pub fn prompt(msg: &(impl std::fmt::Display + ?Sized)) {
    use std::io::Write;
    print!("{} ", msg.to_string().cyan());
    std::io::stdout().flush().ok();
}

/// Print the tree as indented text
pub fn tree(tree: &BinaryTree, state: &RenderState) {
    print!("{}", tree_text(tree, state));
}

/// Tree as text, children tagged `[L]`/`[R]`.
///
/// The highlighted node is marked `*`, visited nodes `+`.
pub fn tree_text(tree: &BinaryTree, state: &RenderState) -> String {
    match tree.root().and_then(|root| text_node(tree, state, root, None)) {
        Some(t) => t.to_string(),
        None => "(empty tree)\n".to_string(),
    }
}

fn text_node(
    tree: &BinaryTree,
    state: &RenderState,
    id: NodeId,
    side: Option<Side>,
) -> Option<Tree<String>> {
    let node = tree.node(id)?;
    let tag = match side {
        Some(Side::Left) => "[L] ",
        Some(Side::Right) => "[R] ",
        None => "",
    };
    let mark = if state.highlighted == Some(id) {
        " *"
    } else if state.visited.contains(&id) {
        " +"
    } else {
        ""
    };
    let leaves = [Side::Left, Side::Right]
        .into_iter()
        .filter_map(|s| node.child(s).and_then(|c| text_node(tree, state, c, Some(s))));
    Some(Tree::new(format!("{tag}{}{mark}", node.value)).with_leaves(leaves))
}
