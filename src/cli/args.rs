//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::TraversalKind;

/// Binary tree visualizer: random trees, traversals, BST operations and a guess-the-tree quiz
#[derive(Parser, Debug)]
#[command(name = "treeviz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Seed for random trees (reproducible runs)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Extra config file, overrides the global one
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a random binary tree and print its traversals
    Generate {
        /// Maximum depth (levels)
        #[arg(long, default_value_t = 3)]
        depth: usize,
        /// Number of nodes, capped by what the depth can hold
        #[arg(long, default_value_t = 7)]
        nodes: usize,
        /// Save the tree as a JSON snapshot
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
        /// Print the traversals as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a traversal (preorder, inorder, postorder, levelorder)
    Traverse {
        /// Traversal kind
        kind: TraversalKind,
        /// Snapshot to traverse (default: random tree)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Depth of the random tree
        #[arg(long, default_value_t = 3)]
        depth: usize,
        /// Node count of the random tree
        #[arg(long, default_value_t = 7)]
        nodes: usize,
        /// Print every animation step
        #[arg(long)]
        steps: bool,
        /// Print the algorithm
        #[arg(long)]
        listing: bool,
    },

    /// Build a binary search tree and insert/delete values
    Bst {
        /// Whitespace-separated values, inserted in order
        #[arg(long, allow_hyphen_values = true)]
        values: Option<String>,
        /// Random BST, optionally with COUNT values
        #[arg(long, num_args = 0..=1, value_name = "COUNT", conflicts_with = "values")]
        random: Option<Option<usize>>,
        /// Values to insert afterwards
        #[arg(long, allow_negative_numbers = true)]
        insert: Vec<String>,
        /// Values to delete afterwards
        #[arg(long, allow_negative_numbers = true)]
        delete: Vec<String>,
        /// Print the insert and delete algorithms
        #[arg(long)]
        listing: bool,
    },

    /// Render a snapshot as SVG
    Render {
        /// Snapshot file
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Output SVG file
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: PathBuf,
        /// Draw build-mode placeholders for empty child slots
        #[arg(long)]
        build: bool,
        /// Center lone children below their parent
        #[arg(long)]
        simplify_only_child: Option<bool>,
    },

    /// Guess the tree from its traversals
    Quiz,

    /// Interactive session (all modes)
    Shell {
        /// Keep the build session in memory only
        #[arg(long)]
        ephemeral: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a template config file
    Template,
    /// Show config and session file locations
    Path,
}
