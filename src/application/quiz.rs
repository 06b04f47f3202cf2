//! Guess-the-tree: show a few traversals of a hidden random tree.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, instrument};

use crate::domain::tree::MAX_GENERATED_NODES;
use crate::domain::{max_nodes, BinaryTree, DomainResult, TraversalKind};

const MIN_DEPTH: usize = 3;
const MAX_DEPTH: usize = 5;
const MIN_NODES: usize = 5;
const MIN_SHOWN: usize = 2;

/// One traversal clue: the kind and its values joined without separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    pub kind: TraversalKind,
    pub text: String,
}

#[derive(Debug)]
pub struct Quiz {
    tree: BinaryTree,
    clues: Vec<Clue>,
    revealed: bool,
}

impl Quiz {
    /// Random tree with depth in 3..=5 and at least 5 nodes, plus 2 to 4
    /// randomly chosen traversal clues.
    #[instrument(level = "debug", skip(rng))]
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> DomainResult<Self> {
        let depth = rng.random_range(MIN_DEPTH..=MAX_DEPTH);
        let ceiling = (max_nodes(depth as u32) as usize).min(MAX_GENERATED_NODES);
        let node_count = rng.random_range(MIN_NODES..=ceiling);

        let mut tree = BinaryTree::new();
        tree.generate_random_tree(depth, node_count, rng)?;

        let mut kinds = TraversalKind::ALL.to_vec();
        kinds.shuffle(rng);
        let shown = rng.random_range(MIN_SHOWN..=kinds.len());
        let clues = kinds
            .into_iter()
            .take(shown)
            .map(|kind| Clue {
                kind,
                text: tree
                    .traversal_values(kind)
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            })
            .collect();
        debug!(depth, node_count, shown, "new quiz");

        Ok(Self {
            tree,
            clues,
            revealed: false,
        })
    }

    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    /// The answer, only once revealed.
    pub fn tree(&self) -> Option<&BinaryTree> {
        self.revealed.then_some(&self.tree)
    }

    pub(crate) fn tree_mut(&mut self) -> Option<&mut BinaryTree> {
        if self.revealed {
            Some(&mut self.tree)
        } else {
            None
        }
    }
}
