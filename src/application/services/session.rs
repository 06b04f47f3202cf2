//! Build-mode session: persists the hand-built tree and the layout flag.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::BinaryTree;
use crate::infrastructure::traits::SessionStore;

/// Key of the serialized build-mode tree.
pub const BUILD_TREE_KEY: &str = "build_tree";
/// Key of the `simplify_only_child` flag, stored as "true"/"false".
pub const SIMPLIFY_KEY: &str = "simplify_only_child";

/// Service reading and writing the build-mode session.
#[derive(Clone)]
pub struct BuildSession {
    store: Arc<dyn SessionStore>,
}

impl BuildSession {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Saves both entries. An empty tree removes the tree entry.
    #[instrument(level = "debug", skip(self, tree), fields(nodes = tree.len()))]
    pub fn save(&self, tree: &BinaryTree, simplify_only_child: bool) -> ApplicationResult<()> {
        if tree.is_empty() {
            self.store
                .remove(BUILD_TREE_KEY)
                .with_context("remove session tree")?;
        } else {
            let json = tree.to_json()?;
            self.store
                .set(BUILD_TREE_KEY, &json)
                .with_context("save session tree")?;
        }
        self.store
            .set(SIMPLIFY_KEY, &simplify_only_child.to_string())
            .with_context("save session flag")?;
        debug!("session saved");
        Ok(())
    }

    /// Saved tree, `None` when nothing was saved.
    #[instrument(level = "debug", skip(self))]
    pub fn load_tree(&self) -> ApplicationResult<Option<BinaryTree>> {
        let Some(json) = self
            .store
            .get(BUILD_TREE_KEY)
            .with_context("read session tree")?
        else {
            return Ok(None);
        };
        let tree = BinaryTree::from_json(&json)?;
        Ok(Some(tree))
    }

    /// Saved flag; anything but "true" reads as false.
    pub fn load_simplify(&self) -> ApplicationResult<Option<bool>> {
        let value = self
            .store
            .get(SIMPLIFY_KEY)
            .with_context("read session flag")?;
        Ok(value.map(|v| v == "true"))
    }

    /// Loads tree and flag together for entering build mode.
    ///
    /// A corrupt tree entry is logged and treated as absent.
    pub fn restore(&self) -> (BinaryTree, Option<bool>) {
        let tree = match self.load_tree() {
            Ok(tree) => tree.unwrap_or_default(),
            Err(e) => {
                warn!("ignoring unreadable session tree: {}", e);
                BinaryTree::new()
            }
        };
        let simplify = self.load_simplify().unwrap_or_else(|e| {
            warn!("ignoring unreadable session flag: {}", e);
            None
        });
        (tree, simplify)
    }
}
