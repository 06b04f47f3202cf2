//! Snapshot and image files.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::BinaryTree;
use crate::infrastructure::traits::FileSystem;

/// Service for importing and exporting trees.
pub struct SnapshotService {
    fs: Arc<dyn FileSystem>,
}

impl SnapshotService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Writes the tree as pretty-printed JSON. Empty trees are refused.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn export_json(&self, tree: &BinaryTree, path: &Path) -> ApplicationResult<()> {
        if tree.is_empty() {
            return Err(ApplicationError::NothingToExport { action: "export" });
        }
        let json = tree.to_json()?;
        self.write(path, &json)?;
        info!("exported {} nodes to {}", tree.len(), path.display());
        Ok(())
    }

    /// Reads and parses a snapshot file.
    #[instrument(level = "debug", skip(self))]
    pub fn import_json(&self, path: &Path) -> ApplicationResult<BinaryTree> {
        let content = self.read_text(path)?;
        Ok(BinaryTree::from_json(&content)?)
    }

    /// Raw snapshot text, parsed later by the importing mode.
    pub fn read_text(&self, path: &Path) -> ApplicationResult<String> {
        self.fs
            .read_to_string(path)
            .with_path_context("read snapshot", path)
    }

    /// Writes already serialized snapshot JSON.
    pub fn write_text(&self, json: &str, path: &Path) -> ApplicationResult<()> {
        self.write(path, json)?;
        info!("exported {}", path.display());
        Ok(())
    }

    /// Writes an already rendered SVG document.
    pub fn export_svg(&self, svg: &str, path: &Path) -> ApplicationResult<()> {
        self.write(path, svg)?;
        info!("wrote image {}", path.display());
        Ok(())
    }

    fn write(&self, path: &Path, content: &str) -> ApplicationResult<()> {
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs
            .write(path, content)
            .with_path_context("write file", path)
    }
}
