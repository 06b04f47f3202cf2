//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{BuildSession, SnapshotService};
use crate::config::Settings;
use crate::infrastructure::session::{FileSessionStore, MemorySessionStore};
use crate::infrastructure::traits::{FileSystem, RealFileSystem, SessionStore};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Build-mode session store
    pub store: Arc<dyn SessionStore>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    ///
    /// The session lives in `settings.session_file`.
    pub fn new(settings: Settings) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let store = Arc::new(FileSessionStore::new(
            fs.clone(),
            settings.session_file.clone(),
        ));
        Self::with_deps(settings, fs, store)
    }

    /// Real filesystem, session kept in memory only.
    pub fn ephemeral(settings: Settings) -> Self {
        Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(MemorySessionStore::new()),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            store,
        }
    }

    pub fn build_session(&self) -> BuildSession {
        BuildSession::new(self.store.clone())
    }

    pub fn snapshot_service(&self) -> SnapshotService {
        SnapshotService::new(self.fs.clone())
    }
}
