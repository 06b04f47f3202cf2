//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, SessionStore)
//! but are themselves concrete structs, not traits.

mod session;
mod snapshot;

pub use session::{BuildSession, BUILD_TREE_KEY, SIMPLIFY_KEY};
pub use snapshot::SnapshotService;
