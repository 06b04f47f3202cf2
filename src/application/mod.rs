//! Application layer: interaction state and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod animator;
pub mod error;
pub mod error_ext;
pub mod listing;
pub mod quiz;
pub mod services;
pub mod state;

pub use animator::TraversalAnimator;
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use quiz::{Clue, Quiz};
pub use state::{dispatch, AppState, Event, Mode, Outcome, PendingConfirm, PendingEdit};
