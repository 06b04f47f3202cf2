//! View layer: layout-to-pixel geometry, hit-testing, pan/zoom and rendering
//!
//! Pure functions of tree and interaction state. Nothing here mutates a tree.

pub mod geometry;
pub mod scene;
pub mod style;
pub mod svg;
pub mod viewport;

pub use hit_test::{hit_test, HitTarget};
pub use scene::{font_size, render, DrawCommand, RenderOptions, RenderState, Scene};
pub use style::ColorScheme;
pub use viewport::Viewport;
