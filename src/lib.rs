//! Maquette core library
//!
//! A categorized glTF model viewer: a sidebar of models grouped by
//! category, a wgpu viewport with orbit controls, and a tool strip of
//! inline panels for scene, material, and animation settings.

pub mod app;
pub mod catalog;
pub mod constants;
pub mod gpu;
pub mod loader;
pub mod prefs;
pub mod scene;
pub mod theme;
pub mod ui;
pub mod viewer;

// Re-export the types most callers need
pub use catalog::{ModelCatalog, ModelEntry};
pub use scene::SceneData;
pub use viewer::{MotionMode, QuickAnimKind, ViewerSession};
