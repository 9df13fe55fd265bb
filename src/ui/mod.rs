//! egui panels: category sidebar, tool strip, and the 3D viewport area

pub mod sidebar;
pub mod tools;
pub mod viewport;

pub use sidebar::SidebarPanel;
pub use tools::{ToolsAction, ToolsPanel};
pub use viewport::ViewportPanel;
