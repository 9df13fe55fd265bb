//! GPU rendering for the model viewport

pub mod callback;
pub mod renderer;

pub use callback::ViewportRenderCallback;
pub use renderer::{Renderer3D, Vertex3D};
