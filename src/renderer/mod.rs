//! WebGPU rendering module
//!
//! Geometry from a frame's draw commands is tessellated into one triangle
//! list; text and overlays go to the 2D HUD canvas stacked on top.

#[cfg(target_arch = "wasm32")]
pub mod hud;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

#[cfg(target_arch = "wasm32")]
pub use hud::HudLayer;
pub use pipeline::RenderState;
pub use shapes::{Batch, tessellate};
pub use vertex::Vertex;
