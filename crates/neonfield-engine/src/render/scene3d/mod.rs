//! 3D renderers for world-space draw lists.

mod common;
mod mesh;
mod points;
mod renderer;

pub use renderer::Scene3dRenderer;
