//! GPU rendering subsystem.
//!
//! Renderers consume a `scene::DrawList` and issue GPU commands via wgpu.
//! Each renderer owns its GPU resources (pipelines, buffers).
//!
//! Convention:
//! - CPU geometry is in world space (right-handed, +Y up).
//! - Vertex shaders apply the camera's view-projection from a uniform.

mod ctx;
pub mod scene3d;

pub use ctx::{RenderCtx, RenderTarget};
