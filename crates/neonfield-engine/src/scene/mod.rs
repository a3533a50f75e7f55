//! World-space draw stream.
//!
//! Higher layers record one `DrawList` per frame; the `render::scene3d`
//! renderers consume it. Geometry is already in world space, so renderers
//! only need the camera.

mod cmd;
mod list;

pub use cmd::{BlendMode, DrawCmd, LinesCmd, PointsCmd, TrianglesCmd, Vertex};
pub use list::DrawList;
