//! neonfield engine crate.
//!
//! Owns the platform + GPU runtime pieces the backdrop scene is drawn with:
//! window loop, device/surface, camera, world-space draw list and renderers.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod camera;
pub mod coords;
pub mod paint;
pub mod render;
pub mod scene;
