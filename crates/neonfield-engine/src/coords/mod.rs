//! Coordinate types shared between the runtime, camera and renderers.
//!
//! Two spaces exist:
//! - logical pixels for the drawing surface (`Viewport`)
//! - right-handed world space for the scene, +Y up, camera looking down -Z

mod viewport;

pub use viewport::Viewport;
