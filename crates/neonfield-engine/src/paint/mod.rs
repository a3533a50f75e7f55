//! Color model shared between the scene and renderers.
//!
//! Colors travel to the GPU as linear premultiplied RGBA; blend states in
//! `render` assume premultiplied input.

pub mod color;

pub use color::{Color, Rgb};
