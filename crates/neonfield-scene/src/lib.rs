//! neonfield scene.
//!
//! Builds the cyberpunk backdrop (wireframe buildings, data streams,
//! holographic panels, a particle cloud), animates it from elapsed time and
//! records it into an engine `DrawList` each frame.
//!
//! The animation core ([`SceneAnimator`]) has no GPU dependency; randomness is
//! injected so a seeded generator reproduces a scene exactly.

pub mod palette;
pub mod config;
pub mod geometry;
pub mod entities;
pub mod animator;
pub mod draw;
pub mod app;

pub use animator::SceneAnimator;
pub use app::BackdropApp;
pub use config::SceneConfig;
