//! Cameras producing view/projection matrices for the 3D renderers.

mod perspective;

pub use perspective::PerspectiveCamera;
