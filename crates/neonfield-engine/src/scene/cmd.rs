use bytemuck::{Pod, Zeroable};

use crate::paint::Color;

/// World-space vertex with a premultiplied color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    #[inline]
    pub fn new(pos: [f32; 3], color: Color) -> Self {
        Self { pos, color: color.to_array() }
    }
}

/// How a command composites over what is already drawn.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum BlendMode {
    /// Premultiplied "over".
    #[default]
    Alpha,
    /// Colors add up; overlapping sprites glow.
    Additive,
}

/// Line list: every consecutive vertex pair is one segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinesCmd {
    pub vertices: Vec<Vertex>,
    pub blend: BlendMode,
}

/// Triangle list, drawn without back-face culling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrianglesCmd {
    pub vertices: Vec<Vertex>,
    pub blend: BlendMode,
}

/// Camera-facing square sprites. `size` is the edge length in world units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointsCmd {
    pub points: Vec<Vertex>,
    pub size: f32,
    pub blend: BlendMode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Lines(LinesCmd),
    Triangles(TrianglesCmd),
    Points(PointsCmd),
}

impl DrawCmd {
    /// Vertices submitted for this command; a point counts as one.
    pub fn vertex_count(&self) -> usize {
        match self {
            DrawCmd::Lines(c) => c.vertices.len(),
            DrawCmd::Triangles(c) => c.vertices.len(),
            DrawCmd::Points(c) => c.points.len(),
        }
    }
}
