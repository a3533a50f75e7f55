//! Shared GPU types and utilities used by the 3D renderers.

use bytemuck::{Pod, Zeroable};

use crate::camera::PerspectiveCamera;
use crate::render::RenderCtx;
use crate::scene::{BlendMode, Vertex};

// ── blend ─────────────────────────────────────────────────────────────────

fn premul_alpha_blend() -> wgpu::BlendState {
    let over = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: over, alpha: over }
}

fn additive_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
        // Keep destination coverage; additive sprites only brighten.
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::Zero,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

pub(super) fn blend_state(mode: BlendMode) -> wgpu::BlendState {
    match mode {
        BlendMode::Alpha => premul_alpha_blend(),
        BlendMode::Additive => additive_blend(),
    }
}

#[inline]
pub(super) fn blend_slot(mode: BlendMode) -> usize {
    match mode {
        BlendMode::Alpha => 0,
        BlendMode::Additive => 1,
    }
}

pub(super) const BLEND_MODES: [BlendMode; 2] = [BlendMode::Alpha, BlendMode::Additive];

// ── camera uniform ────────────────────────────────────────────────────────

/// Layout (96 bytes):
///
///  offset  0  view_proj  mat4x4<f32>
///  offset 64  right      vec4<f32>  (.w unused)
///  offset 80  up         vec4<f32>  (.w unused)
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub right: [f32; 4],
    pub up: [f32; 4],
}

impl CameraUniform {
    pub(super) fn from_camera(camera: &PerspectiveCamera) -> Self {
        let (right, up) = camera.billboard_axes();
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            right: right.extend(0.0).to_array(),
            up: up.extend(0.0).to_array(),
        }
    }
}

/// Camera uniform buffer + bind group shared by every 3D pipeline.
pub(super) struct CameraBinding {
    pub layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
    ubo: wgpu::Buffer,
}

impl CameraBinding {
    pub(super) fn new(device: &wgpu::Device) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("neonfield camera bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(camera_ubo_min_binding_size()),
                },
                count: None,
            }],
        });

        let ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("neonfield camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("neonfield camera bind group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        Self { layout, bind_group, ubo }
    }

    pub(super) fn write(&self, ctx: &RenderCtx<'_>, camera: &PerspectiveCamera) {
        ctx.queue
            .write_buffer(&self.ubo, 0, bytemuck::bytes_of(&CameraUniform::from_camera(camera)));
    }
}

/// `CameraUniform` is a fixed 96-byte struct, so the size is never zero.
fn camera_ubo_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<CameraUniform>() as u64)
        .expect("CameraUniform has non-zero size by construction")
}

// ── vertex layout ─────────────────────────────────────────────────────────

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x3, // pos
    1 => Float32x4  // color
];

pub(super) fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRS,
    }
}

// ── growable vertex buffer ────────────────────────────────────────────────

/// A `VERTEX | COPY_DST` buffer that grows to the next power of two.
pub(super) struct DynamicBuffer {
    label: &'static str,
    buffer: Option<wgpu::Buffer>,
    capacity: usize, // elements
}

impl DynamicBuffer {
    pub(super) const fn new(label: &'static str) -> Self {
        Self { label, buffer: None, capacity: 0 }
    }

    /// Uploads `data`, reallocating when it does not fit.
    pub(super) fn upload<T: Pod>(&mut self, ctx: &RenderCtx<'_>, data: &[T]) {
        if data.is_empty() {
            return;
        }
        if data.len() > self.capacity || self.buffer.is_none() {
            let cap = grown_capacity(data.len());
            log::debug!("{}: growing to {cap} elements", self.label);
            self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: (cap * std::mem::size_of::<T>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = cap;
        }
        if let Some(buf) = self.buffer.as_ref() {
            ctx.queue.write_buffer(buf, 0, bytemuck::cast_slice(data));
        }
    }

    #[inline]
    pub(super) fn buffer(&self) -> Option<&wgpu::Buffer> {
        self.buffer.as_ref()
    }
}

pub(super) fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_uniform_is_96_bytes() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 96);
    }

    #[test]
    fn vertex_stride_matches_attributes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 28);
        assert_eq!(vertex_layout().array_stride, 28);
    }

    #[test]
    fn capacity_rounds_up_with_floor() {
        assert_eq!(grown_capacity(1), 64);
        assert_eq!(grown_capacity(64), 64);
        assert_eq!(grown_capacity(65), 128);
        assert_eq!(grown_capacity(5000), 8192);
    }

    #[test]
    fn blend_slots_are_distinct() {
        assert_ne!(blend_slot(BlendMode::Alpha), blend_slot(BlendMode::Additive));
        assert_eq!(blend_state(BlendMode::Additive).color.dst_factor, wgpu::BlendFactor::One);
    }
}
