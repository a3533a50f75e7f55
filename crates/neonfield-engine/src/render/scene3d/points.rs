use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::RenderCtx;
use crate::scene::{BlendMode, PointsCmd};

use super::common::{blend_slot, blend_state, CameraBinding, DynamicBuffer, BLEND_MODES};

/// Renderer for `DrawCmd::Points`.
///
/// Each point is an instanced quad expanded along the camera's right/up axes
/// in the vertex shader, so sprite size is in world units and shrinks with
/// distance like a perspective point.
pub struct PointRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipelines: [Option<wgpu::RenderPipeline>; 2],

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    instances: DynamicBuffer,
    staging: Vec<PointInstance>,
    batches: Vec<(usize, Range<u32>, BlendMode)>,
}

impl Default for PointRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipelines: [None, None],
            quad_vbo: None,
            quad_ibo: None,
            instances: DynamicBuffer::new("neonfield point instances"),
            staging: Vec::new(),
            batches: Vec::new(),
        }
    }
}

impl PointRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn prepare<'c>(
        &mut self,
        ctx: &RenderCtx<'_>,
        camera: &CameraBinding,
        cmds: impl Iterator<Item = (usize, &'c PointsCmd)>,
    ) {
        self.staging.clear();
        self.batches.clear();

        for (item, cmd) in cmds {
            if cmd.size <= 0.0 {
                continue;
            }
            let start = self.staging.len() as u32;
            self.staging.extend(cmd.points.iter().map(|p| PointInstance {
                center: p.pos,
                size: cmd.size,
                color: p.color,
            }));
            self.batches.push((item, start..self.staging.len() as u32, cmd.blend));
        }

        if self.batches.is_empty() {
            return;
        }

        self.ensure_pipelines(ctx, camera);
        self.ensure_static_buffers(ctx);
        self.instances.upload(ctx, &self.staging);
    }

    pub(super) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, item: usize) {
        let Some((_, range, blend)) = self.batches.iter().find(|(i, _, _)| *i == item) else {
            return;
        };
        let Some(pipeline) = self.pipelines[blend_slot(*blend)].as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };
        let Some(instance_vbo) = self.instances.buffer() else { return };

        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, range.clone());
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>, camera: &CameraBinding) {
        if self.pipeline_format == Some(ctx.surface_format) {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("neonfield points shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/points.wgsl").into()),
        });

        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("neonfield points pipeline layout"),
            bind_group_layouts: &[&camera.layout],
            immediate_size: 0,
        });

        for mode in BLEND_MODES {
            let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("neonfield points pipeline"),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[QuadCorner::layout(), PointInstance::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(blend_state(mode)),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });
            self.pipelines[blend_slot(mode)] = Some(pipeline);
        }

        self.pipeline_format = Some(ctx.surface_format);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("neonfield point quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("neonfield point quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadCorner {
    corner: [f32; 2],
}

impl QuadCorner {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadCorner>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const QUAD_CORNERS: [QuadCorner; 4] = [
    QuadCorner { corner: [-0.5, -0.5] },
    QuadCorner { corner: [0.5, -0.5] },
    QuadCorner { corner: [0.5, 0.5] },
    QuadCorner { corner: [-0.5, 0.5] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Instance data layout (32 bytes):
///
///  offset  0  center  [f32; 3]  loc 1
///  offset 12  size    f32       loc 2
///  offset 16  color   [f32; 4]  loc 3
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct PointInstance {
    center: [f32; 3],
    size: f32,
    color: [f32; 4],
}

impl PointInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x3, // center
        2 => Float32,   // size
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_layout_is_32_bytes() {
        assert_eq!(std::mem::size_of::<PointInstance>(), 32);
        assert_eq!(PointInstance::layout().array_stride, 32);
    }

    #[test]
    fn quad_is_centered_unit_square() {
        let sum: [f32; 2] = QUAD_CORNERS
            .iter()
            .fold([0.0, 0.0], |acc, q| [acc[0] + q.corner[0], acc[1] + q.corner[1]]);
        assert_eq!(sum, [0.0, 0.0]);
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD_CORNERS.len()));
    }
}
