use std::ops::Range;

use crate::render::RenderCtx;
use crate::scene::{BlendMode, Vertex};

use super::common::{
    blend_slot, blend_state, vertex_layout, CameraBinding, DynamicBuffer, BLEND_MODES,
};

/// One command's slice of the shared vertex buffer.
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    item: usize,
    vertices: Range<u32>,
    blend: BlendMode,
}

/// Renderer for world-space line lists or triangle lists.
///
/// All commands of a frame share one vertex buffer; each keeps its own range
/// so the scene renderer can interleave them with other kinds in paint order.
pub struct MeshRenderer {
    label: &'static str,
    topology: wgpu::PrimitiveTopology,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipelines: [Option<wgpu::RenderPipeline>; 2],

    vbo: DynamicBuffer,
    staging: Vec<Vertex>,
    batches: Vec<Batch>,
}

impl MeshRenderer {
    pub fn lines() -> Self {
        Self::new("neonfield lines", wgpu::PrimitiveTopology::LineList)
    }

    pub fn triangles() -> Self {
        Self::new("neonfield triangles", wgpu::PrimitiveTopology::TriangleList)
    }

    fn new(label: &'static str, topology: wgpu::PrimitiveTopology) -> Self {
        Self {
            label,
            topology,
            pipeline_format: None,
            pipelines: [None, None],
            vbo: DynamicBuffer::new(label),
            staging: Vec::new(),
            batches: Vec::new(),
        }
    }

    /// Uploads the vertices of every `(paint index, vertices, blend)` command.
    pub(super) fn prepare<'c>(
        &mut self,
        ctx: &RenderCtx<'_>,
        camera: &CameraBinding,
        cmds: impl Iterator<Item = (usize, &'c [Vertex], BlendMode)>,
    ) {
        self.staging.clear();
        self.batches.clear();

        for (item, vertices, blend) in cmds {
            let start = self.staging.len() as u32;
            self.staging.extend_from_slice(vertices);
            self.batches.push(Batch {
                item,
                vertices: start..self.staging.len() as u32,
                blend,
            });
        }

        if self.batches.is_empty() {
            return;
        }

        self.ensure_pipelines(ctx, camera);
        self.vbo.upload(ctx, &self.staging);
    }

    /// Records the draw for paint index `item`, if this renderer owns it.
    pub(super) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, item: usize) {
        let Some(batch) = self.batches.iter().find(|b| b.item == item) else { return };
        let Some(pipeline) = self.pipelines[blend_slot(batch.blend)].as_ref() else { return };
        let Some(vbo) = self.vbo.buffer() else { return };

        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(batch.vertices.clone(), 0..1);
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>, camera: &CameraBinding) {
        if self.pipeline_format == Some(ctx.surface_format) {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.label),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(self.label),
            bind_group_layouts: &[&camera.layout],
            immediate_size: 0,
        });

        for mode in BLEND_MODES {
            let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(self.label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[vertex_layout()],
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
                    topology: self.topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    // Panels are visible from both sides.
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
}
