use crate::camera::PerspectiveCamera;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::CameraBinding;
use super::mesh::MeshRenderer;
use super::points::PointRenderer;

/// Draws a whole `DrawList` through one camera in a single render pass.
///
/// Sub-renderers upload their geometry first; the pass then walks the list in
/// insertion order and lets the owning renderer record each command.
pub struct Scene3dRenderer {
    camera: Option<CameraBinding>,
    lines: MeshRenderer,
    triangles: MeshRenderer,
    points: PointRenderer,
}

impl Default for Scene3dRenderer {
    fn default() -> Self {
        Self {
            camera: None,
            lines: MeshRenderer::lines(),
            triangles: MeshRenderer::triangles(),
            points: PointRenderer::new(),
        }
    }
}

impl Scene3dRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: &PerspectiveCamera,
        draw_list: &DrawList,
    ) {
        if draw_list.is_empty() {
            return;
        }

        let binding = self.camera.get_or_insert_with(|| CameraBinding::new(ctx.device));
        binding.write(ctx, camera);

        self.lines.prepare(
            ctx,
            binding,
            draw_list.iter_lines().map(|(i, c)| (i, c.vertices.as_slice(), c.blend)),
        );
        self.triangles.prepare(
            ctx,
            binding,
            draw_list.iter_triangles().map(|(i, c)| (i, c.vertices.as_slice(), c.blend)),
        );
        self.points.prepare(ctx, binding, draw_list.iter_points());

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("neonfield scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, &binding.bind_group, &[]);

        for (item, cmd) in draw_list.items().iter().enumerate() {
            match cmd {
                DrawCmd::Lines(_) => self.lines.draw(&mut rpass, item),
                DrawCmd::Triangles(_) => self.triangles.draw(&mut rpass, item),
                DrawCmd::Points(_) => self.points.draw(&mut rpass, item),
            }
        }
    }
}
