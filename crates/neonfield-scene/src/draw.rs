//! Turns scene entities into a world-space `DrawList`.

use glam::Vec3;

use neonfield_engine::paint::Rgb;
use neonfield_engine::scene::{BlendMode, DrawList, LinesCmd, PointsCmd, TrianglesCmd, Vertex};

use crate::animator::SceneAnimator;
use crate::geometry;

/// Records a frame of the backdrop in scene order: buildings, streams,
/// panels, particles.
///
/// Stream and particle vertices are cached and only rebuilt when their
/// buffers are marked dirty.
#[derive(Debug, Default)]
pub struct SceneRecorder {
    stream_vertices: Vec<Vertex>,
    /// Particles in cloud-local space, before the cloud rotation.
    particle_vertices: Vec<Vertex>,
    rebuilds: u64,
}

impl SceneRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, scene: &mut SceneAnimator, list: &mut DrawList) {
        list.clear();
        self.refresh_buffers(scene);

        list.lines(LinesCmd {
            vertices: building_vertices(scene),
            blend: BlendMode::Alpha,
        });

        list.lines(LinesCmd {
            vertices: self.stream_vertices.clone(),
            blend: BlendMode::Alpha,
        });

        list.triangles(TrianglesCmd {
            vertices: panel_vertices(scene),
            blend: BlendMode::Alpha,
        });

        let cloud = scene.particles().matrix();
        let points = self
            .particle_vertices
            .iter()
            .map(|v| Vertex {
                pos: cloud.transform_point3(Vec3::from_array(v.pos)).to_array(),
                color: v.color,
            })
            .collect();
        list.points(PointsCmd {
            points,
            size: scene.config().particles.size,
            blend: BlendMode::Additive,
        });
    }

    /// Number of dirty-buffer rebuilds performed so far.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    fn refresh_buffers(&mut self, scene: &mut SceneAnimator) {
        let stream_alpha = scene.config().streams.opacity;
        let particle_alpha = scene.config().particles.opacity;
        let (streams, particles) = scene.buffers_mut();

        if streams.take_dirty() {
            self.stream_vertices.clear();
            self.stream_vertices
                .extend(interleave(&streams.positions, &streams.colors, stream_alpha));
            self.rebuilds += 1;
        }

        if particles.take_dirty() {
            self.particle_vertices.clear();
            self.particle_vertices
                .extend(interleave(&particles.positions, &particles.colors, particle_alpha));
            self.rebuilds += 1;
        }
    }
}

/// Zips flat xyz and rgb buffers into premultiplied vertices.
fn interleave<'a>(
    positions: &'a [f32],
    colors: &'a [f32],
    alpha: f32,
) -> impl Iterator<Item = Vertex> + 'a {
    positions
        .chunks_exact(3)
        .zip(colors.chunks_exact(3))
        .map(move |(p, c)| Vertex::new([p[0], p[1], p[2]], Rgb::new(c[0], c[1], c[2]).with_alpha(alpha)))
}

fn building_vertices(scene: &SceneAnimator) -> Vec<Vertex> {
    let alpha = scene.config().buildings.opacity;
    let mut out = Vec::with_capacity(scene.buildings().len() * 36);

    for b in scene.buildings() {
        let model = b.transform.matrix();
        let color = Rgb::from_hex(b.color).with_alpha(alpha);
        out.extend(
            geometry::box_wireframe(b.width, b.height, b.depth)
                .into_iter()
                .map(|v| Vertex::new(model.transform_point3(v).to_array(), color)),
        );
    }

    out
}

fn panel_vertices(scene: &SceneAnimator) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(scene.panels().len() * 6);

    for p in scene.panels() {
        let model = p.transform.matrix();
        let color = Rgb::from_hex(p.color).with_alpha(p.opacity);
        out.extend(
            geometry::plane(p.size)
                .into_iter()
                .map(|v| Vertex::new(model.transform_point3(v).to_array(), color)),
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use neonfield_engine::coords::Viewport;
    use neonfield_engine::scene::DrawCmd;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn scene() -> SceneAnimator {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        SceneAnimator::initialize(SceneConfig::default(), Viewport::new(800.0, 600.0), &mut rng)
    }

    #[test]
    fn records_four_commands_in_scene_order() {
        let mut s = scene();
        let mut rec = SceneRecorder::new();
        let mut list = DrawList::new();
        rec.record(&mut s, &mut list);

        let kinds: Vec<&str> = list
            .items()
            .iter()
            .map(|c| match c {
                DrawCmd::Lines(_) => "lines",
                DrawCmd::Triangles(_) => "triangles",
                DrawCmd::Points(_) => "points",
            })
            .collect();
        assert_eq!(kinds, ["lines", "lines", "triangles", "points"]);
    }

    #[test]
    fn vertex_counts_follow_entity_counts() {
        let mut s = scene();
        let mut rec = SceneRecorder::new();
        let mut list = DrawList::new();
        rec.record(&mut s, &mut list);

        let counts: Vec<usize> = list.items().iter().map(DrawCmd::vertex_count).collect();
        assert_eq!(counts, [20 * 36, 10 * 2, 5 * 6, 5000]);
    }

    #[test]
    fn particles_are_additive_and_sized() {
        let mut s = scene();
        let mut rec = SceneRecorder::new();
        let mut list = DrawList::new();
        rec.record(&mut s, &mut list);

        let Some((_, points)) = list.iter_points().next() else { panic!("no points recorded") };
        assert_eq!(points.blend, BlendMode::Additive);
        assert_eq!(points.size, 0.1);
        // Premultiplied at opacity 0.8.
        assert!(points.points.iter().all(|p| (p.color[3] - 0.8).abs() < 1e-6));
    }

    #[test]
    fn clean_buffers_are_not_rebuilt() {
        let mut s = scene();
        let mut rec = SceneRecorder::new();
        let mut list = DrawList::new();

        rec.record(&mut s, &mut list);
        assert_eq!(rec.rebuilds(), 2);

        rec.record(&mut s, &mut list);
        assert_eq!(rec.rebuilds(), 2);

        s.on_frame(1.0);
        rec.record(&mut s, &mut list);
        assert_eq!(rec.rebuilds(), 4);
    }

    #[test]
    fn stream_vertices_track_animation() {
        let mut s = scene();
        let mut rec = SceneRecorder::new();
        let mut list = DrawList::new();

        s.on_frame(0.0);
        rec.record(&mut s, &mut list);

        let Some((_, streams)) = list.iter_lines().nth(1) else { panic!("no stream lines") };
        let expected = -10.0 + 5.0 * 0f64.sin() as f32;
        assert_eq!(streams.vertices[0].pos[1], expected);
        assert_eq!(streams.vertices[1].pos[1], 20.0 + 5.0 * 0f64.sin() as f32);
    }

    #[test]
    fn panel_alpha_follows_opacity() {
        let mut s = scene();
        let mut rec = SceneRecorder::new();
        let mut list = DrawList::new();

        s.on_frame(3.0);
        rec.record(&mut s, &mut list);

        let Some((_, tris)) = list.iter_triangles().next() else { panic!("no panels") };
        for (panel, quad) in s.panels().iter().zip(tris.vertices.chunks_exact(6)) {
            assert!(quad.iter().all(|v| v.color[3] == panel.opacity));
        }
    }
}
