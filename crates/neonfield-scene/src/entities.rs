//! Scene entities and their generation.
//!
//! Generators draw every random attribute from the injected `Rng`, in a fixed
//! order, so a seeded generator always yields the same scene.

use std::ops::Range;

use glam::{EulerRot, Mat4, Vec3};
use rand::Rng;

use crate::config::{BuildingConfig, PanelConfig, ParticleConfig, StreamConfig};
use crate::palette;

/// Position plus Euler rotation (radians, XYZ order).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_translation(self.position) * Mat4::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    /// `0xRRGGBB` from the palette.
    pub color: u32,
    pub transform: Transform,
}

impl Building {
    pub fn generate<R: Rng + ?Sized>(cfg: &BuildingConfig, spread: f32, rng: &mut R) -> Self {
        let width = rng.gen_range(cfg.width.clone());
        let height = rng.gen_range(cfg.height.clone());
        let depth = rng.gen_range(cfg.depth.clone());
        let color = palette::pick(rng);

        let x = rng.gen_range(centered(spread));
        let z = rng.gen_range(centered(spread));

        Self {
            width,
            height,
            depth,
            color,
            transform: Transform {
                position: Vec3::new(x, height / 2.0 + cfg.ground, z),
                rotation: Vec3::ZERO,
            },
        }
    }
}

/// Vertical line segments sharing one vertex buffer.
///
/// `positions` holds 6 floats per stream (start xyz, end xyz); `colors`
/// mirrors it with normalized RGB per endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct DataStreams {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    dirty: bool,
}

impl DataStreams {
    pub const FLOATS_PER_STREAM: usize = 6;

    pub fn generate<R: Rng + ?Sized>(cfg: &StreamConfig, spread: f32, rng: &mut R) -> Self {
        let mut positions = Vec::with_capacity(cfg.count * Self::FLOATS_PER_STREAM);
        let mut colors = Vec::with_capacity(cfg.count * Self::FLOATS_PER_STREAM);

        for _ in 0..cfg.count {
            let x = rng.gen_range(centered(spread));
            let y = rng.gen_range(cfg.start_y.clone());
            let z = rng.gen_range(centered(spread));
            positions.extend_from_slice(&[x, y, z, x, y + cfg.length, z]);

            let rgb = palette::normalized(palette::pick(rng));
            colors.extend_from_slice(&rgb);
            colors.extend_from_slice(&rgb);
        }

        Self { positions, colors, dirty: true }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len() / Self::FLOATS_PER_STREAM
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// `(start_y, end_y)` of stream `i`.
    pub fn endpoints_y(&self, i: usize) -> (f32, f32) {
        let o = i * Self::FLOATS_PER_STREAM;
        (self.positions[o + 1], self.positions[o + 4])
    }

    pub(crate) fn set_endpoints_y(&mut self, i: usize, start_y: f32, end_y: f32) {
        let o = i * Self::FLOATS_PER_STREAM;
        self.positions[o + 1] = start_y;
        self.positions[o + 4] = end_y;
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether the buffer needs a re-upload and clears the flag.
    #[inline]
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub size: f32,
    pub color: u32,
    pub opacity: f32,
    pub transform: Transform,
}

impl Panel {
    pub fn generate<R: Rng + ?Sized>(cfg: &PanelConfig, spread: f32, rng: &mut R) -> Self {
        let color = palette::pick(rng);
        let x = rng.gen_range(centered(spread));
        let y = rng.gen_range(cfg.height.clone());
        let z = rng.gen_range(centered(spread));
        let rx = rng.gen_range(0.0..std::f32::consts::PI);
        let ry = rng.gen_range(0.0..std::f32::consts::PI);

        Self {
            size: cfg.size,
            color,
            opacity: cfg.base_opacity,
            transform: Transform {
                position: Vec3::new(x, y, z),
                rotation: Vec3::new(rx, ry, 0.0),
            },
        }
    }
}

/// Point cloud stored as flat xyz / rgb buffers, rotated as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleCloud {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub rotation_y: f32,
    dirty: bool,
}

impl ParticleCloud {
    pub fn generate<R: Rng + ?Sized>(cfg: &ParticleConfig, spread: f32, rng: &mut R) -> Self {
        let mut positions = Vec::with_capacity(cfg.count * 3);
        let mut colors = Vec::with_capacity(cfg.count * 3);

        for _ in 0..cfg.count {
            for _ in 0..3 {
                positions.push(rng.gen_range(centered(spread)));
            }
            colors.extend_from_slice(&palette::normalized(palette::pick_particle(rng)));
        }

        Self { positions, colors, rotation_y: 0.0, dirty: true }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
    }
}

/// `[-spread / 2, spread / 2)`.
#[inline]
fn centered(spread: f32) -> Range<f32> {
    -spread / 2.0..spread / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn building_y_derives_from_height() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let cfg = BuildingConfig::default();
        for _ in 0..50 {
            let b = Building::generate(&cfg, 100.0, &mut rng);
            assert_eq!(b.transform.position.y, b.height / 2.0 - 10.0);
            assert_eq!(b.transform.rotation, Vec3::ZERO);
        }
    }

    #[test]
    fn streams_start_thirty_units_tall() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let streams = DataStreams::generate(&StreamConfig::default(), 100.0, &mut rng);
        assert_eq!(streams.len(), 10);
        for i in 0..streams.len() {
            let (lo, hi) = streams.endpoints_y(i);
            assert!((-10.0..10.0).contains(&lo));
            assert!((hi - lo - 30.0).abs() < 1e-4);
        }
    }

    #[test]
    fn stream_endpoints_share_x_z_and_color() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let streams = DataStreams::generate(&StreamConfig::default(), 100.0, &mut rng);
        for s in streams.positions.chunks_exact(6) {
            assert_eq!((s[0], s[2]), (s[3], s[5]));
        }
        for c in streams.colors.chunks_exact(6) {
            assert_eq!(c[..3], c[3..]);
        }
    }

    #[test]
    fn take_dirty_clears_flag() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut streams = DataStreams::generate(&StreamConfig::default(), 100.0, &mut rng);
        assert!(streams.take_dirty());
        assert!(!streams.is_dirty());
        streams.mark_dirty();
        assert!(streams.take_dirty());
    }

    #[test]
    fn panel_rotations_within_half_turn() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let cfg = PanelConfig::default();
        for _ in 0..50 {
            let p = Panel::generate(&cfg, 100.0, &mut rng);
            let r = p.transform.rotation;
            assert!((0.0..std::f32::consts::PI).contains(&r.x));
            assert!((0.0..std::f32::consts::PI).contains(&r.y));
            assert_eq!(r.z, 0.0);
            assert!((0.0..20.0).contains(&p.transform.position.y));
            assert_eq!(p.opacity, 0.2);
        }
    }

    #[test]
    fn particle_buffers_are_parallel() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let cloud = ParticleCloud::generate(&ParticleConfig::default(), 100.0, &mut rng);
        assert_eq!(cloud.len(), 5000);
        assert_eq!(cloud.positions.len(), cloud.colors.len());
        assert!(cloud.positions.iter().all(|v| (-50.0..50.0).contains(v)));
    }

    #[test]
    fn transform_matrix_applies_rotation_then_translation() {
        let t = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
        };
        let p = t.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(1.0, 2.0, 2.0)).length() < 1e-5);
    }
}
