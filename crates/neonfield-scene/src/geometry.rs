//! Local-space geometry for scene entities.

use glam::Vec3;

/// Box wireframe as a line list centered on the origin.
///
/// Emits the 12 box edges plus one diagonal per face (the triangle seam),
/// so the result matches a triangulated box drawn in wireframe: 18 segments.
pub fn box_wireframe(width: f32, height: f32, depth: f32) -> Vec<Vec3> {
    let half = Vec3::new(width, height, depth) * 0.5;
    let corner = |i: usize| {
        Vec3::new(
            if i & 1 == 0 { -half.x } else { half.x },
            if i & 2 == 0 { -half.y } else { half.y },
            if i & 4 == 0 { -half.z } else { half.z },
        )
    };

    let mut lines = Vec::with_capacity(36);

    // Edges: corner pairs that differ in exactly one axis bit.
    for i in 0..8 {
        for bit in [1, 2, 4] {
            if i & bit == 0 {
                lines.push(corner(i));
                lines.push(corner(i | bit));
            }
        }
    }

    // Seams: on the face where `axis` is fixed, join the two corners that
    // differ in both remaining bits.
    for axis in [1, 2, 4] {
        let others = 7 & !axis;
        for side in [0, axis] {
            lines.push(corner(side));
            lines.push(corner(side | others));
        }
    }

    lines
}

/// Square in the local XY plane as two triangles, centered on the origin.
pub fn plane(size: f32) -> [Vec3; 6] {
    let h = size * 0.5;
    let a = Vec3::new(-h, -h, 0.0);
    let b = Vec3::new(h, -h, 0.0);
    let c = Vec3::new(h, h, 0.0);
    let d = Vec3::new(-h, h, 0.0);
    [a, b, c, a, c, d]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_wireframe_has_eighteen_segments() {
        assert_eq!(box_wireframe(2.0, 10.0, 3.0).len(), 36);
    }

    #[test]
    fn box_wireframe_vertices_lie_on_corners() {
        for v in box_wireframe(2.0, 10.0, 3.0) {
            assert_eq!(v.x.abs(), 1.0);
            assert_eq!(v.y.abs(), 5.0);
            assert_eq!(v.z.abs(), 1.5);
        }
    }

    #[test]
    fn box_wireframe_has_no_degenerate_segments() {
        let lines = box_wireframe(1.0, 1.0, 1.0);
        for seg in lines.chunks_exact(2) {
            assert_ne!(seg[0], seg[1]);
        }
    }

    #[test]
    fn plane_spans_size() {
        let quad = plane(10.0);
        let max_x = quad.iter().map(|v| v.x).fold(f32::MIN, f32::max);
        let min_y = quad.iter().map(|v| v.y).fold(f32::MAX, f32::min);
        assert_eq!(max_x, 5.0);
        assert_eq!(min_y, -5.0);
        assert!(quad.iter().all(|v| v.z == 0.0));
    }
}
