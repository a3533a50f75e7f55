use glam::{Mat4, Vec3};

/// Perspective camera with a cached projection matrix.
///
/// The projection is only rebuilt by [`set_aspect`](Self::set_aspect) /
/// [`update_projection`](Self::update_projection), so field edits to `fov_y`,
/// `near` or `far` take effect after an explicit update.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,

    /// Vertical field of view, degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,

    aspect: f32,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            fov_y,
            near,
            far,
            aspect,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    /// Places the camera at `position`, keeping its viewing direction.
    pub fn with_position(mut self, position: Vec3) -> Self {
        let dir = self.target - self.position;
        self.position = position;
        self.target = position + dir;
        self
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Sets the aspect ratio and rebuilds the projection.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection();
    }

    pub fn update_projection(&mut self) {
        // glam's `_rh` perspective already maps depth to wgpu's [0, 1].
        self.projection =
            Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.near, self.far);
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view()
    }

    /// Camera basis vectors `(right, up)` in world space, used to billboard
    /// point sprites.
    pub fn billboard_axes(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.position).normalize_or(Vec3::NEG_Z);
        let right = forward.cross(self.up).normalize_or(Vec3::X);
        let up = right.cross(forward);
        (right, up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(75.0, 16.0 / 9.0, 0.1, 1000.0).with_position(Vec3::new(0.0, 0.0, 30.0))
    }

    #[test]
    fn set_aspect_rebuilds_projection() {
        let mut cam = camera();
        let before = cam.projection();
        cam.set_aspect(1.0);
        assert_eq!(cam.aspect(), 1.0);
        assert_ne!(cam.projection(), before);
        assert_eq!(
            cam.projection(),
            Mat4::perspective_rh(75f32.to_radians(), 1.0, 0.1, 1000.0)
        );
    }

    #[test]
    fn with_position_keeps_looking_down_negative_z() {
        let cam = camera();
        assert_eq!(cam.target, Vec3::new(0.0, 0.0, 29.0));
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let cam = camera();
        let clip = cam.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6);
        assert!(ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn billboard_axes_match_unrotated_camera() {
        let (right, up) = camera().billboard_axes();
        assert!((right - Vec3::X).length() < 1e-6);
        assert!((up - Vec3::Y).length() < 1e-6);
    }
}
