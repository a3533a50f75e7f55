use glam::Vec3;
use rand::Rng;

use neonfield_engine::camera::PerspectiveCamera;
use neonfield_engine::coords::Viewport;

use crate::config::SceneConfig;
use crate::entities::{Building, DataStreams, Panel, ParticleCloud};

/// Owner of the whole backdrop: entities, camera and output surface size.
///
/// Constructed once by [`initialize`](Self::initialize); afterwards only
/// positions, rotations, panel opacities and vertex buffers change. Entity
/// counts never change.
#[derive(Debug, Clone)]
pub struct SceneAnimator {
    config: SceneConfig,
    camera: PerspectiveCamera,
    surface: Viewport,

    buildings: Vec<Building>,
    streams: DataStreams,
    panels: Vec<Panel>,
    particles: ParticleCloud,
}

impl SceneAnimator {
    /// Builds the camera and surface for `viewport` and generates every entity
    /// from `rng`.
    pub fn initialize<R: Rng + ?Sized>(config: SceneConfig, viewport: Viewport, rng: &mut R) -> Self {
        let spread = config.spread;

        let buildings = (0..config.buildings.count)
            .map(|_| Building::generate(&config.buildings, spread, rng))
            .collect();
        let streams = DataStreams::generate(&config.streams, spread, rng);
        let panels = (0..config.panels.count)
            .map(|_| Panel::generate(&config.panels, spread, rng))
            .collect();
        let particles = ParticleCloud::generate(&config.particles, spread, rng);

        let cam = &config.camera;
        let camera = PerspectiveCamera::new(cam.fov_y, viewport.aspect(), cam.near, cam.far)
            .with_position(Vec3::new(0.0, 0.0, cam.distance));

        Self {
            config,
            camera,
            surface: viewport,
            buildings,
            streams,
            panels,
            particles,
        }
    }

    /// Advances every entity to `time` (seconds since the scene started).
    ///
    /// Per-frame increments (spin, drift) are applied once per call, matching
    /// one call per display refresh.
    pub fn on_frame(&mut self, time: f64) {
        let freq = self.config.frequency;
        let phase = |index: usize| (time * freq + index as f64).sin() as f32;

        let b = &self.config.buildings;
        for (i, building) in self.buildings.iter_mut().enumerate() {
            building.transform.rotation.y += b.spin;
            building.transform.position.y += phase(i) * b.bob;
        }

        let s = &self.config.streams;
        for i in 0..self.streams.len() {
            let wave = phase(i) * s.amplitude;
            self.streams.set_endpoints_y(i, s.low_mid + wave, s.high_mid + wave);
        }
        self.streams.mark_dirty();

        let p = &self.config.panels;
        for (i, panel) in self.panels.iter_mut().enumerate() {
            let wave = phase(i);
            panel.transform.rotation.x += p.spin;
            panel.transform.rotation.y += p.spin;
            panel.transform.position.y += wave * p.bob;
            panel.opacity = p.base_opacity + wave * p.opacity_amplitude;
        }

        let c = &self.config.particles;
        self.particles.rotation_y += c.spin;
        // The phase offset is the flat buffer index of each particle's x.
        for (k, xyz) in self.particles.positions.chunks_exact_mut(3).enumerate() {
            xyz[1] += phase(k * 3) * c.drift;
        }
        self.particles.mark_dirty();
    }

    /// Matches camera aspect and surface size to `viewport`.
    ///
    /// Zero-area viewports are ignored so a minimized window cannot poison
    /// the projection.
    pub fn on_resize(&mut self, viewport: Viewport) {
        if !viewport.is_valid() {
            log::debug!("ignoring resize to {}x{}", viewport.width, viewport.height);
            return;
        }
        if viewport == self.surface {
            return;
        }

        self.camera.set_aspect(viewport.aspect());
        self.surface = viewport;
        log::debug!("scene resized to {}x{}", viewport.width, viewport.height);
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn surface(&self) -> Viewport {
        self.surface
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn streams(&self) -> &DataStreams {
        &self.streams
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn particles(&self) -> &ParticleCloud {
        &self.particles
    }

    /// Mutable access for the recorder to consume dirty flags.
    pub(crate) fn buffers_mut(&mut self) -> (&mut DataStreams, &mut ParticleCloud) {
        (&mut self.streams, &mut self.particles)
    }
}
