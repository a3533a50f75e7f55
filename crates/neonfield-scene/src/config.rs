use std::ops::Range;

use anyhow::{ensure, Result};

/// Scene configuration.
///
/// Defaults reproduce the reference backdrop. Horizontal placement of every
/// entity uses `[-spread / 2, spread / 2)` on X and Z.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub spread: f32,
    pub buildings: BuildingConfig,
    pub streams: StreamConfig,
    pub panels: PanelConfig,
    pub particles: ParticleConfig,
    pub camera: CameraConfig,

    /// Angular frequency of every sinusoid, radians per second.
    pub frequency: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            spread: 100.0,
            buildings: BuildingConfig::default(),
            streams: StreamConfig::default(),
            panels: PanelConfig::default(),
            particles: ParticleConfig::default(),
            camera: CameraConfig::default(),
            frequency: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildingConfig {
    pub count: usize,
    pub width: Range<f32>,
    pub height: Range<f32>,
    pub depth: Range<f32>,

    /// A building's center sits at `height / 2 + ground`.
    pub ground: f32,
    pub opacity: f32,

    /// Y rotation added per frame, radians.
    pub spin: f32,
    /// Vertical drift amplitude per frame.
    pub bob: f32,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            count: 20,
            width: 2.0..5.0,
            height: 10.0..30.0,
            depth: 2.0..5.0,
            ground: -10.0,
            opacity: 0.3,
            spin: 0.001,
            bob: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreamConfig {
    pub count: usize,
    /// Initial Y of a stream's lower endpoint.
    pub start_y: Range<f32>,
    pub length: f32,
    pub opacity: f32,

    /// Midpoints the endpoints oscillate around once animation starts.
    pub low_mid: f32,
    pub high_mid: f32,
    pub amplitude: f32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            count: 10,
            start_y: -10.0..10.0,
            length: 30.0,
            opacity: 0.5,
            low_mid: -10.0,
            high_mid: 20.0,
            amplitude: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    pub count: usize,
    pub size: f32,
    pub height: Range<f32>,

    pub base_opacity: f32,
    pub opacity_amplitude: f32,

    /// X and Y rotation added per frame, radians.
    pub spin: f32,
    pub bob: f32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            count: 5,
            size: 10.0,
            height: 0.0..20.0,
            base_opacity: 0.2,
            opacity_amplitude: 0.1,
            spin: 0.001,
            bob: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleConfig {
    pub count: usize,
    /// Sprite edge length in world units.
    pub size: f32,
    pub opacity: f32,

    /// Whole-cloud Y rotation added per frame, radians.
    pub spin: f32,
    pub drift: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 5000,
            size: 0.1,
            opacity: 0.8,
            spin: 0.0005,
            drift: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view, degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Distance from the origin along +Z.
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y: 75.0,
            near: 0.1,
            far: 1000.0,
            distance: 30.0,
        }
    }
}

impl SceneConfig {
    /// Rejects configurations that would make random generation panic or
    /// the camera degenerate.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.spread > 0.0 && self.spread.is_finite(), "spread must be positive");
        ensure!(self.frequency.is_finite(), "frequency must be finite");

        let b = &self.buildings;
        check_range("building width", &b.width)?;
        check_range("building height", &b.height)?;
        check_range("building depth", &b.depth)?;
        check_opacity("building opacity", b.opacity)?;

        check_range("stream start height", &self.streams.start_y)?;
        check_opacity("stream opacity", self.streams.opacity)?;

        let p = &self.panels;
        check_range("panel height", &p.height)?;
        ensure!(p.size > 0.0, "panel size must be positive");
        check_opacity("panel base opacity", p.base_opacity)?;
        ensure!(
            p.base_opacity - p.opacity_amplitude.abs() >= 0.0
                && p.base_opacity + p.opacity_amplitude.abs() <= 1.0,
            "panel opacity oscillation must stay within [0, 1]"
        );

        ensure!(self.particles.size > 0.0, "particle size must be positive");
        check_opacity("particle opacity", self.particles.opacity)?;

        let c = &self.camera;
        ensure!(c.fov_y > 0.0 && c.fov_y < 180.0, "camera fov must be in (0, 180)");
        ensure!(c.near > 0.0 && c.far > c.near, "camera clip planes must satisfy 0 < near < far");

        Ok(())
    }
}

fn check_range(name: &str, range: &Range<f32>) -> Result<()> {
    ensure!(
        range.start.is_finite() && range.end.is_finite() && range.start < range.end,
        "{name} range {range:?} is empty"
    );
    Ok(())
}

fn check_opacity(name: &str, value: f32) -> Result<()> {
    ensure!((0.0..=1.0).contains(&value), "{name} {value} outside [0, 1]");
    Ok(())
}
