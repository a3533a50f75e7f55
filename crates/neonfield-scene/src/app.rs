use rand::rngs::StdRng;
use rand::SeedableRng;

use neonfield_engine::coords::Viewport;
use neonfield_engine::core::{App, AppControl, FrameCtx};
use neonfield_engine::paint::Color;
use neonfield_engine::render::scene3d::Scene3dRenderer;
use neonfield_engine::scene::DrawList;
use neonfield_engine::time::FrameTime;

use crate::animator::SceneAnimator;
use crate::config::SceneConfig;
use crate::draw::SceneRecorder;

/// How often the frame-rate summary is logged, in frames.
const STATS_INTERVAL: u64 = 600;

enum SceneState {
    /// Waiting for the first frame, which supplies the real viewport.
    Uninitialized,
    Running {
        animator: SceneAnimator,
        /// Clock reading when the scene started; animation time is relative.
        started_at: f64,
    },
}

/// Engine application that hosts the backdrop scene.
pub struct BackdropApp {
    config: SceneConfig,
    seed: Option<u64>,
    rng: StdRng,
    clear: Color,

    state: SceneState,
    recorder: SceneRecorder,
    draw_list: DrawList,
    renderer: Scene3dRenderer,

    /// Frame time accumulated since the last summary, seconds.
    stats_time: f64,
}

impl BackdropApp {
    /// `seed` makes the generated scene reproducible; `None` draws from
    /// OS entropy.
    pub fn new(config: SceneConfig, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            config,
            seed,
            rng,
            clear: Color::transparent(),
            state: SceneState::Uninitialized,
            recorder: SceneRecorder::new(),
            draw_list: DrawList::new(),
            renderer: Scene3dRenderer::new(),
            stats_time: 0.0,
        }
    }

    /// Background the scene is drawn over. Defaults to fully transparent.
    pub fn with_clear_color(mut self, clear: Color) -> Self {
        self.clear = clear;
        self
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SceneState::Running { .. })
    }

    /// Moves the scene from uninitialized to running.
    fn start(&mut self, viewport: Viewport, now: f64) {
        let animator = SceneAnimator::initialize(self.config.clone(), viewport, &mut self.rng);
        log::info!(
            "scene initialized: {} buildings, {} streams, {} panels, {} particles (seed {})",
            animator.buildings().len(),
            animator.streams().len(),
            animator.panels().len(),
            animator.particles().len(),
            self.seed.map_or_else(|| "random".to_string(), |s| s.to_string()),
        );
        self.state = SceneState::Running { animator, started_at: now };
        self.stats_time = 0.0;
    }

    /// Accumulates `time.dt`; every `STATS_INTERVAL` frames returns and logs
    /// the mean frame rate over that window.
    fn log_stats(&mut self, time: &FrameTime) -> Option<f64> {
        self.stats_time += f64::from(time.dt);
        if time.frame_index == 0 || time.frame_index % STATS_INTERVAL != 0 {
            return None;
        }

        let span = std::mem::take(&mut self.stats_time);
        if span <= 0.0 {
            return None;
        }
        let fps = STATS_INTERVAL as f64 / span;
        log::debug!("{fps:.1} fps over the last {STATS_INTERVAL} frames");
        Some(fps)
    }
}

impl App for BackdropApp {
    fn on_resize(&mut self, viewport: Viewport) {
        // Before the first frame the scene reads the viewport itself.
        if let SceneState::Running { animator, .. } = &mut self.state {
            animator.on_resize(viewport);
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let viewport = ctx.window.viewport();
        if !viewport.is_valid() {
            return AppControl::Continue;
        }

        let now = ctx.time.elapsed;
        if !self.is_running() {
            self.start(viewport, now);
        }
        let SceneState::Running { animator, started_at } = &mut self.state else {
            return AppControl::Continue;
        };
        animator.on_frame(now - *started_at);

        self.recorder.record(animator, &mut self.draw_list);
        let camera = animator.camera().clone();

        let (renderer, draw_list) = (&mut self.renderer, &self.draw_list);
        let control = ctx.render(self.clear, |rctx, target| {
            renderer.render(rctx, target, &camera, draw_list);
        });

        self.log_stats(&ctx.time);
        control
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uninitialized() {
        let app = BackdropApp::new(SceneConfig::default(), Some(1));
        assert!(!app.is_running());
    }

    #[test]
    fn resize_before_first_frame_is_a_no_op() {
        let mut app = BackdropApp::new(SceneConfig::default(), Some(1));
        app.on_resize(Viewport::new(640.0, 480.0));
        assert!(!app.is_running());
    }

    #[test]
    fn start_runs_scene_at_given_clock() {
        let mut app = BackdropApp::new(SceneConfig::default(), Some(1));
        app.start(Viewport::new(640.0, 480.0), 12.5);
        let SceneState::Running { animator, started_at } = &app.state else {
            panic!("scene not running after start");
        };
        assert_eq!(*started_at, 12.5);
        assert_eq!(animator.surface(), Viewport::new(640.0, 480.0));
    }

    fn frame(frame_index: u64, dt: f32) -> FrameTime {
        FrameTime { dt, elapsed: frame_index as f64 * f64::from(dt), frame_index }
    }

    #[test]
    fn stats_report_mean_rate_each_interval() {
        let mut app = BackdropApp::new(SceneConfig::default(), Some(1));
        assert_eq!(app.log_stats(&frame(0, 0.02)), None);
        for i in 1..STATS_INTERVAL {
            assert_eq!(app.log_stats(&frame(i, 0.02)), None);
        }
        let fps = app.log_stats(&frame(STATS_INTERVAL, 0.02)).expect("summary at interval");
        // Frame 0 counts toward the first window.
        let expected = STATS_INTERVAL as f64 / ((STATS_INTERVAL + 1) as f64 * f64::from(0.02f32));
        assert!((fps - expected).abs() < 1e-6, "fps {fps}");

        for i in STATS_INTERVAL + 1..2 * STATS_INTERVAL {
            app.log_stats(&frame(i, 0.01));
        }
        let fps = app.log_stats(&frame(2 * STATS_INTERVAL, 0.01)).expect("second summary");
        assert!((fps - 100.0).abs() < 1e-3, "fps {fps}");
    }

    #[test]
    fn seeded_apps_generate_identical_scenes() {
        let mut a = BackdropApp::new(SceneConfig::default(), Some(77));
        let mut b = BackdropApp::new(SceneConfig::default(), Some(77));
        a.start(Viewport::new(800.0, 600.0), 0.0);
        b.start(Viewport::new(800.0, 600.0), 0.0);

        let (SceneState::Running { animator: x, .. }, SceneState::Running { animator: y, .. }) =
            (&a.state, &b.state)
        else {
            panic!("scenes not running");
        };
        assert_eq!(x.buildings(), y.buildings());
        assert_eq!(x.particles(), y.particles());
    }
}
