use crate::api::config::SceneConfig;
use crate::api::types::{Color, GearId, SurfaceSize};
use crate::components::gear::Gear;
use crate::core::clock::FrameClock;
use crate::core::scene::Scene;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::traits::{FrameData, Renderer};
use crate::systems::render::{build_frame_lines, FrameLines};
#[cfg(feature = "vectors")]
use crate::systems::vector::VectorState;

/// Lifecycle of a [`SceneHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    /// Constructed, not yet mounted.
    Idle,
    /// Mounted; frames advance and render.
    Running,
    /// Unmounted. Terminal.
    TornDown,
}

/// Owns the scene, camera and renderer and drives them frame by frame.
///
/// Platform code (the wasm bridge) owns the actual frame scheduling and
/// event listeners and forwards timestamps and sizes here.
pub struct SceneHost<R: Renderer> {
    config: SceneConfig,
    renderer: R,
    scene: Scene,
    camera: PerspectiveCamera,
    surface: SurfaceSize,
    clock: FrameClock,
    lines: FrameLines,
    #[cfg(feature = "vectors")]
    vectors: VectorState,
    state: HostState,
    loaded: bool,
    frames: u64,
}

impl<R: Renderer> SceneHost<R> {
    pub fn new(config: SceneConfig, renderer: R) -> Self {
        let scene = Scene::new(Color::from_hex(config.background));
        Self {
            config,
            renderer,
            scene,
            camera: PerspectiveCamera::default(),
            surface: SurfaceSize::new(1, 1),
            clock: FrameClock::new(),
            lines: FrameLines::new(),
            #[cfg(feature = "vectors")]
            vectors: VectorState::new(),
            state: HostState::Idle,
            loaded: false,
            frames: 0,
        }
    }

    /// Build the gears, size camera and renderer to the surface and start
    /// running. Returns the fade-in delay in milliseconds.
    ///
    /// Mounting twice or after teardown does nothing and returns 0.
    pub fn mount(&mut self, surface: SurfaceSize) -> u32 {
        if self.state != HostState::Idle {
            log::warn!("scene host: mount ignored in state {:?}", self.state);
            return 0;
        }

        let surface = surface.non_zero();
        self.surface = surface;
        self.camera = PerspectiveCamera::from_config(&self.config.camera, surface);
        self.renderer.resize(surface);

        self.scene.clear();
        for (i, gear_config) in self.config.gears.iter().enumerate() {
            self.scene.spawn(Gear::new(GearId(i as u32), gear_config));
        }

        self.clock.reset();
        self.state = HostState::Running;

        let delay = self.config.startup.fade_delay_ms(surface.width);
        log::info!(
            "scene host: mounted {} gears on {}x{} ({}), fade in {}ms",
            self.scene.len(),
            surface.width,
            surface.height,
            self.renderer.backend(),
            delay
        );
        delay
    }

    /// Run one frame: advance every gear, then render.
    ///
    /// Returns `false` once the host is no longer running; the caller should
    /// stop scheduling frames.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if self.state != HostState::Running {
            return false;
        }

        let elapsed = self.clock.tick(now_ms);
        self.scene.advance(elapsed);

        build_frame_lines(&self.scene, &self.camera, self.surface, &mut self.lines);
        #[cfg(feature = "vectors")]
        self.vectors.tessellate_lines(self.lines.as_slice());

        let frame = FrameData {
            background: self.scene.background(),
            surface: self.surface,
            lines: self.lines.as_slice(),
            #[cfg(feature = "vectors")]
            vertices: self.vectors.as_slice(),
        };
        self.renderer.draw(&frame);
        self.frames += 1;
        true
    }

    /// Handle a viewport resize. `None` means the mount target is gone and
    /// the event is ignored, as is any resize outside the running state.
    pub fn resize(&mut self, surface: Option<SurfaceSize>) {
        let Some(surface) = surface else {
            return;
        };
        if self.state != HostState::Running {
            return;
        }

        let surface = surface.non_zero();
        self.surface = surface;
        self.camera.resize(surface);
        self.renderer.resize(surface);
        log::debug!(
            "scene host: resized to {}x{} (aspect {:.3})",
            surface.width,
            surface.height,
            self.camera.aspect
        );
    }

    /// Record that the canvas has been attached and faded in.
    pub fn mark_loaded(&mut self) {
        if self.state == HostState::Running && !self.loaded {
            self.loaded = true;
            log::debug!("scene host: loaded");
        }
    }

    /// Stop the frame loop and drop the scene. Terminal.
    pub fn unmount(&mut self) {
        if self.state == HostState::TornDown {
            return;
        }
        self.state = HostState::TornDown;
        self.loaded = false;
        self.scene.clear();
        self.lines.clear();
        log::info!("scene host: unmounted after {} frames", self.frames);
    }

    pub fn state(&self) -> HostState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == HostState::Running
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Frames rendered since mount.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records what the host asked it to do.
    #[derive(Default)]
    struct RecordingRenderer {
        draws: usize,
        sizes: Vec<SurfaceSize>,
        last_line_count: usize,
        last_background: Option<Color>,
    }

    impl Renderer for RecordingRenderer {
        fn backend(&self) -> &'static str {
            "recording"
        }

        fn draw(&mut self, frame: &FrameData) {
            self.draws += 1;
            self.last_line_count = frame.lines.len();
            self.last_background = Some(frame.background);
        }

        fn resize(&mut self, size: SurfaceSize) {
            self.sizes.push(size);
        }
    }

    fn mounted(width: u32, height: u32) -> (SceneHost<RecordingRenderer>, u32) {
        let mut host = SceneHost::new(SceneConfig::default(), RecordingRenderer::default());
        let delay = host.mount(SurfaceSize::new(width, height));
        (host, delay)
    }

    #[test]
    fn mount_builds_configured_gears() {
        let (host, _) = mounted(1280, 720);
        assert_eq!(host.state(), HostState::Running);
        assert_eq!(host.scene().len(), 3);
        assert_eq!(host.camera().fov_degrees, 75.0);
        assert_eq!(host.camera().near, 0.1);
        assert_eq!(host.camera().far, 1000.0);
        assert_eq!(host.camera().aspect, 1280.0 / 720.0);
        assert_eq!(host.renderer().sizes, vec![SurfaceSize::new(1280, 720)]);
    }

    #[test]
    fn mount_reports_fade_delay() {
        assert_eq!(mounted(599, 800).1, 2000);
        assert_eq!(mounted(600, 800).1, 0);
    }

    #[test]
    fn frame_advances_and_draws() {
        let (mut host, _) = mounted(800, 600);
        assert!(host.frame(0.0));
        assert!(host.frame(16.0));
        assert_eq!(host.renderer().draws, 2);
        assert_eq!(host.renderer().last_line_count, 3);
        assert_eq!(host.renderer().last_background, Some(Color::from_hex(0x111111)));
        assert_eq!(host.frame_count(), 2);

        let large = host.scene().get(GearId(0)).unwrap();
        assert!((large.angle() - 0.004).abs() < 1e-6);
    }

    #[test]
    fn resize_updates_aspect_exactly() {
        let (mut host, _) = mounted(800, 600);
        host.resize(Some(SurfaceSize::new(1024, 333)));
        assert_eq!(host.camera().aspect, 1024.0 / 333.0);
        assert_eq!(host.surface(), SurfaceSize::new(1024, 333));
        assert_eq!(host.renderer().sizes.last(), Some(&SurfaceSize::new(1024, 333)));
    }

    #[test]
    fn resize_without_target_is_noop() {
        let (mut host, _) = mounted(800, 600);
        host.resize(None);
        assert_eq!(host.camera().aspect, 800.0 / 600.0);
        assert_eq!(host.renderer().sizes.len(), 1);
    }

    #[test]
    fn zero_height_surface_keeps_projection_finite() {
        let mut host = SceneHost::new(SceneConfig::default(), RecordingRenderer::default());
        host.mount(SurfaceSize { width: 800, height: 0 });
        assert_eq!(host.surface(), SurfaceSize::new(800, 1));
        assert!(host.camera().aspect.is_finite());
        assert!(host.camera().projection_matrix().is_finite());

        host.resize(Some(SurfaceSize { width: 0, height: 0 }));
        assert_eq!(host.camera().aspect, 1.0);
        assert_eq!(host.renderer().sizes.last(), Some(&SurfaceSize::new(1, 1)));

        assert!(host.frame(0.0));
        assert_eq!(host.renderer().draws, 1);
    }

    #[test]
    fn resize_before_mount_is_noop() {
        let mut host = SceneHost::new(SceneConfig::default(), RecordingRenderer::default());
        host.resize(Some(SurfaceSize::new(10, 10)));
        assert!(host.renderer().sizes.is_empty());
    }

    #[test]
    fn frame_before_mount_does_nothing() {
        let mut host = SceneHost::new(SceneConfig::default(), RecordingRenderer::default());
        assert!(!host.frame(0.0));
        assert_eq!(host.renderer().draws, 0);
    }

    #[test]
    fn unmount_stops_frames() {
        let (mut host, _) = mounted(800, 600);
        host.frame(0.0);
        host.mark_loaded();
        assert!(host.is_loaded());

        host.unmount();
        assert_eq!(host.state(), HostState::TornDown);
        assert!(!host.is_loaded());
        assert!(host.scene().is_empty());

        for t in 1..10 {
            assert!(!host.frame(t as f64 * 16.0));
        }
        assert_eq!(host.renderer().draws, 1);
        assert_eq!(host.frame_count(), 1);

        host.resize(Some(SurfaceSize::new(10, 10)));
        assert_eq!(host.renderer().sizes.len(), 1);
    }

    #[test]
    fn unmounted_host_cannot_remount() {
        let (mut host, _) = mounted(800, 600);
        host.unmount();
        assert_eq!(host.mount(SurfaceSize::new(800, 600)), 0);
        assert_eq!(host.state(), HostState::TornDown);
        assert!(host.scene().is_empty());
    }

    #[test]
    fn mark_loaded_requires_running() {
        let mut host = SceneHost::new(SceneConfig::default(), RecordingRenderer::default());
        host.mark_loaded();
        assert!(!host.is_loaded());
    }

    #[cfg(feature = "vectors")]
    #[test]
    fn frame_hands_tessellated_vertices() {
        struct VertexCounter(usize);
        impl Renderer for VertexCounter {
            fn backend(&self) -> &'static str {
                "counter"
            }
            fn draw(&mut self, frame: &FrameData) {
                self.0 = frame.vertex_count();
            }
            fn resize(&mut self, _size: SurfaceSize) {}
        }

        let mut host = SceneHost::new(SceneConfig::default(), VertexCounter(0));
        host.mount(SurfaceSize::new(800, 600));
        host.frame(0.0);
        assert!(host.renderer().0 > 0);
        assert_eq!(host.renderer().0 % 3, 0);
    }
}
