//! The scene engine: GPU context, renderer, scene state and frame loop.
//!
//! Hosts (the native [`Viewer`](crate::viewer::Viewer), the web entry)
//! feed platform events to [`SceneEngine::handle_input`] and call
//! [`SceneEngine::frame`] once per display refresh.

/// Per-frame camera and rotation update.
pub mod frame;
/// Explicit frame-loop driver with a stop signal.
pub mod run_loop;

pub use frame::FrameUpdater;
pub use run_loop::{LoopControl, RunLoop, StopHandle};

use crate::error::SceneError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::GradientLoader;
use crate::input::{InputEvent, InputProcessor, InputResponse};
use crate::options::Options;
use crate::renderer::SceneRenderer;
use crate::scene::{
    field_changed, generate_particles, SceneContent, SECTION_COUNT,
};
use crate::state::{FrameClock, SceneState};
use crate::util::frame_timing::FrameTiming;

/// Seconds between FPS debug logs.
const FPS_REPORT_INTERVAL: f32 = 5.0;

/// GPU-backed scene: owns the surface, the renderer and all scene state.
pub struct SceneEngine {
    context: RenderContext,
    renderer: SceneRenderer,
    state: SceneState,
    run_loop: RunLoop<FrameClock>,
    input: InputProcessor,
    options: Options,
    gradient_loader: Option<GradientLoader>,
    frame_timing: FrameTiming,
}

impl SceneEngine {
    /// Create the engine on `target` (a window or canvas) of the given
    /// logical size and device pixel ratio.
    ///
    /// Starts loading the configured gradient texture in the background;
    /// the procedural three-tone ramp is used until it arrives.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Gpu`] if the GPU context cannot be created.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (f32, f32),
        device_pixel_ratio: f32,
        options: Options,
    ) -> Result<Self, SceneError> {
        let state =
            SceneState::new(&options, size.0, size.1, device_pixel_ratio);
        let context =
            RenderContext::new(target, state.viewport.surface_size()).await?;

        let content = SceneContent::build(&options);
        let renderer = SceneRenderer::new(&context, &content, &options);

        let gradient_loader =
            start_gradient_loader(&options.display.gradient_texture);

        Ok(Self {
            context,
            renderer,
            run_loop: RunLoop::new(
                FrameClock::new(),
                FrameUpdater::from_options(&options.motion),
            ),
            input: InputProcessor::from_options(&options.display),
            state,
            options,
            gradient_loader,
            frame_timing: FrameTiming::new(FPS_REPORT_INTERVAL),
        })
    }

    /// Let the wheel drive a virtual scroll offset. Native hosts enable
    /// this; browser hosts report the page's own offset instead.
    pub fn set_virtual_scroll(&mut self, enabled: bool) {
        self.input = self.input.with_virtual_scroll(enabled);
    }

    /// Record the page offset at load time without spinning the section
    /// it lands on.
    pub fn seed_scroll(&mut self, offset: f32) {
        self.state.scroll.seed(offset);
    }

    /// Apply one input event; resizes the surface when needed.
    pub fn handle_input(&mut self, event: InputEvent) -> InputResponse {
        let response = self.input.handle_event(&mut self.state, event);
        if let InputResponse::Resized { width, height } = response {
            self.context.resize(width, height);
            self.renderer.resize(&self.context);
        }
        response
    }

    /// Advance and draw one frame.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    ///
    /// # Errors
    ///
    /// Returns any other [`wgpu::SurfaceError`]; the host logs it and keeps
    /// scheduling frames.
    pub fn frame(&mut self) -> Result<LoopControl, wgpu::SurfaceError> {
        self.poll_gradient();
        let _ = self.run_loop.tick(&mut self.state);
        self.renderer.prepare(&self.context.queue, &self.state);

        match self.renderer.render(&self.context) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost or outdated, reconfiguring");
                self.context.reconfigure();
            }
            Err(e) => return Err(e),
        }

        if let Some(fps) = self.frame_timing.end_frame() {
            log::debug!(
                "{fps:.1} fps, section {}",
                self.state.scroll.current_section()
            );
        }
        Ok(self.run_loop.control())
    }

    fn poll_gradient(&mut self) {
        let Some(loader) = self.gradient_loader.as_mut() else {
            return;
        };
        let Some(result) = loader.try_recv() else {
            return;
        };
        match result {
            Ok(image) => {
                self.renderer.set_gradient(&self.context, &image);
                let (width, height) = self.renderer.gradient_size();
                log::info!("Loaded texture {} ({width}x{height})", loader.path());
            }
            Err(e) => log::warn!(
                "failed to load texture {}: {e}, keeping three-tone ramp",
                loader.path()
            ),
        }
        self.gradient_loader = None;
    }

    /// Current scene state.
    #[must_use]
    pub fn state(&self) -> &SceneState {
        &self.state
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options and apply them without resetting motion.
    ///
    /// Colors and particle size are rewritten in place; a changed particle
    /// layout is re-scattered and a changed gradient path is reloaded.
    pub fn set_options(&mut self, options: Options) {
        self.renderer.apply_options(&self.context.queue, &options);
        if field_changed(
            (&self.options.particles, &self.options.motion),
            (&options.particles, &options.motion),
        ) {
            let positions = generate_particles(
                &options.particles,
                &options.motion,
                SECTION_COUNT,
            );
            log::debug!("re-scattered {} particles", positions.len());
            self.renderer.set_particles(&self.context, &positions);
        }
        if options.display.gradient_texture
            != self.options.display.gradient_texture
        {
            self.gradient_loader =
                start_gradient_loader(&options.display.gradient_texture);
        }
        self.state.configure(&options);
        self.run_loop
            .set_updater(FrameUpdater::from_options(&options.motion));
        self.input = InputProcessor::from_options(&options.display)
            .with_virtual_scroll(self.input.virtual_scroll());
        let (width, height) = self.state.viewport.surface_size();
        if (width, height) != self.context.size() {
            self.context.resize(width, height);
            self.renderer.resize(&self.context);
        }
        self.options = options;
    }

    /// Handle that ends the frame loop.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.run_loop.stop_handle()
    }

    /// Surface size in physical pixels.
    #[must_use]
    pub fn surface_size(&self) -> (u32, u32) {
        self.context.size()
    }
}

fn start_gradient_loader(path: &str) -> Option<GradientLoader> {
    match GradientLoader::spawn(path) {
        Ok(loader) => Some(loader),
        Err(e) => {
            log::warn!("gradient texture not loaded: {e}");
            None
        }
    }
}
