//! Standalone window backed by winit.
//!
//! Native windows have no page to scroll, so the mouse wheel drives a
//! virtual scroll offset clamped to the extent of the sections. When the
//! `gui` feature is enabled, a wry webview options panel is created on top
//! of the scene.
//!
//! ```no_run
//! # use toonscroll::Viewer;
//! Viewer::builder()
//!     .with_title("toonscroll")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    engine::{LoopControl, SceneEngine},
    error::SceneError,
    input::{InputEvent, WheelDelta},
    options::Options,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "toonscroll",
    /// default options).
    fn new() -> Self {
        Self {
            options: None,
            title: "toonscroll".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the scroll scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed or Escape is pressed.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Viewer`] if the event loop cannot be created
    /// or exits with an error.
    pub fn run(self) -> Result<(), SceneError> {
        let event_loop =
            EventLoop::new().map_err(|e| SceneError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            options: Some(self.options),
            title: self.title,
            #[cfg(feature = "gui")]
            panel: crate::gui::panel::PanelController::new(),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| SceneError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<SceneEngine>,
    options: Option<Options>,
    title: String,
    #[cfg(feature = "gui")]
    panel: crate::gui::panel::PanelController,
}

/// Logical size and scale factor of a physical window size.
fn logical_size(inner: PhysicalSize<u32>, scale: f64) -> (f32, f32) {
    let logical = inner.to_logical::<f64>(scale);
    (logical.width as f32, logical.height as f32)
}

impl ViewerApp {
    fn resize_event(window: &Window) -> InputEvent {
        let scale = window.scale_factor();
        let (width, height) = logical_size(window.inner_size(), scale);
        InputEvent::Resized {
            width,
            height,
            device_pixel_ratio: scale as f32,
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let scale = window.scale_factor();
        let size = logical_size(window.inner_size(), scale);
        let options = self.options.take().unwrap_or_default();

        let mut engine = match pollster::block_on(SceneEngine::new(
            window.clone(),
            size,
            scale as f32,
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        engine.set_virtual_scroll(true);

        #[cfg(feature = "gui")]
        self.panel.init_webview(&window, &engine);

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        let (Some(window), Some(engine)) = (&self.window, &mut self.engine)
        else {
            return;
        };

        match event {
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                let _ = engine.handle_input(Self::resize_event(window));
                #[cfg(feature = "gui")]
                self.panel.apply_layout(window);
            }

            WindowEvent::RedrawRequested => {
                #[cfg(feature = "gui")]
                self.panel.drain_and_apply(engine, window);

                match engine.frame() {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Stop) => {
                        event_loop.exit();
                        return;
                    }
                    Err(e) => {
                        log::error!("render error: {e:?}");
                    }
                }
                window.request_redraw();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(window.scale_factor());
                let _ = engine.handle_input(InputEvent::CursorMoved {
                    x: logical.x as f32,
                    y: logical.y as f32,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let _ = engine.handle_input(InputEvent::Wheel {
                    delta: WheelDelta::from_winit(delta, window.scale_factor()),
                });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                match code {
                    KeyCode::Escape => engine.stop_handle().stop(),
                    // Toggle the options panel with backslash
                    #[cfg(feature = "gui")]
                    KeyCode::Backslash => self.panel.toggle(window),
                    _ => {}
                }
            }

            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_size_is_scaled_to_logical() {
        let size = logical_size(PhysicalSize::new(2560, 1440), 2.0);
        assert_eq!(size, (1280.0, 720.0));
    }

    #[test]
    fn builder_defaults() {
        let viewer = Viewer::builder().with_title("demo").build();
        assert_eq!(viewer.title, "demo");
        assert_eq!(viewer.options, Options::default());
    }
}
