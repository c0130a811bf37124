/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// applies them to the [`SceneState`](crate::state::SceneState).
///
/// # Example
///
/// ```ignore
/// let response = input_processor.handle_event(
///     &mut state,
///     InputEvent::CursorMoved { x: 100.0, y: 200.0 },
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window or canvas size changed.
    Resized {
        /// New width in logical pixels.
        width: f32,
        /// New height in logical pixels.
        height: f32,
        /// Host device pixel ratio (before capping).
        device_pixel_ratio: f32,
    },
    /// The page scrolled to an absolute offset (web hosts).
    Scrolled {
        /// Vertical scroll offset in logical pixels.
        offset: f32,
    },
    /// Mouse wheel turned (native hosts scroll a virtual page).
    Wheel {
        /// Wheel movement.
        delta: WheelDelta,
    },
    /// Cursor moved to absolute window position.
    CursorMoved {
        /// Horizontal position in logical pixels.
        x: f32,
        /// Vertical position in logical pixels.
        y: f32,
    },
}

/// Wheel movement. Positive values scroll toward the top of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelDelta {
    /// Notched wheel, in lines.
    Lines(f32),
    /// Touchpad or smooth wheel, in logical pixels.
    Pixels(f32),
}

#[cfg(feature = "viewer")]
impl WheelDelta {
    /// Convert a winit delta; pixel deltas are divided by the window's
    /// scale factor.
    #[must_use]
    pub fn from_winit(
        delta: winit::event::MouseScrollDelta,
        scale_factor: f64,
    ) -> Self {
        match delta {
            winit::event::MouseScrollDelta::LineDelta(_, y) => Self::Lines(y),
            winit::event::MouseScrollDelta::PixelDelta(pos) => {
                Self::Pixels((pos.y / scale_factor.max(f64::EPSILON)) as f32)
            }
        }
    }
}
