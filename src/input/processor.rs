//! Applies platform events to the scene state.
//!
//! The `InputProcessor` is the only thing that sits between raw window
//! events and the [`SceneState`]. Each event writes its own slice of the
//! state: resize the viewport and camera aspect, scroll the scroll offset
//! (then runs the section tracker), cursor the normalized cursor.

use super::event::{InputEvent, WheelDelta};
use crate::state::{SceneState, SectionChange};

/// What the host needs to do after an event was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResponse {
    /// Nothing beyond the next redraw.
    None,
    /// The render surface must be resized to this physical size.
    Resized {
        /// Surface width in physical pixels.
        width: u32,
        /// Surface height in physical pixels.
        height: u32,
    },
    /// A new section became current and its spin started.
    SectionChanged(SectionChange),
}

/// Routes [`InputEvent`]s into a [`SceneState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputProcessor {
    /// Logical pixels per wheel line.
    line_height: f32,
    /// Cap on the device pixel ratio.
    max_pixel_ratio: f32,
    /// The scroll offset is owned here (wheel driven) rather than by a
    /// host page, so it must stay inside the page extent on resize.
    virtual_scroll: bool,
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new(100.0, 2.0)
    }
}

impl InputProcessor {
    /// Processor with the given wheel line height and pixel ratio cap.
    #[must_use]
    pub fn new(line_height: f32, max_pixel_ratio: f32) -> Self {
        Self {
            line_height,
            max_pixel_ratio,
            virtual_scroll: false,
        }
    }

    /// Treat the scroll offset as virtual (native hosts without a page).
    #[must_use]
    pub fn with_virtual_scroll(mut self, enabled: bool) -> Self {
        self.virtual_scroll = enabled;
        self
    }

    /// Whether the scroll offset is virtual.
    #[must_use]
    pub fn virtual_scroll(&self) -> bool {
        self.virtual_scroll
    }

    /// Processor configured from the display options.
    #[must_use]
    pub fn from_options(display: &crate::options::DisplayOptions) -> Self {
        Self::new(display.scroll_line_height, display.max_pixel_ratio)
    }

    /// Apply one event to `state`.
    pub fn handle_event(
        &self,
        state: &mut SceneState,
        event: InputEvent,
    ) -> InputResponse {
        match event {
            InputEvent::Resized {
                width,
                height,
                device_pixel_ratio,
            } => {
                state.resize(
                    width,
                    height,
                    device_pixel_ratio,
                    self.max_pixel_ratio,
                );
                if self.virtual_scroll {
                    let max = state.scroll.max_scroll(state.viewport.height());
                    if state.scroll.scroll_y() > max {
                        let _ = Self::scroll_to(state, max);
                    }
                }
                let (width, height) = state.viewport.surface_size();
                log::debug!(
                    "resized to {width}x{height} (pixel ratio {})",
                    state.viewport.pixel_ratio()
                );
                InputResponse::Resized { width, height }
            }
            InputEvent::Scrolled { offset } => Self::scroll_to(state, offset),
            InputEvent::Wheel { delta } => {
                let pixels = match delta {
                    WheelDelta::Lines(lines) => lines * self.line_height,
                    WheelDelta::Pixels(pixels) => pixels,
                };
                let max = state.scroll.max_scroll(state.viewport.height());
                let offset = (state.scroll.scroll_y() - pixels).clamp(0.0, max);
                Self::scroll_to(state, offset)
            }
            InputEvent::CursorMoved { x, y } => {
                state.cursor.update(x, y, &state.viewport);
                InputResponse::None
            }
        }
    }

    fn scroll_to(state: &mut SceneState, offset: f32) -> InputResponse {
        let height = state.viewport.height();
        let tracker = state.tracker;
        match tracker.on_scroll(
            &mut state.scroll,
            offset,
            height,
            &mut state.tweens,
        ) {
            Some(change) => InputResponse::SectionChanged(change),
            None => InputResponse::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    fn state() -> SceneState {
        SceneState::new(&Options::default(), 1000.0, 800.0, 1.0)
    }

    #[test]
    fn resize_reports_capped_surface_size() {
        let processor = InputProcessor::default();
        let mut state = state();
        let response = processor.handle_event(
            &mut state,
            InputEvent::Resized {
                width: 640.0,
                height: 480.0,
                device_pixel_ratio: 3.0,
            },
        );
        assert_eq!(
            response,
            InputResponse::Resized {
                width: 1280,
                height: 960
            }
        );
        assert_eq!(state.rig.camera().aspect, 640.0 / 480.0);
    }

    #[test]
    fn scroll_starts_spin_on_new_section() {
        let processor = InputProcessor::default();
        let mut state = state();
        let response = processor
            .handle_event(&mut state, InputEvent::Scrolled { offset: 750.0 });
        assert_eq!(
            response,
            InputResponse::SectionChanged(SectionChange {
                previous: 0,
                current: 1
            })
        );
        assert_eq!(state.tweens.active_count(), 3);

        let response = processor
            .handle_event(&mut state, InputEvent::Scrolled { offset: 850.0 });
        assert_eq!(response, InputResponse::None);
        assert_eq!(state.tweens.active_count(), 3);
    }

    #[test]
    fn wheel_scrolls_virtual_page_within_bounds() {
        let processor = InputProcessor::new(100.0, 2.0);
        let mut state = state();

        let _ = processor.handle_event(
            &mut state,
            InputEvent::Wheel {
                delta: WheelDelta::Lines(-3.0),
            },
        );
        assert_eq!(state.scroll.scroll_y(), 300.0);

        let _ = processor.handle_event(
            &mut state,
            InputEvent::Wheel {
                delta: WheelDelta::Pixels(1000.0),
            },
        );
        assert_eq!(state.scroll.scroll_y(), 0.0);

        let _ = processor.handle_event(
            &mut state,
            InputEvent::Wheel {
                delta: WheelDelta::Lines(-100.0),
            },
        );
        assert_eq!(state.scroll.scroll_y(), 1600.0);
        assert_eq!(state.scroll.current_section(), 2);
    }

    #[test]
    fn shrinking_window_pulls_virtual_scroll_back_onto_page() {
        let processor = InputProcessor::default().with_virtual_scroll(true);
        let mut state = state();
        let _ = processor.handle_event(
            &mut state,
            InputEvent::Wheel {
                delta: WheelDelta::Lines(-100.0),
            },
        );
        assert_eq!(state.scroll.scroll_y(), 1600.0);

        let _ = processor.handle_event(
            &mut state,
            InputEvent::Resized {
                width: 1000.0,
                height: 400.0,
                device_pixel_ratio: 1.0,
            },
        );
        assert_eq!(state.scroll.scroll_y(), 800.0);
        assert_eq!(state.scroll.current_section(), 2);

        // The camera ends up level with the last section, not below it.
        let options = Options::default();
        crate::engine::FrameUpdater::from_options(&options.motion)
            .update(&mut state, 0.016);
        let last = state.sections[2].position.y;
        assert_eq!(state.rig.camera_height(), last);
    }

    #[test]
    fn page_scroll_is_left_alone_on_resize() {
        let processor = InputProcessor::default();
        let mut state = state();
        let _ = processor
            .handle_event(&mut state, InputEvent::Scrolled { offset: 1600.0 });
        let _ = processor.handle_event(
            &mut state,
            InputEvent::Resized {
                width: 1000.0,
                height: 400.0,
                device_pixel_ratio: 1.0,
            },
        );
        assert_eq!(state.scroll.scroll_y(), 1600.0);
    }

    #[test]
    fn cursor_is_normalized_against_viewport() {
        let processor = InputProcessor::default();
        let mut state = state();
        let _ = processor.handle_event(
            &mut state,
            InputEvent::CursorMoved { x: 750.0, y: 200.0 },
        );
        assert_eq!(state.cursor.x, 0.25);
        assert_eq!(state.cursor.y, -0.25);
    }
}
