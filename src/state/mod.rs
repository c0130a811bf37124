//! Mutable scene context shared by the input handlers and the frame loop.
//!
//! Everything a handler writes lives in [`SceneState`] and is passed in by
//! reference; there are no globals. Resize, scroll and pointer handlers
//! each touch their own slice, and the frame update only reads those
//! slices while writing the camera rig and object rotations.

/// Elapsed-time sources and per-frame delta tracking.
pub mod clock;
/// Normalized cursor offset.
pub mod cursor;
/// Scroll offset, section index and the section-change tracker.
pub mod scroll;
/// Window size and pixel ratio.
pub mod viewport;

pub use clock::{ClockState, FixedStepClock, FrameClock, TimeSource};
pub use cursor::CursorState;
pub use scroll::{section_index, ScrollState, SectionChange, SectionTracker};
pub use viewport::Viewport;

use crate::animation::Tweener;
use crate::camera::CameraRig;
use crate::options::Options;
use crate::scene::{layout_sections, SectionObject, SECTION_COUNT};

/// The whole mutable state of a running scene.
#[derive(Debug)]
pub struct SceneState {
    /// Window size and pixel ratio.
    pub viewport: Viewport,
    /// Scroll offset and current section.
    pub scroll: ScrollState,
    /// Normalized cursor offset.
    pub cursor: CursorState,
    /// Previous frame time.
    pub clock: ClockState,
    /// Camera group and camera.
    pub rig: CameraRig,
    /// One object per section.
    pub sections: Vec<SectionObject>,
    /// In-flight section-change spins.
    pub tweens: Tweener,
    /// Spin parameters used on section changes.
    pub tracker: SectionTracker,
}

impl SceneState {
    /// Fresh state for a viewport of `width` x `height` logical pixels.
    #[must_use]
    pub fn new(
        options: &Options,
        width: f32,
        height: f32,
        device_pixel_ratio: f32,
    ) -> Self {
        let viewport = Viewport::new(
            width,
            height,
            device_pixel_ratio,
            options.display.max_pixel_ratio,
        );
        let rig = CameraRig::new(&options.camera, viewport.aspect());
        Self {
            viewport,
            scroll: ScrollState::new(SECTION_COUNT),
            cursor: CursorState::default(),
            clock: ClockState::default(),
            rig,
            sections: layout_sections(&options.motion),
            tweens: Tweener::new(),
            tracker: SectionTracker::from_options(&options.motion),
        }
    }

    /// Apply a new window size and device pixel ratio.
    pub fn resize(
        &mut self,
        width: f32,
        height: f32,
        device_pixel_ratio: f32,
        max_pixel_ratio: f32,
    ) {
        self.viewport
            .resize(width, height, device_pixel_ratio, max_pixel_ratio);
        self.rig.set_aspect(self.viewport.aspect());
    }

    /// Pick up changed options without resetting motion.
    ///
    /// Object rotations, scroll and cursor state are kept; section
    /// positions, camera projection and spin parameters are refreshed.
    pub fn configure(&mut self, options: &Options) {
        let fresh = layout_sections(&options.motion);
        for (object, layout) in self.sections.iter_mut().zip(fresh) {
            object.position = layout.position;
        }
        self.rig.configure(&options.camera);
        self.tracker = SectionTracker::from_options(&options.motion);
        let (width, height) = (self.viewport.width(), self.viewport.height());
        let dpr = self.viewport.device_pixel_ratio();
        self.resize(width, height, dpr, options.display.max_pixel_ratio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_matches_options() {
        let options = Options::default();
        let state = SceneState::new(&options, 1280.0, 720.0, 3.0);
        assert_eq!(state.sections.len(), SECTION_COUNT);
        assert_eq!(state.scroll.current_section(), 0);
        assert_eq!(state.viewport.pixel_ratio(), 2.0);
        assert_eq!(state.rig.camera().aspect, 1280.0 / 720.0);
    }

    #[test]
    fn configure_keeps_rotation() {
        let mut options = Options::default();
        let mut state = SceneState::new(&options, 800.0, 600.0, 1.0);
        state.sections[1].rotation.y = 2.5;

        options.motion.object_spacing = 5.0;
        state.configure(&options);
        assert_eq!(state.sections[1].rotation.y, 2.5);
        assert_eq!(state.sections[1].position.y, -5.0);
    }
}
