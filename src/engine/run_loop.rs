//! Explicit driver for the frame loop.
//!
//! Each [`tick`](RunLoop::tick) reads the clock, steps the in-flight
//! tweens and runs the [`FrameUpdater`]. The host decides when ticks
//! happen (redraw requests, `requestAnimationFrame`, or a plain loop in
//! tests) and can stop the loop through a [`StopHandle`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::frame::FrameUpdater;
use crate::state::{SceneState, TimeSource};

/// Whether the host should schedule another frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Keep going.
    Continue,
    /// Stop was requested.
    Stop,
}

/// Cloneable signal that ends a [`RunLoop`].
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Ask the loop to stop after the current frame.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether a stop was requested.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Frame loop over a [`TimeSource`].
#[derive(Debug)]
pub struct RunLoop<C: TimeSource> {
    clock: C,
    updater: FrameUpdater,
    stop: StopHandle,
    frame_count: u64,
}

impl<C: TimeSource> RunLoop<C> {
    /// Loop reading time from `clock`.
    #[must_use]
    pub fn new(clock: C, updater: FrameUpdater) -> Self {
        Self {
            clock,
            updater,
            stop: StopHandle::default(),
            frame_count: 0,
        }
    }

    /// Handle that stops this loop.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Frames ticked so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Replace the frame updater (after options change).
    pub fn set_updater(&mut self, updater: FrameUpdater) {
        self.updater = updater;
    }

    /// Advance one frame. Returns the frame delta in seconds.
    pub fn tick(&mut self, state: &mut SceneState) -> f32 {
        let delta = state.clock.advance(self.clock.elapsed());
        state.tweens.step(delta, &mut state.sections);
        self.updater.update(state, delta);
        self.frame_count += 1;
        delta
    }

    /// Whether the host should schedule another frame.
    #[must_use]
    pub fn control(&self) -> LoopControl {
        if self.stop.is_stopped() {
            LoopControl::Stop
        } else {
            LoopControl::Continue
        }
    }

    /// Tick until stopped, calling `render` after every frame.
    ///
    /// Only useful for hosts without their own redraw scheduling (headless
    /// runs and tests); windowed hosts call [`tick`](Self::tick) from
    /// their redraw callback instead.
    pub fn run<F>(&mut self, state: &mut SceneState, mut render: F)
    where
        F: FnMut(&SceneState, u64),
    {
        while self.control() == LoopControl::Continue {
            let _ = self.tick(state);
            render(state, self.frame_count);
        }
        log::debug!("run loop stopped after {} frames", self.frame_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, InputProcessor};
    use crate::options::Options;
    use crate::state::FixedStepClock;

    fn setup(step: f32) -> (RunLoop<FixedStepClock>, SceneState) {
        let options = Options::default();
        let run_loop = RunLoop::new(
            FixedStepClock::new(step),
            FrameUpdater::from_options(&options.motion),
        );
        (run_loop, SceneState::new(&options, 1000.0, 800.0, 1.0))
    }

    #[test]
    fn stops_after_requested_frame() {
        let (mut run_loop, mut state) = setup(0.016);
        let stop = run_loop.stop_handle();
        let mut rendered = Vec::new();
        run_loop.run(&mut state, |_, frame| {
            rendered.push(frame);
            if frame == 10 {
                stop.stop();
            }
        });
        assert_eq!(rendered, (1..=10).collect::<Vec<_>>());
        assert_eq!(run_loop.frame_count(), 10);
        assert_eq!(run_loop.control(), LoopControl::Stop);
    }

    #[test]
    fn tick_uses_clock_delta() {
        let (mut run_loop, mut state) = setup(0.25);
        assert_eq!(run_loop.tick(&mut state), 0.25);
        assert_eq!(run_loop.tick(&mut state), 0.25);
        assert!((state.sections[0].rotation.x - 0.1).abs() < 1e-6);
    }

    #[test]
    fn scroll_spin_completes_through_ticks() {
        let (mut run_loop, mut state) = setup(1.0 / 60.0);
        let processor = InputProcessor::default();
        let _ = processor
            .handle_event(&mut state, InputEvent::Scrolled { offset: 800.0 });
        // Re-trigger before the first spin finishes.
        for _ in 0..30 {
            let _ = run_loop.tick(&mut state);
        }
        let _ = processor
            .handle_event(&mut state, InputEvent::Scrolled { offset: 0.0 });
        let _ = processor
            .handle_event(&mut state, InputEvent::Scrolled { offset: 800.0 });
        for _ in 0..150 {
            let _ = run_loop.tick(&mut state);
        }
        assert_eq!(state.tweens.active_count(), 0);

        let elapsed = state.clock.previous_elapsed();
        let object = state.sections[1];
        // Two spins of (3, 6, 1.5) plus the ambient rotation.
        assert!((object.rotation.x - (6.0 + 0.2 * elapsed)).abs() < 1e-3);
        assert!((object.rotation.y - (12.0 + 0.12 * elapsed)).abs() < 1e-3);
        assert!((object.rotation.z - 3.0).abs() < 1e-3);
        // Scrolling back to the top spun section 0 once.
        assert!((state.sections[0].rotation.z - 1.5).abs() < 1e-3);
    }
}
