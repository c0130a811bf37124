use web_time::Instant;

/// Source of elapsed seconds since the loop started.
pub trait TimeSource {
    /// Seconds elapsed since start; never decreases.
    fn elapsed(&mut self) -> f32;
}

/// Wall clock backed by `web_time::Instant` (`performance.now()` on wasm).
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    /// Clock starting now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for FrameClock {
    fn elapsed(&mut self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Deterministic clock that advances a fixed step on every read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStepClock {
    step: f32,
    now: f32,
}

impl FixedStepClock {
    /// Clock that reports `step`, `2 * step`, ... on successive reads.
    #[must_use]
    pub fn new(step: f32) -> Self {
        Self { step, now: 0.0 }
    }
}

impl TimeSource for FixedStepClock {
    fn elapsed(&mut self) -> f32 {
        self.now += self.step;
        self.now
    }
}

/// Previous frame's elapsed time, for computing frame deltas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClockState {
    previous_elapsed: f32,
}

impl ClockState {
    /// Record `elapsed` and return the time since the previous frame.
    ///
    /// A source that jumps backwards yields a zero delta rather than a
    /// negative one.
    pub fn advance(&mut self, elapsed: f32) -> f32 {
        let delta = (elapsed - self.previous_elapsed).max(0.0);
        self.previous_elapsed = self.previous_elapsed.max(elapsed);
        delta
    }

    /// Elapsed time recorded by the last [`advance`](Self::advance).
    #[must_use]
    pub fn previous_elapsed(&self) -> f32 {
        self.previous_elapsed
    }
}
