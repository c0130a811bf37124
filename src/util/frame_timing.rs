use web_time::Instant;

/// Smoothed FPS with a periodic report for debug logging.
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    /// Seconds between reports
    report_interval: f32,
    /// Seconds accumulated since the last report
    since_report: f32,
}

impl FrameTiming {
    /// Create a frame timer that reports every `report_interval` seconds.
    #[must_use]
    pub fn new(report_interval: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,    // 5% new value, 95% old value
            report_interval,
            since_report: 0.0,
        }
    }

    /// Call after rendering. Returns the smoothed FPS when a report is due.
    pub fn end_frame(&mut self) -> Option<f32> {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.record(frame_time)
    }

    /// Fold one frame time (seconds) into the average.
    pub fn record(&mut self, frame_time: f32) -> Option<f32> {
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        self.since_report += frame_time.max(0.0);
        if self.since_report >= self.report_interval {
            self.since_report = 0.0;
            Some(self.smoothed_fps)
        } else {
            None
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_to_steady_rate() {
        let mut timing = FrameTiming::new(1000.0);
        for _ in 0..500 {
            let _ = timing.record(1.0 / 30.0);
        }
        assert!((timing.fps() - 30.0).abs() < 0.1);
    }

    #[test]
    fn reports_once_per_interval() {
        let mut timing = FrameTiming::new(1.0);
        let reports: Vec<bool> =
            (0..8).map(|_| timing.record(0.25).is_some()).collect();
        assert_eq!(
            reports,
            [false, false, false, true, false, false, false, true]
        );
    }
}
