use glam::Vec3;

use crate::animation::{Animate, EasingFunction, TweenProperty};
use crate::options::MotionOptions;

/// Page scroll offset and the section it lands on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    scroll_y: f32,
    current_section: usize,
    section_count: usize,
}

/// A transition between sections caused by one scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionChange {
    /// Section before the event.
    pub previous: usize,
    /// Section after the event.
    pub current: usize,
}

impl ScrollState {
    /// At the top of a page with `section_count` sections (at least one).
    #[must_use]
    pub fn new(section_count: usize) -> Self {
        Self {
            scroll_y: 0.0,
            current_section: 0,
            section_count: section_count.max(1),
        }
    }

    /// Vertical scroll offset in logical pixels.
    #[must_use]
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Index of the section currently in view.
    #[must_use]
    pub fn current_section(&self) -> usize {
        self.current_section
    }

    /// Number of sections on the page.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.section_count
    }

    /// Largest offset that still shows the last section.
    #[must_use]
    pub fn max_scroll(&self, viewport_height: f32) -> f32 {
        (self.section_count - 1) as f32 * viewport_height
    }

    /// Record the offset a page was already at on load.
    ///
    /// The section is left as is and no change is reported; the first
    /// real scroll event derives it.
    pub fn seed(&mut self, scroll_y: f32) {
        self.scroll_y = scroll_y;
    }

    /// Record a new offset and re-derive the section.
    ///
    /// Returns the transition if the section changed; at most one per call.
    pub fn set_scroll(
        &mut self,
        scroll_y: f32,
        viewport_height: f32,
    ) -> Option<SectionChange> {
        self.scroll_y = scroll_y;
        let section =
            section_index(scroll_y, viewport_height, self.section_count);
        if section == self.current_section {
            return None;
        }
        let change = SectionChange {
            previous: self.current_section,
            current: section,
        };
        self.current_section = section;
        Some(change)
    }
}

/// `round(scroll_y / viewport_height)` clamped to the valid section range.
///
/// Rounds half away from zero. Offsets past the last section (overscroll,
/// pages taller than the scene) stay on the last section; negative offsets
/// (elastic overscroll at the top) stay on the first.
#[must_use]
pub fn section_index(
    scroll_y: f32,
    viewport_height: f32,
    section_count: usize,
) -> usize {
    let last = section_count.saturating_sub(1);
    let raw = (scroll_y / viewport_height.max(1.0)).round();
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    if raw > last as f32 {
        log::debug!("section index {raw} past last section {last}, clamped");
        return last;
    }
    raw as usize
}

/// Turns section changes into one-shot spins of the newly current object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionTracker {
    increment: Vec3,
    duration: f32,
    easing: EasingFunction,
}

impl SectionTracker {
    /// Spin parameters from the motion options.
    #[must_use]
    pub fn from_options(motion: &MotionOptions) -> Self {
        Self {
            increment: Vec3::from(motion.section_increment),
            duration: motion.section_duration,
            easing: motion.section_easing,
        }
    }

    /// Apply a scroll offset; on a section change, start the spin of the
    /// new section's object through `animator`.
    pub fn on_scroll<A: Animate>(
        &self,
        scroll: &mut ScrollState,
        scroll_y: f32,
        viewport_height: f32,
        animator: &mut A,
    ) -> Option<SectionChange> {
        let change = scroll.set_scroll(scroll_y, viewport_height)?;
        log::debug!(
            "section {} -> {} (scroll_y {scroll_y})",
            change.previous,
            change.current
        );
        for (property, delta) in [
            (TweenProperty::RotationX, self.increment.x),
            (TweenProperty::RotationY, self.increment.y),
            (TweenProperty::RotationZ, self.increment.z),
        ] {
            let _ = animator.animate(
                change.current,
                property,
                delta,
                self.duration,
                self.easing,
            );
        }
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{TweenHandle, Tweener};

    /// Records every animation request before handing it to a real
    /// tweener.
    #[derive(Default)]
    struct Recorder {
        requests: Vec<(usize, TweenProperty, f32, f32)>,
        inner: Tweener,
    }

    impl Animate for Recorder {
        fn animate(
            &mut self,
            target: usize,
            property: TweenProperty,
            delta: f32,
            duration: f32,
            easing: EasingFunction,
        ) -> TweenHandle {
            self.requests.push((target, property, delta, duration));
            self.inner.animate(target, property, delta, duration, easing)
        }
    }

    #[test]
    fn reference_sequence_at_800px() {
        let tracker = SectionTracker::from_options(&MotionOptions::default());
        let mut scroll = ScrollState::new(3);
        let mut recorder = Recorder::default();

        let mut sections = Vec::new();
        let mut triggers = Vec::new();
        for y in [0.0, 750.0, 850.0, 1600.0] {
            let change =
                tracker.on_scroll(&mut scroll, y, 800.0, &mut recorder);
            sections.push(scroll.current_section());
            triggers.push(change.is_some());
        }

        assert_eq!(sections, [0, 1, 1, 2]);
        assert_eq!(triggers, [false, true, false, true]);
        // One spin (three axes) per transition.
        assert_eq!(recorder.requests.len(), 6);
        assert_eq!(
            recorder.requests[0],
            (1, TweenProperty::RotationX, 3.0, 1.5)
        );
        assert_eq!(
            recorder.requests[1],
            (1, TweenProperty::RotationY, 6.0, 1.5)
        );
        assert_eq!(
            recorder.requests[5],
            (2, TweenProperty::RotationZ, 1.5, 1.5)
        );
    }

    #[test]
    fn index_tracks_rounded_ratio_for_any_sequence() {
        let tracker = SectionTracker::from_options(&MotionOptions::default());
        let mut scroll = ScrollState::new(3);
        let mut recorder = Recorder::default();
        let height = 720.0;
        let mut transitions = 0;
        let mut last = scroll.current_section();

        let offsets = [
            10.0, 400.0, 359.0, 361.0, 1440.0, 1000.0, 0.0, 1079.0, 1081.0,
            720.0, 2.0,
        ];
        for y in offsets {
            let _ = tracker.on_scroll(&mut scroll, y, height, &mut recorder);
            let expected = (y / height).round() as usize;
            assert_eq!(scroll.current_section(), expected, "scroll_y {y}");
            if expected != last {
                transitions += 1;
                last = expected;
            }
        }
        assert_eq!(recorder.requests.len(), transitions * 3);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(section_index(400.0, 800.0, 3), 1);
        assert_eq!(section_index(399.0, 800.0, 3), 0);
        assert_eq!(section_index(1200.0, 800.0, 3), 2);
    }

    #[test]
    fn out_of_range_offsets_clamp() {
        assert_eq!(section_index(-500.0, 800.0, 3), 0);
        assert_eq!(section_index(10_000.0, 800.0, 3), 2);
        assert_eq!(section_index(f32::NAN, 800.0, 3), 0);
        assert_eq!(section_index(100.0, 0.0, 3), 2);
    }

    #[test]
    fn overscroll_past_last_section_does_not_retrigger() {
        let tracker = SectionTracker::from_options(&MotionOptions::default());
        let mut scroll = ScrollState::new(3);
        let mut recorder = Recorder::default();
        let _ = tracker.on_scroll(&mut scroll, 1600.0, 800.0, &mut recorder);
        let _ = tracker.on_scroll(&mut scroll, 2400.0, 800.0, &mut recorder);
        let _ = tracker.on_scroll(&mut scroll, 4000.0, 800.0, &mut recorder);
        assert_eq!(scroll.current_section(), 2);
        assert_eq!(recorder.requests.len(), 3);
        assert_eq!(scroll.scroll_y(), 4000.0);
    }

    #[test]
    fn seeded_offset_does_not_change_section() {
        let tracker = SectionTracker::from_options(&MotionOptions::default());
        let mut scroll = ScrollState::new(3);
        let mut recorder = Recorder::default();
        scroll.seed(1600.0);
        assert_eq!(scroll.scroll_y(), 1600.0);
        assert_eq!(scroll.current_section(), 0);

        // The next scroll event on the same page spins the section once.
        let change =
            tracker.on_scroll(&mut scroll, 1610.0, 800.0, &mut recorder);
        assert_eq!(
            change,
            Some(SectionChange {
                previous: 0,
                current: 2
            })
        );
        assert_eq!(recorder.requests.len(), 3);
    }

    #[test]
    fn max_scroll_shows_last_section() {
        let scroll = ScrollState::new(3);
        assert_eq!(scroll.max_scroll(800.0), 1600.0);
        assert_eq!(ScrollState::new(0).section_count(), 1);
    }
}
