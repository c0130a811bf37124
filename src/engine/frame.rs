//! Per-frame update of the camera rig and section rotations.

use glam::Vec2;

use crate::options::MotionOptions;
use crate::state::SceneState;

/// The recurring per-frame update.
///
/// Reads scroll, cursor and viewport; writes camera height, the parallax
/// group position, and the ambient spin of every section object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUpdater {
    object_spacing: f32,
    parallax_amount: f32,
    smoothing: f32,
    rotation_rates: [f32; 2],
}

impl FrameUpdater {
    /// Updater configured from the motion options.
    #[must_use]
    pub fn from_options(motion: &MotionOptions) -> Self {
        Self {
            object_spacing: motion.object_spacing,
            parallax_amount: motion.parallax_amount,
            smoothing: motion.parallax_smoothing,
            rotation_rates: motion.rotation_rates,
        }
    }

    /// Advance the scene by `delta` seconds.
    pub fn update(&self, state: &mut SceneState, delta: f32) {
        let delta = delta.max(0.0);

        let camera_y = -state.scroll.scroll_y() / state.viewport.height()
            * self.object_spacing;
        state.rig.set_camera_height(camera_y);

        let target = Vec2::new(
            state.cursor.x * self.parallax_amount,
            -state.cursor.y * self.parallax_amount,
        );
        // A factor above 1 would overshoot and diverge on long frames.
        let factor = (self.smoothing * delta).min(1.0);
        state.rig.approach_parallax(target, factor);

        let [rate_x, rate_y] = self.rotation_rates;
        for object in &mut state.sections {
            object.rotation.x += delta * rate_x;
            object.rotation.y += delta * rate_y;
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::animation::{Animate, EasingFunction, TweenProperty};
    use crate::options::Options;

    fn setup() -> (FrameUpdater, SceneState) {
        let options = Options::default();
        (
            FrameUpdater::from_options(&options.motion),
            SceneState::new(&options, 1000.0, 800.0, 1.0),
        )
    }

    /// Run at a fixed frame time and record the group x position per frame.
    fn converge(dt: f32, secs: f32) -> (Vec3, Vec<f32>) {
        let (updater, mut state) = setup();
        state.cursor.x = 0.3;
        state.cursor.y = -0.4;
        let frames = (secs / dt).round() as usize;
        let mut path = Vec::with_capacity(frames);
        for _ in 0..frames {
            updater.update(&mut state, dt);
            path.push(state.rig.group_position().x);
        }
        (state.rig.group_position(), path)
    }

    #[test]
    fn parallax_converges_independent_of_frame_rate() {
        let (fast, fast_path) = converge(0.016, 5.0);
        let (slow, slow_path) = converge(0.033, 5.0);
        let target = Vec3::new(0.15, 0.2, 0.0);

        assert!((fast - target).length() < 1e-4, "{fast:?}");
        assert!((slow - target).length() < 1e-4, "{slow:?}");
        // Different transients: after the first frame the slower rate has
        // covered more ground.
        assert!(slow_path[0] > fast_path[0]);
    }

    #[test]
    fn long_frame_does_not_overshoot() {
        let (updater, mut state) = setup();
        state.cursor.x = 0.5;
        updater.update(&mut state, 2.0);
        assert_eq!(state.rig.group_position().x, 0.25);
    }

    #[test]
    fn camera_follows_scroll() {
        let (updater, mut state) = setup();
        let _ = state.scroll.set_scroll(1200.0, 800.0);
        updater.update(&mut state, 0.016);
        assert_eq!(state.rig.camera_height(), -6.0);
    }

    #[test]
    fn ambient_rotation_is_linear_in_time() {
        let (updater, mut state) = setup();
        let dt = 1.0 / 60.0;
        let frames = 600;
        for _ in 0..frames {
            updater.update(&mut state, dt);
        }
        let elapsed = dt * frames as f32;
        for object in &state.sections {
            assert!((object.rotation.x - 0.2 * elapsed).abs() < 1e-3);
            assert!((object.rotation.y - 0.12 * elapsed).abs() < 1e-3);
            assert_eq!(object.rotation.z, 0.0);
        }
    }

    #[test]
    fn ambient_rotation_adds_to_tween() {
        let (updater, mut state) = setup();
        let _ = state.tweens.animate(
            1,
            TweenProperty::RotationX,
            3.0,
            1.5,
            EasingFunction::QuadraticInOut,
        );
        let dt = 1.0 / 60.0;
        let frames = 180;
        for _ in 0..frames {
            state.tweens.step(dt, &mut state.sections);
            updater.update(&mut state, dt);
        }
        let elapsed = dt * frames as f32;
        let ambient = 0.2 * elapsed;
        assert!((state.sections[0].rotation.x - ambient).abs() < 1e-3);
        assert!((state.sections[1].rotation.x - (ambient + 3.0)).abs() < 1e-3);
        assert!((state.sections[1].rotation.y - 0.12 * elapsed).abs() < 1e-3);
    }

    #[test]
    fn resize_sets_exact_aspect() {
        let (updater, mut state) = setup();
        state.resize(1366.0, 768.0, 1.0, 2.0);
        updater.update(&mut state, 0.016);
        assert_eq!(state.rig.camera().aspect, 1366.0 / 768.0);
    }
}
