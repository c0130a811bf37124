//! One-shot relative tweens on section object rotations.
//!
//! A tween animates one rotation axis of one section object *by* a delta
//! (not *to* a value). Each step applies only the increment of eased
//! progress since the previous step, so any number of tweens on the same
//! axis run side by side and their deltas sum, and the ambient spin from
//! the frame update adds on top.

use super::easing::EasingFunction;
use crate::scene::SectionObject;

/// Rotation axis a tween animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenProperty {
    /// Rotation around X.
    RotationX,
    /// Rotation around Y.
    RotationY,
    /// Rotation around Z.
    RotationZ,
}

impl TweenProperty {
    fn apply(self, object: &mut SectionObject, amount: f32) {
        match self {
            Self::RotationX => object.rotation.x += amount,
            Self::RotationY => object.rotation.y += amount,
            Self::RotationZ => object.rotation.z += amount,
        }
    }
}

/// Identifies a started tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenHandle(u64);

/// Capability to start a relative, fire-and-forget animation.
///
/// `animate` never blocks and never resets other in-flight tweens on the
/// same property; the returned handle can be used to query or cancel.
pub trait Animate {
    /// Animate `property` of section `target` by `delta` over `duration`
    /// seconds with the given easing.
    fn animate(
        &mut self,
        target: usize,
        property: TweenProperty,
        delta: f32,
        duration: f32,
        easing: EasingFunction,
    ) -> TweenHandle;
}

#[derive(Debug, Clone)]
struct Tween {
    handle: TweenHandle,
    target: usize,
    property: TweenProperty,
    delta: f32,
    duration: f32,
    easing: EasingFunction,
    elapsed: f32,
    /// Eased progress already applied to the property.
    applied: f32,
}

impl Tween {
    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }
}

/// Drives every in-flight tween; stepped once per frame by the run loop.
#[derive(Debug, Default)]
pub struct Tweener {
    active: Vec<Tween>,
    next_id: u64,
}

impl Tweener {
    /// Empty tweener.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every tween by `dt` seconds and apply the newly eased
    /// portion of its delta. Finished tweens are dropped.
    pub fn step(&mut self, dt: f32, objects: &mut [SectionObject]) {
        let dt = dt.max(0.0);
        self.active.retain_mut(|tween| {
            tween.elapsed += dt;
            let progress = tween.progress();
            let eased = tween.easing.evaluate(progress);
            let amount = tween.delta * (eased - tween.applied);
            tween.applied = eased;

            let Some(object) = objects.get_mut(tween.target) else {
                log::warn!(
                    "tween {:?} targets missing section {}, dropping",
                    tween.handle,
                    tween.target
                );
                return false;
            };
            tween.property.apply(object, amount);

            if progress >= 1.0 {
                log::debug!(
                    "tween {:?} on section {} finished",
                    tween.handle,
                    tween.target
                );
                return false;
            }
            true
        });
    }

    /// Whether the tween is still running.
    #[must_use]
    pub fn is_running(&self, handle: TweenHandle) -> bool {
        self.active.iter().any(|t| t.handle == handle)
    }

    /// Stop a tween where it is. Returns `false` if it already finished.
    pub fn cancel(&mut self, handle: TweenHandle) -> bool {
        let before = self.active.len();
        self.active.retain(|t| t.handle != handle);
        self.active.len() != before
    }

    /// Number of tweens in flight.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

impl Animate for Tweener {
    fn animate(
        &mut self,
        target: usize,
        property: TweenProperty,
        delta: f32,
        duration: f32,
        easing: EasingFunction,
    ) -> TweenHandle {
        let handle = TweenHandle(self.next_id);
        self.next_id += 1;
        self.active.push(Tween {
            handle,
            target,
            property,
            delta,
            duration,
            easing,
            elapsed: 0.0,
            applied: 0.0,
        });
        handle
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::MeshKind;

    fn object() -> SectionObject {
        SectionObject {
            kind: MeshKind::Torus,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }

    fn run(tweener: &mut Tweener, objects: &mut [SectionObject], secs: f32) {
        let dt = 1.0 / 60.0;
        let frames = (secs / dt).ceil() as usize;
        for _ in 0..frames {
            tweener.step(dt, objects);
        }
    }

    #[test]
    fn applies_full_delta_then_finishes() {
        let mut tweener = Tweener::new();
        let mut objects = [object()];
        let handle = tweener.animate(
            0,
            TweenProperty::RotationY,
            6.0,
            1.5,
            EasingFunction::QuadraticInOut,
        );
        assert!(tweener.is_running(handle));

        run(&mut tweener, &mut objects, 0.75);
        // Halfway through an in-out curve is roughly half the delta.
        assert!((objects[0].rotation.y - 3.0).abs() < 0.2);

        run(&mut tweener, &mut objects, 1.0);
        assert!(!tweener.is_running(handle));
        assert!((objects[0].rotation.y - 6.0).abs() < 1e-4);
        assert_eq!(tweener.active_count(), 0);
    }

    #[test]
    fn retriggered_tweens_sum() {
        let mut tweener = Tweener::new();
        let mut objects = [object()];
        let ease = EasingFunction::QuadraticInOut;
        let _ = tweener.animate(0, TweenProperty::RotationX, 3.0, 1.5, ease);
        run(&mut tweener, &mut objects, 0.5);
        let _ = tweener.animate(0, TweenProperty::RotationX, 3.0, 1.5, ease);
        assert_eq!(tweener.active_count(), 2);

        run(&mut tweener, &mut objects, 3.0);
        assert!((objects[0].rotation.x - 6.0).abs() < 1e-4);
    }

    #[test]
    fn zero_duration_applies_immediately() {
        let mut tweener = Tweener::new();
        let mut objects = [object()];
        let _ = tweener.animate(
            0,
            TweenProperty::RotationZ,
            1.5,
            0.0,
            EasingFunction::Linear,
        );
        tweener.step(0.0, &mut objects);
        assert_eq!(objects[0].rotation.z, 1.5);
        assert_eq!(tweener.active_count(), 0);
    }

    #[test]
    fn cancel_freezes_progress() {
        let mut tweener = Tweener::new();
        let mut objects = [object()];
        let handle = tweener.animate(
            0,
            TweenProperty::RotationX,
            2.0,
            1.0,
            EasingFunction::Linear,
        );
        tweener.step(0.5, &mut objects);
        assert!(tweener.cancel(handle));
        assert!(!tweener.cancel(handle));
        tweener.step(0.5, &mut objects);
        assert!((objects[0].rotation.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn missing_target_is_dropped() {
        let mut tweener = Tweener::new();
        let mut objects = [object()];
        let handle = tweener.animate(
            5,
            TweenProperty::RotationX,
            1.0,
            1.0,
            EasingFunction::Linear,
        );
        tweener.step(0.1, &mut objects);
        assert!(!tweener.is_running(handle));
        assert_eq!(objects[0].rotation, Vec3::ZERO);
    }
}
