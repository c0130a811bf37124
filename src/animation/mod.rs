//! Tweening for section-change spins.
//!
//! [`tween::Tweener`] is the concrete backend behind the
//! [`tween::Animate`] capability the section tracker uses to start
//! relative, additive rotation animations.

/// Easing curves.
pub mod easing;
/// Relative, composable rotation tweens.
pub mod tween;

pub use easing::EasingFunction;
pub use tween::{Animate, TweenHandle, TweenProperty, Tweener};
