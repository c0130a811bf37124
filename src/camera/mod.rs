//! Camera for the scrolling scene.
//!
//! A perspective [`Camera`] inside a parallax group ([`CameraRig`]): scroll
//! moves the camera down the page, the cursor nudges the group.

/// Core camera struct and GPU uniform type.
pub mod core;
/// Parallax group plus scroll-driven camera.
pub mod rig;

pub use self::core::{Camera, CameraUniform};
pub use rig::CameraRig;
