use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::easing::EasingFunction;

/// Scroll, parallax and rotation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Motion", inline)]
#[serde(default)]
pub struct MotionOptions {
    /// Vertical distance between consecutive section objects.
    #[schemars(skip)]
    pub object_spacing: f32,
    /// Horizontal position of each section object.
    #[schemars(skip)]
    pub section_offsets: [f32; 3],
    /// Parallax offset per unit of normalized cursor offset.
    #[schemars(title = "Parallax Amount", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub parallax_amount: f32,
    /// Exponential approach rate of the camera group toward the parallax
    /// target, per second.
    #[schemars(title = "Parallax Smoothing", range(min = 0.5, max = 20.0), extend("step" = 0.5))]
    pub parallax_smoothing: f32,
    /// Ambient spin rate around X and Y, radians per second.
    #[schemars(skip)]
    pub rotation_rates: [f32; 2],
    /// Rotation added around X, Y and Z when a section becomes current.
    #[schemars(skip)]
    pub section_increment: [f32; 3],
    /// Duration of the section-change spin, seconds.
    #[schemars(title = "Spin Duration", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub section_duration: f32,
    /// Easing curve of the section-change spin.
    #[schemars(skip)]
    pub section_easing: EasingFunction,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            object_spacing: 4.0,
            section_offsets: [2.0, -2.0, 2.0],
            parallax_amount: 0.5,
            parallax_smoothing: 5.0,
            rotation_rates: [0.2, 0.12],
            section_increment: [3.0, 6.0, 1.5],
            section_duration: 1.5,
            section_easing: EasingFunction::QuadraticInOut,
        }
    }
}
