use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Surface and host-integration settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
pub struct DisplayOptions {
    /// Upper bound on the device pixel ratio used for the render surface.
    #[schemars(title = "Max Pixel Ratio", range(min = 1.0, max = 3.0), extend("step" = 0.5))]
    pub max_pixel_ratio: f32,
    /// Logical pixels scrolled per wheel line (native viewer only).
    #[schemars(skip)]
    pub scroll_line_height: f32,
    /// Gradient map image used for toon shading.
    #[schemars(skip)]
    pub gradient_texture: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            max_pixel_ratio: 2.0,
            scroll_line_height: 100.0,
            gradient_texture: "textures/gradients/3.jpg".to_owned(),
        }
    }
}
