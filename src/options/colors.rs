use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Colors exposed to the debug panel, as `#rrggbb` strings.
///
/// Hex values are used as-is (no sRGB decode), matching the unmanaged
/// color pipeline of the renderer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Colors", inline)]
#[serde(default)]
pub struct ColorOptions {
    /// Toon material color shared by all section meshes.
    #[schemars(title = "Material")]
    pub material: String,
    /// Particle color.
    #[schemars(title = "Particles")]
    pub particles: String,
    /// Clear color behind the scene.
    #[schemars(skip)]
    pub background: String,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            material: "#ffeded".to_owned(),
            particles: "#ffeded".to_owned(),
            background: "#1e1a20".to_owned(),
        }
    }
}

impl ColorOptions {
    /// Material color as RGB in [0, 1].
    #[must_use]
    pub fn material_rgb(&self) -> [f32; 3] {
        rgb_or_fallback(&self.material, "material")
    }

    /// Particle color as RGB in [0, 1].
    #[must_use]
    pub fn particles_rgb(&self) -> [f32; 3] {
        rgb_or_fallback(&self.particles, "particles")
    }

    /// Background color as RGB in [0, 1].
    #[must_use]
    pub fn background_rgb(&self) -> [f32; 3] {
        rgb_or_fallback(&self.background, "background")
    }

    /// Check that every color parses.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::OptionsParse`] naming the first bad field.
    pub fn validate(&self) -> Result<(), SceneError> {
        for (field, value) in [
            ("material", &self.material),
            ("particles", &self.particles),
            ("background", &self.background),
        ] {
            if parse_hex_color(value).is_none() {
                return Err(SceneError::OptionsParse(format!(
                    "colors.{field}: expected #rrggbb, got {value:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Parse `#rrggbb` (or `rrggbb`) into RGB in [0, 1].
#[must_use]
pub fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .ok()
            .map(|v| f32::from(v) / 255.0)
    };
    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

fn rgb_or_fallback(hex: &str, field: &str) -> [f32; 3] {
    parse_hex_color(hex).unwrap_or_else(|| {
        log::warn!("invalid {field} color {hex:?}, using white");
        [1.0, 1.0, 1.0]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(parse_hex_color("#ff0000"), Some([1.0, 0.0, 0.0]));
        assert_eq!(parse_hex_color("00ff00"), Some([0.0, 1.0, 0.0]));
        let [r, g, b] = parse_hex_color("#1e1a20").unwrap();
        assert!((r - 30.0 / 255.0).abs() < 1e-6);
        assert!((g - 26.0 / 255.0).abs() < 1e-6);
        assert!((b - 32.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
        assert_eq!(parse_hex_color(""), None);
        assert_eq!(parse_hex_color("#ffé000"), None);
    }

    #[test]
    fn validate_names_bad_field() {
        let colors = ColorOptions {
            particles: "red".to_owned(),
            ..ColorOptions::default()
        };
        let err = colors.validate().unwrap_err().to_string();
        assert!(err.contains("colors.particles"), "{err}");
        assert!(ColorOptions::default().validate().is_ok());
    }

    #[test]
    fn invalid_color_falls_back_to_white() {
        let colors = ColorOptions {
            material: "nope".to_owned(),
            ..ColorOptions::default()
        };
        assert_eq!(colors.material_rgb(), [1.0, 1.0, 1.0]);
    }
}
