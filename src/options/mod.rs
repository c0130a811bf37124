//! Centralized scene options with TOML preset support.
//!
//! All tweakable settings (camera, colors, motion, particles, display) are
//! consolidated here. Options serialize to/from TOML so a preset can be
//! passed to the viewer on the command line.

mod camera;
mod colors;
mod display;
mod motion;
mod particles;

use std::path::Path;

pub use camera::CameraOptions;
pub use colors::{parse_hex_color, ColorOptions};
pub use display::DisplayOptions;
pub use motion::MotionOptions;
pub use particles::ParticleOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[colors]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Material, particle and background colors.
    pub colors: ColorOptions,
    /// Scroll, parallax and rotation parameters.
    pub motion: MotionOptions,
    /// Particle field parameters.
    pub particles: ParticleOptions,
    /// Surface and host-integration settings.
    pub display: DisplayOptions,
}

impl Options {
    /// Generate JSON Schema describing the panel-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::OptionsParse`] on malformed TOML or invalid
    /// color strings.
    pub fn from_toml(content: &str) -> Result<Self, SceneError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| SceneError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Io`] if the file cannot be read, otherwise
    /// see [`from_toml`](Self::from_toml).
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path).map_err(SceneError::Io)?;
        let options = Self::from_toml(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`SceneError`] if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), SceneError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SceneError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SceneError::Io)?;
        }
        std::fs::write(path, content).map_err(SceneError::Io)
    }

    /// Reject values the scene cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::OptionsParse`] describing the first problem.
    pub fn validate(&self) -> Result<(), SceneError> {
        self.colors.validate()?;
        if self.motion.object_spacing <= 0.0 {
            return Err(SceneError::OptionsParse(
                "motion.object_spacing must be positive".to_owned(),
            ));
        }
        if self.display.max_pixel_ratio < 1.0 {
            return Err(SceneError::OptionsParse(
                "display.max_pixel_ratio must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::easing::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r##"
[colors]
material = "#ff0000"

[motion]
section_easing = "linear"
"##;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.colors.material_rgb(), [1.0, 0.0, 0.0]);
        assert_eq!(opts.motion.section_easing, EasingFunction::Linear);
        // Everything else should be default
        assert_eq!(opts.colors.particles, "#ffeded");
        assert_eq!(opts.motion.object_spacing, 4.0);
        assert_eq!(opts.camera.fovy, 35.0);
        assert_eq!(opts.particles.count, 500);
    }

    #[test]
    fn invalid_color_is_rejected() {
        let err = Options::from_toml("[colors]\nparticles = \"blue\"\n")
            .unwrap_err();
        assert!(matches!(err, SceneError::OptionsParse(_)));
    }

    #[test]
    fn non_positive_spacing_is_rejected() {
        assert!(
            Options::from_toml("[motion]\nobject_spacing = 0.0\n").is_err()
        );
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!(
            "toonscroll-options-{}",
            std::process::id()
        ));
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.colors.particles = "#00ff00".to_owned();
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("colors"));
        assert!(props.contains_key("motion"));
        assert!(props.contains_key("camera"));

        // Panel-exposed colors present, background skipped
        let colors = &props["colors"]["properties"];
        assert!(colors.get("material").is_some());
        assert!(colors.get("particles").is_some());
        assert!(colors.get("background").is_none());
    }
}
