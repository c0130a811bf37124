//! Debug panel IPC messages and how they patch [`Options`].
//!
//! Messages are JSON objects with an `action` tag, e.g.
//! `{"action":"set_option","path":"colors","field":"material","value":"#ff0000"}`.

use serde_json::Value;

use crate::options::Options;

/// Actions sent from the panel page to the native side.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    /// Set a single option field: `options[path][field] = value`.
    SetOption {
        /// Top-level section key (e.g. `"colors"`).
        path: String,
        /// Field key within the section (e.g. `"material"`).
        field: String,
        /// New JSON value.
        value: Value,
    },
    /// Show or hide the panel.
    TogglePanel,
}

impl PanelAction {
    /// Parse an IPC message body.
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        let msg: Value = serde_json::from_str(body).ok()?;
        let action = msg.get("action")?.as_str()?;
        match action {
            "set_option" => {
                let path = msg.get("path")?.as_str()?.to_owned();
                let field = msg.get("field")?.as_str()?.to_owned();
                let value = msg.get("value")?.clone();
                Some(Self::SetOption { path, field, value })
            }
            "toggle_panel" => Some(Self::TogglePanel),
            other => {
                log::warn!("unknown panel action {other:?}");
                None
            }
        }
    }

    /// Options after applying a `SetOption`, or `None` if the action does
    /// not change options or the patched result is invalid.
    #[must_use]
    pub fn apply(&self, options: &Options) -> Option<Options> {
        let Self::SetOption { path, field, value } = self else {
            return None;
        };
        let mut root = serde_json::to_value(options).ok()?;
        let Some(section) = root.get_mut(path).and_then(Value::as_object_mut)
        else {
            log::warn!("unknown options section {path:?}");
            return None;
        };
        let _ = section.insert(field.clone(), value.clone());
        let updated: Options = match serde_json::from_value(root) {
            Ok(updated) => updated,
            Err(e) => {
                log::warn!("rejected {path}.{field} = {value}: {e}");
                return None;
            }
        };
        if let Err(e) = updated.validate() {
            log::warn!("rejected {path}.{field} = {value}: {e}");
            return None;
        }
        Some(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_set_option() {
        let action = PanelAction::parse(
            r##"{"action":"set_option","path":"colors","field":"material","value":"#ff0000"}"##,
        );
        assert_eq!(
            action,
            Some(PanelAction::SetOption {
                path: "colors".to_owned(),
                field: "material".to_owned(),
                value: Value::from("#ff0000"),
            })
        );
    }

    #[test]
    fn rejects_unknown_and_malformed() {
        assert_eq!(PanelAction::parse(r#"{"action":"explode"}"#), None);
        assert_eq!(PanelAction::parse("not json"), None);
        assert_eq!(PanelAction::parse(r#"{"action":"set_option"}"#), None);
        assert_eq!(
            PanelAction::parse(r#"{"action":"toggle_panel"}"#),
            Some(PanelAction::TogglePanel)
        );
    }

    #[test]
    fn set_color_patches_options() {
        let options = Options::default();
        let action = PanelAction::SetOption {
            path: "colors".to_owned(),
            field: "particles".to_owned(),
            value: Value::from("#00ff00"),
        };
        let updated = action.apply(&options).unwrap();
        assert_eq!(updated.colors.particles, "#00ff00");
        assert_eq!(updated.colors.particles_rgb(), [0.0, 1.0, 0.0]);
        assert_eq!(updated.colors.material, options.colors.material);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let options = Options::default();
        let bad_color = PanelAction::SetOption {
            path: "colors".to_owned(),
            field: "material".to_owned(),
            value: Value::from("chartreuse-ish"),
        };
        assert!(bad_color.apply(&options).is_none());

        let bad_type = PanelAction::SetOption {
            path: "motion".to_owned(),
            field: "parallax_amount".to_owned(),
            value: Value::from("lots"),
        };
        assert!(bad_type.apply(&options).is_none());

        let bad_section = PanelAction::SetOption {
            path: "nope".to_owned(),
            field: "x".to_owned(),
            value: Value::from(1),
        };
        assert!(bad_section.apply(&options).is_none());
        assert!(PanelAction::TogglePanel.apply(&options).is_none());
    }
}
