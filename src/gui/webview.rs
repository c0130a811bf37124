//! Wry webview child of the winit window.
//!
//! Creates a [`wry::WebView`] in the top-right corner of the window. The
//! page builds its controls from the [`Options`] JSON schema: every titled
//! string field becomes a color picker and every titled number with a
//! range becomes a slider. Control changes arrive as [`PanelAction`] IPC
//! messages; the native side pushes the schema once with [`push_schema`]
//! and the current values with [`push_options`].

use std::sync::mpsc;

use wry::{dpi, Rect, WebView, WebViewBuilder};

use super::action::PanelAction;
use crate::options::Options;

/// Width of the panel in physical pixels.
pub const PANEL_WIDTH: u32 = 240;
/// Height of the panel in physical pixels.
pub const PANEL_HEIGHT: u32 = 360;
/// Gap between the panel and the window edges.
pub const PANEL_MARGIN: u32 = 10;

/// Create the wry webview as a child of the given window.
///
/// Returns `(webview, action_rx)`; the receiver yields [`PanelAction`]s
/// from the page.
///
/// # Errors
///
/// Returns [`wry::Error`] if the platform webview cannot be created.
pub fn create_webview<W: wry::raw_window_handle::HasWindowHandle>(
    window: &W,
    window_width: u32,
) -> Result<(WebView, mpsc::Receiver<PanelAction>), wry::Error> {
    let (tx, rx) = mpsc::channel();

    let webview = WebViewBuilder::new()
        .with_bounds(panel_bounds(window_width))
        .with_transparent(true)
        .with_initialization_script(BRIDGE_JS)
        .with_html(PANEL_HTML)
        .with_ipc_handler(move |req| {
            if let Some(action) = PanelAction::parse(req.body()) {
                let _ = tx.send(action);
            }
        })
        .build_as_child(window)?;

    Ok((webview, rx))
}

/// Compute the [`Rect`] for the panel in the top-right corner.
#[must_use]
pub fn panel_bounds(window_width: u32) -> Rect {
    let x = window_width.saturating_sub(PANEL_WIDTH + PANEL_MARGIN);
    Rect {
        position: dpi::Position::Physical(dpi::PhysicalPosition::new(
            x as i32,
            PANEL_MARGIN as i32,
        )),
        size: dpi::Size::Physical(dpi::PhysicalSize::new(
            PANEL_WIDTH.min(window_width),
            PANEL_HEIGHT,
        )),
    }
}

/// Bounds that park the panel just outside the right window edge.
#[must_use]
pub fn hidden_bounds(window_width: u32) -> Rect {
    Rect {
        position: dpi::Position::Physical(dpi::PhysicalPosition::new(
            window_width as i32,
            PANEL_MARGIN as i32,
        )),
        size: dpi::Size::Physical(dpi::PhysicalSize::new(
            PANEL_WIDTH,
            PANEL_HEIGHT,
        )),
    }
}

/// Push the options JSON schema to the page (once, after creation),
/// followed by the current values.
pub fn push_schema(webview: &WebView, options: &Options) {
    let json = serde_json::to_string(&Options::json_schema()).unwrap_or_default();
    let _ = webview.evaluate_script(&script_call("__toonscroll_push_schema", &json));
    push_options(webview, options);
}

/// Push the current option values to the page.
pub fn push_options(webview: &WebView, options: &Options) {
    let json = serde_json::to_string(options).unwrap_or_default();
    let _ = webview.evaluate_script(&script_call("__toonscroll_push_options", &json));
}

// ── Internals ────────────────────────────────────────────────────────────

/// `window.<function>('<json>')` with the JSON escaped for a single-quoted
/// string literal.
fn script_call(function: &str, json: &str) -> String {
    let escaped = json.replace('\\', "\\\\").replace('\'', "\\'");
    format!("window.{function}('{escaped}')")
}

/// Runs before the page loads. Buffers pushes that arrive before the page
/// script has registered its renderer, and replays them when it does.
const BRIDGE_JS: &str = r#"
(function() {
    var pending = { schema: null, options: null };
    function deliver() {
        if (window.__toonscroll_render && pending.schema) {
            window.__toonscroll_render(pending.schema, pending.options);
        }
    }
    window.__toonscroll_push_schema = function(json) {
        pending.schema = JSON.parse(json);
        deliver();
    };
    window.__toonscroll_push_options = function(json) {
        pending.options = JSON.parse(json);
        deliver();
    };
    window.__toonscroll_ready = deliver;
})();
"#;

/// Panel page. Controls are generated from the schema; each posts a
/// `set_option` message on input.
const PANEL_HTML: &str = r##"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<style>
  body {
    margin: 0;
    padding: 10px 14px;
    font: 13px system-ui, sans-serif;
    color: #eee;
    background: rgba(24, 22, 28, 0.85);
    border-radius: 6px;
  }
  h4 { margin: 10px 0 4px; font-size: 12px; text-transform: uppercase; }
  label { display: flex; justify-content: space-between; margin: 4px 0; }
  input[type=color] { width: 48px; height: 22px; border: 0; padding: 0; }
  input[type=range] { width: 110px; }
</style>
</head>
<body>
<div id="controls"></div>
<script>
  function send(path, field, value) {
    window.ipc.postMessage(JSON.stringify({
      action: 'set_option', path: path, field: field, value: value
    }));
  }

  function control(path, field, prop) {
    var input = document.createElement('input');
    input.id = path + '.' + field;
    if (prop.type === 'string') {
      input.type = 'color';
      input.addEventListener('input', function () {
        send(path, field, input.value);
      });
    } else if (prop.type === 'number' && prop.minimum !== undefined) {
      input.type = 'range';
      input.min = prop.minimum;
      input.max = prop.maximum;
      input.step = prop.step || 'any';
      input.addEventListener('input', function () {
        send(path, field, parseFloat(input.value));
      });
    } else {
      return null;
    }
    var label = document.createElement('label');
    label.textContent = prop.title;
    label.appendChild(input);
    return label;
  }

  var built = false;
  window.__toonscroll_render = function (schema, options) {
    var root = document.getElementById('controls');
    if (!built) {
      Object.keys(schema.properties).forEach(function (path) {
        var section = schema.properties[path];
        if (!section.properties) { return; }
        var rows = [];
        Object.keys(section.properties).forEach(function (field) {
          var prop = section.properties[field];
          var row = prop.title ? control(path, field, prop) : null;
          if (row) { rows.push(row); }
        });
        if (rows.length === 0) { return; }
        var heading = document.createElement('h4');
        heading.textContent = section.title || path;
        root.appendChild(heading);
        rows.forEach(function (row) { root.appendChild(row); });
      });
      built = true;
    }
    if (!options) { return; }
    Object.keys(options).forEach(function (path) {
      Object.keys(options[path] || {}).forEach(function (field) {
        var input = document.getElementById(path + '.' + field);
        if (input) { input.value = options[path][field]; }
      });
    });
  };
  window.__toonscroll_ready();
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_sits_in_top_right_corner() {
        let bounds = panel_bounds(1000);
        let dpi::Position::Physical(pos) = bounds.position else {
            panic!("expected physical position");
        };
        assert_eq!((pos.x, pos.y), (750, 10));
    }

    #[test]
    fn script_call_escapes_quotes_and_backslashes() {
        let script = script_call("f", r#"{"a":"it's \\ here"}"#);
        assert_eq!(script, r#"window.f('{"a":"it\'s \\\\ here"}')"#);
    }

    #[test]
    fn schema_exposes_what_the_page_renders() {
        let schema = serde_json::to_value(Options::json_schema()).unwrap();
        let props = &schema["properties"];
        // Color pickers.
        assert_eq!(props["colors"]["properties"]["material"]["type"], "string");
        assert_eq!(props["colors"]["properties"]["particles"]["type"], "string");
        // Sliders need a title and a range.
        let size = &props["particles"]["properties"]["size"];
        assert_eq!(size["title"], "Size");
        assert_eq!(size["type"], "number");
        assert!(size["minimum"].is_number() && size["maximum"].is_number());
        // Startup-only fields are not exposed.
        assert!(props["particles"]["properties"].get("count").is_none());
    }

    #[test]
    fn page_is_driven_by_the_bridge() {
        assert!(BRIDGE_JS.contains("__toonscroll_push_schema"));
        assert!(BRIDGE_JS.contains("__toonscroll_push_options"));
        assert!(PANEL_HTML.contains("__toonscroll_render"));
        assert!(PANEL_HTML.contains("set_option"));
    }
}
