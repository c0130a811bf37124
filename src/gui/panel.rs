//! GUI panel controller: owns the wry webview and applies its actions.
//!
//! Keeps the viewer down to a single `PanelController` field instead of a
//! handful of `#[cfg(feature = "gui")]` fields.

use std::sync::mpsc;

use winit::window::Window;

use super::action::PanelAction;
use super::webview;
use crate::engine::SceneEngine;

/// Owns the webview panel and its visibility.
pub(crate) struct PanelController {
    webview: Option<wry::WebView>,
    action_rx: Option<mpsc::Receiver<PanelAction>>,
    visible: bool,
}

impl PanelController {
    /// Controller with no webview yet; the panel starts visible.
    pub(crate) fn new() -> Self {
        Self {
            webview: None,
            action_rx: None,
            visible: true,
        }
    }

    /// Create the webview and push the options schema and values to it.
    pub(crate) fn init_webview(&mut self, window: &Window, engine: &SceneEngine) {
        match webview::create_webview(window, window.inner_size().width) {
            Ok((wv, rx)) => {
                webview::push_schema(&wv, engine.options());
                self.webview = Some(wv);
                self.action_rx = Some(rx);
            }
            Err(e) => {
                log::error!("Failed to create webview: {e}");
                // Continue without GUI panel
            }
        }
    }

    /// Show or hide the panel.
    pub(crate) fn toggle(&mut self, window: &Window) {
        self.visible = !self.visible;
        self.apply_layout(window);
    }

    /// Position the webview for the current window size and visibility.
    pub(crate) fn apply_layout(&self, window: &Window) {
        let Some(ref wv) = self.webview else {
            return;
        };
        let width = window.inner_size().width;
        let bounds = if self.visible {
            webview::panel_bounds(width)
        } else {
            webview::hidden_bounds(width)
        };
        let _ = wv.set_bounds(bounds);
    }

    /// Drain IPC actions from the webview and apply them to the engine.
    pub(crate) fn drain_and_apply(
        &mut self,
        engine: &mut SceneEngine,
        window: &Window,
    ) {
        let Some(ref rx) = self.action_rx else {
            return;
        };

        let mut toggled = false;
        while let Ok(action) = rx.try_recv() {
            if action == PanelAction::TogglePanel {
                toggled = !toggled;
                continue;
            }
            if let Some(updated) = action.apply(engine.options()) {
                log::debug!("panel: {action:?}");
                engine.set_options(updated);
            }
        }

        if toggled {
            self.toggle(window);
        }
    }
}
