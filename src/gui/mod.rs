//! Debug panel for live option tuning.
//!
//! [`action`] parses the panel's JSON IPC messages and patches
//! [`Options`](crate::options::Options); it is always compiled so the
//! patching logic is testable without a webview. With the `gui` feature a
//! wry webview is created as a child of the winit window and hosts the
//! panel page.

/// Panel IPC messages and option patching.
pub mod action;
/// Panel controller owning the webview.
#[cfg(feature = "gui")]
pub(crate) mod panel;
/// Wry webview creation, IPC handler, and state push helpers.
#[cfg(feature = "gui")]
pub mod webview;

pub use action::PanelAction;
