//! Input handling: event types and the processor that applies raw window
//! events to the scene state.

/// Platform-agnostic input events.
pub mod event;
/// Applies events to the scene state.
pub mod processor;

pub use event::{InputEvent, WheelDelta};
pub use processor::{InputProcessor, InputResponse};
