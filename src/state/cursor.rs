use super::viewport::Viewport;

/// Cursor offset from the viewport center, normalized so each axis spans
/// roughly `[-0.5, 0.5]` (positive x right, positive y down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorState {
    /// Horizontal offset.
    pub x: f32,
    /// Vertical offset.
    pub y: f32,
}

impl CursorState {
    /// Update from a pointer position in logical pixels.
    pub fn update(&mut self, client_x: f32, client_y: f32, viewport: &Viewport) {
        self.x = client_x / viewport.width() - 0.5;
        self.y = client_y / viewport.height() - 0.5;
    }
}
