/// Window size in logical pixels plus the pixel ratio used for the render
/// surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
    device_pixel_ratio: f32,
    pixel_ratio: f32,
}

impl Viewport {
    /// Viewport of the given logical size; the device pixel ratio is capped
    /// at `max_pixel_ratio`.
    #[must_use]
    pub fn new(
        width: f32,
        height: f32,
        device_pixel_ratio: f32,
        max_pixel_ratio: f32,
    ) -> Self {
        let mut viewport = Self {
            width: 1.0,
            height: 1.0,
            device_pixel_ratio: 1.0,
            pixel_ratio: 1.0,
        };
        viewport.resize(width, height, device_pixel_ratio, max_pixel_ratio);
        viewport
    }

    /// Update size and pixel ratio in place.
    ///
    /// Dimensions are clamped to at least 1 so the aspect ratio stays
    /// finite when the host reports an empty window (minimized, hidden
    /// tab). Non-finite or non-positive pixel ratios fall back to 1.
    pub fn resize(
        &mut self,
        width: f32,
        height: f32,
        device_pixel_ratio: f32,
        max_pixel_ratio: f32,
    ) {
        self.width = clamp_dimension(width);
        self.height = clamp_dimension(height);
        let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0
        {
            device_pixel_ratio
        } else {
            1.0
        };
        self.device_pixel_ratio = ratio;
        self.pixel_ratio = ratio.min(max_pixel_ratio.max(1.0));
    }

    /// Logical width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Logical height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Pixel ratio reported by the host, before capping.
    #[must_use]
    pub fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    /// Effective pixel ratio, `min(device_pixel_ratio, max)`.
    #[must_use]
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Width over height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Render surface size in physical pixels (never zero).
    #[must_use]
    pub fn surface_size(&self) -> (u32, u32) {
        let scale = |v: f32| ((v * self.pixel_ratio).round() as u32).max(1);
        (scale(self.width), scale(self.height))
    }
}

fn clamp_dimension(value: f32) -> f32 {
    if value.is_finite() {
        value.max(1.0)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_capped() {
        let hi_dpi = Viewport::new(800.0, 600.0, 3.0, 2.0);
        assert_eq!(hi_dpi.pixel_ratio(), 2.0);
        assert_eq!(hi_dpi.device_pixel_ratio(), 3.0);
        assert_eq!(hi_dpi.surface_size(), (1600, 1200));

        let lo_dpi = Viewport::new(800.0, 600.0, 1.25, 2.0);
        assert_eq!(lo_dpi.pixel_ratio(), 1.25);
        assert_eq!(lo_dpi.surface_size(), (1000, 750));
    }

    #[test]
    fn zero_and_negative_sizes_clamp_to_one() {
        let mut viewport = Viewport::new(800.0, 600.0, 1.0, 2.0);
        viewport.resize(0.0, -20.0, 1.0, 2.0);
        assert_eq!(viewport.width(), 1.0);
        assert_eq!(viewport.height(), 1.0);
        assert_eq!(viewport.aspect(), 1.0);
        assert_eq!(viewport.surface_size(), (1, 1));
    }

    #[test]
    fn bad_pixel_ratio_falls_back_to_one() {
        let viewport = Viewport::new(100.0, 100.0, f32::NAN, 2.0);
        assert_eq!(viewport.pixel_ratio(), 1.0);
        let viewport = Viewport::new(100.0, 100.0, 0.0, 2.0);
        assert_eq!(viewport.pixel_ratio(), 1.0);
    }

    #[test]
    fn aspect_is_width_over_height() {
        let viewport = Viewport::new(1280.0, 720.0, 1.0, 2.0);
        assert_eq!(viewport.aspect(), 1280.0 / 720.0);
    }
}
