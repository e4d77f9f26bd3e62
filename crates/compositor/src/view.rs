//! View transform: pan offset and zoom applied uniformly to the render surface.

use serde::{Deserialize, Serialize};

use fl_common::Point;

/// Pan and zoom state for the canvas view.
///
/// Zoom is always kept within `[MIN_ZOOM, MAX_ZOOM]`; out-of-range inputs
/// are clamped, never rejected.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub pan_x: f32,
    pub pan_y: f32,
    pub zoom: f32,
}

impl ViewTransform {
    pub const MIN_ZOOM: f32 = 0.2;
    pub const MAX_ZOOM: f32 = 5.0;

    /// Scroll-wheel sensitivity: zoom delta per unit of wheel delta.
    const WHEEL_FACTOR: f32 = -0.001;

    pub fn new() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0,
        }
    }

    /// Adjust zoom from a scroll-wheel delta (positive delta zooms out).
    pub fn adjust_zoom(&mut self, wheel_delta_y: f32) {
        self.set_zoom(self.zoom + wheel_delta_y * Self::WHEEL_FACTOR);
    }

    /// Set zoom directly, clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }

    /// Add an incremental pan offset in screen pixels.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Map a screen-space point into canvas space (inverse transform).
    pub fn to_canvas(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan_x) / self.zoom,
            (screen.y - self.pan_y) / self.zoom,
        )
    }

    /// Map a canvas-space point to screen space.
    pub fn to_screen(&self, canvas: Point) -> Point {
        Point::new(
            canvas.x * self.zoom + self.pan_x,
            canvas.y * self.zoom + self.pan_y,
        )
    }

    /// Back to identity (no pan, 1x zoom).
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}
