//! Render surface abstraction and its CPU implementation.
//!
//! [`RenderSurface`] captures the only drawing capabilities the core needs
//! from its render target; a GPU canvas, a window framebuffer, or the
//! in-memory [`SoftwareSurface`] below can all satisfy it.

use fl_common::{CompositeMode, PixelBuffer, Point, Resolution, Rgba};

/// A 2D raster drawing target.
///
/// Stroke and buffer draws happen inside the coordinate space set by
/// [`RenderSurface::set_transform`]; `clear` always works in untransformed
/// surface space.
pub trait RenderSurface {
    /// Clear the whole surface to transparent (untransformed space).
    fn clear(&mut self);

    /// Set the affine view transform `(zoom, 0, 0, zoom, pan_x, pan_y)`.
    fn set_transform(&mut self, zoom: f32, pan_x: f32, pan_y: f32);

    /// Stroke one segment (canvas-space endpoints) with round caps.
    fn stroke_segment(
        &mut self,
        from: Point,
        to: Point,
        color: Rgba,
        width: f32,
        mode: CompositeMode,
    );

    /// Draw a raster buffer at the canvas origin, full opacity.
    fn draw_buffer(&mut self, buffer: &PixelBuffer);

    /// Draw a raster buffer at the canvas origin with a global alpha.
    fn draw_buffer_alpha(&mut self, buffer: &PixelBuffer, alpha: f32);
}

/// CPU render surface backed by an owned [`PixelBuffer`].
///
/// Buffer draws are resampled through the current uniform-scale + pan
/// transform with nearest-neighbor sampling; out-of-bounds pixels are
/// silently clipped.
pub struct SoftwareSurface {
    target: PixelBuffer,
    zoom: f32,
    pan_x: f32,
    pan_y: f32,
}

impl SoftwareSurface {
    pub fn new(resolution: Resolution) -> Self {
        Self {
            target: PixelBuffer::new(resolution),
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }

    /// The rendered pixels.
    pub fn pixels(&self) -> &PixelBuffer {
        &self.target
    }

    /// Consume the surface, returning the rendered buffer.
    pub fn into_pixels(self) -> PixelBuffer {
        self.target
    }

    fn draw_buffer_transformed(&mut self, buffer: &PixelBuffer, alpha: f32) {
        if !buffer.is_well_formed() {
            return;
        }
        // Fast path: identity transform is a plain blit.
        if self.zoom == 1.0 && self.pan_x.fract() == 0.0 && self.pan_y.fract() == 0.0 {
            self.target
                .composite_over(buffer, self.pan_x as i64, self.pan_y as i64, alpha);
            return;
        }

        let dst_w = self.target.width() as i64;
        let dst_h = self.target.height() as i64;
        let min_x = (self.pan_x.floor() as i64).clamp(0, dst_w);
        let min_y = (self.pan_y.floor() as i64).clamp(0, dst_h);
        let max_x = ((self.pan_x + buffer.width() as f32 * self.zoom).ceil() as i64).clamp(0, dst_w);
        let max_y =
            ((self.pan_y + buffer.height() as f32 * self.zoom).ceil() as i64).clamp(0, dst_h);

        for dy in min_y..max_y {
            let sy = ((dy as f32 + 0.5 - self.pan_y) / self.zoom).floor();
            if sy < 0.0 || sy >= buffer.height() as f32 {
                continue;
            }
            for dx in min_x..max_x {
                let sx = ((dx as f32 + 0.5 - self.pan_x) / self.zoom).floor();
                if sx < 0.0 || sx >= buffer.width() as f32 {
                    continue;
                }
                if let Some(px) = buffer.pixel(sx as u32, sy as u32) {
                    if px.a == 0 {
                        continue;
                    }
                    self.target
                        .blend_pixel(dx as u32, dy as u32, px.with_alpha_scaled(alpha));
                }
            }
        }
    }
}

impl RenderSurface for SoftwareSurface {
    fn clear(&mut self) {
        self.target.clear();
    }

    fn set_transform(&mut self, zoom: f32, pan_x: f32, pan_y: f32) {
        self.zoom = zoom;
        self.pan_x = pan_x;
        self.pan_y = pan_y;
    }

    fn stroke_segment(
        &mut self,
        from: Point,
        to: Point,
        color: Rgba,
        width: f32,
        mode: CompositeMode,
    ) {
        // Endpoints are canvas-space; map through the view transform.
        let a = Point::new(from.x * self.zoom + self.pan_x, from.y * self.zoom + self.pan_y);
        let b = Point::new(to.x * self.zoom + self.pan_x, to.y * self.zoom + self.pan_y);
        self.target
            .stroke_segment(a, b, width * self.zoom, color, mode);
    }

    fn draw_buffer(&mut self, buffer: &PixelBuffer) {
        self.draw_buffer_transformed(buffer, 1.0);
    }

    fn draw_buffer_alpha(&mut self, buffer: &PixelBuffer, alpha: f32) {
        self.draw_buffer_transformed(buffer, alpha);
    }
}
