//! `PixelBuffer` — the owned RGBA raster stored per (layer, frame) cell.
//!
//! Each buffer is exclusively owned by the cell (or working surface) that
//! holds it; there is no shared mutable aliasing between cells. Pixel data is
//! straight-alpha RGBA, `width * height * 4` bytes.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::types::{Point, Resolution};

/// How a stroke combines with existing pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompositeMode {
    /// Source-over: the brush paints on top.
    #[default]
    Normal,
    /// Destination-out: the eraser removes coverage.
    Erase,
}

/// A fixed-size RGBA raster buffer.
///
/// Deserialized buffers may carry a byte length that does not match their
/// declared dimensions; consumers must check [`PixelBuffer::is_well_formed`]
/// and treat malformed buffers as empty, never as an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a fully transparent buffer at the given resolution.
    pub fn new(resolution: Resolution) -> Self {
        Self {
            width: resolution.width,
            height: resolution.height,
            data: vec![0; resolution.byte_len()],
        }
    }

    /// Reassemble a buffer from raw parts (e.g. a decoded project file).
    /// The byte length is *not* validated here; see [`Self::is_well_formed`].
    pub fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Whether the byte length matches the declared dimensions.
    pub fn is_well_formed(&self) -> bool {
        self.data.len() == self.resolution().byte_len()
    }

    /// Whether every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize * self.width as usize + x as usize) * 4)
        } else {
            None
        }
    }

    /// Read one pixel. Out-of-bounds reads return `None`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let i = self.offset(x, y)?;
        Some(Rgba::new(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ))
    }

    /// Overwrite one pixel. Out-of-bounds writes are silently clipped.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(i) = self.offset(x, y) {
            self.data[i] = color.r;
            self.data[i + 1] = color.g;
            self.data[i + 2] = color.b;
            self.data[i + 3] = color.a;
        }
    }

    /// Source-over blend one pixel onto the buffer (straight alpha).
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        let Some(i) = self.offset(x, y) else { return };
        let sa = color.a as f32 / 255.0;
        if sa <= 0.0 {
            return;
        }
        let da = self.data[i + 3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return;
        }
        for c in 0..3 {
            let src = [color.r, color.g, color.b][c] as f32;
            let dst = self.data[i + c] as f32;
            let blended = (src * sa + dst * da * (1.0 - sa)) / out_a;
            self.data[i + c] = blended.round().clamp(0.0, 255.0) as u8;
        }
        self.data[i + 3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }

    /// Destination-out: reduce coverage by the given strength (0..1).
    pub fn erase_pixel(&mut self, x: u32, y: u32, strength: f32) {
        let Some(i) = self.offset(x, y) else { return };
        let keep = 1.0 - strength.clamp(0.0, 1.0);
        self.data[i + 3] = (self.data[i + 3] as f32 * keep).round() as u8;
    }

    /// Stamp a filled disc. `Normal` paints source-over, `Erase` removes
    /// coverage. The disc is clipped at the buffer edges.
    pub fn stamp_disc(&mut self, center: Point, radius: f32, color: Rgba, mode: CompositeMode) {
        let r = radius.max(0.5);
        let min_x = (center.x - r).floor().max(0.0) as u32;
        let min_y = (center.y - r).floor().max(0.0) as u32;
        let max_x = ((center.x + r).ceil() as i64).min(self.width as i64 - 1);
        let max_y = ((center.y + r).ceil() as i64).min(self.height as i64 - 1);
        if max_x < 0 || max_y < 0 {
            return;
        }
        let r_sq = r * r;
        for y in min_y..=max_y as u32 {
            for x in min_x..=max_x as u32 {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy > r_sq {
                    continue;
                }
                match mode {
                    CompositeMode::Normal => self.blend_pixel(x, y, color),
                    CompositeMode::Erase => self.erase_pixel(x, y, color.a as f32 / 255.0),
                }
            }
        }
    }

    /// Rasterize a line segment with round caps by stamping discs along it.
    /// `width` is the stroke width in canvas pixels.
    pub fn stroke_segment(
        &mut self,
        from: Point,
        to: Point,
        width: f32,
        color: Rgba,
        mode: CompositeMode,
    ) {
        let radius = (width / 2.0).max(0.5);
        let length = from.distance(to);
        // Stamp at half-radius spacing so coverage has no gaps.
        let steps = (length / (radius * 0.5)).ceil().max(1.0) as u32;
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let p = Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
            self.stamp_disc(p, radius, color, mode);
        }
    }

    /// Source-over composite `src` onto this buffer at an integer offset,
    /// with a global alpha multiplier. Pixels falling outside either buffer
    /// are clipped. Malformed sources are skipped entirely.
    pub fn composite_over(&mut self, src: &PixelBuffer, dx: i64, dy: i64, alpha: f32) {
        if !src.is_well_formed() {
            return;
        }
        for sy in 0..src.height {
            let ty = sy as i64 + dy;
            if ty < 0 || ty >= self.height as i64 {
                continue;
            }
            for sx in 0..src.width {
                let tx = sx as i64 + dx;
                if tx < 0 || tx >= self.width as i64 {
                    continue;
                }
                // pixel() is in range by construction of the loop
                if let Some(px) = src.pixel(sx, sy) {
                    if px.a == 0 {
                        continue;
                    }
                    self.blend_pixel(tx as u32, ty as u32, px.with_alpha_scaled(alpha));
                }
            }
        }
    }

    /// Fill an axis-aligned rectangle (overwrite, no blending), clipped at
    /// the buffer edges.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba) {
        for py in y..(y + h).min(self.height) {
            for px in x..(x + w).min(self.width) {
                self.set_pixel(px, py, color);
            }
        }
    }
}
