//! Stroke accumulation — the working raster for an in-progress stroke.
//!
//! A stroke begins as a copy of the current cell's buffer (or a blank one),
//! accumulates segments as the pointer moves, and yields a finished
//! [`PixelBuffer`] for the project to capture. Each cell thus always ends up
//! with one exclusively owned snapshot; nothing aliases the live canvas.

use fl_common::{PixelBuffer, Point, Resolution};

use crate::tool::ToolConfig;

/// An in-progress stroke over one (layer, frame) cell.
#[derive(Clone, Debug)]
pub struct StrokeCanvas {
    buffer: PixelBuffer,
    last: Point,
}

impl StrokeCanvas {
    /// Begin a stroke at a canvas-space point. `base` is the current content
    /// of the target cell; malformed base buffers start the stroke blank.
    pub fn begin(base: Option<&PixelBuffer>, resolution: Resolution, start: Point) -> Self {
        let buffer = match base {
            Some(b) if b.is_well_formed() && b.resolution() == resolution => b.clone(),
            _ => PixelBuffer::new(resolution),
        };
        Self {
            buffer,
            last: start,
        }
    }

    /// Extend the stroke to a new canvas-space point. Tool settings are read
    /// here, per segment, not at stroke start.
    pub fn extend(&mut self, to: Point, tool: &ToolConfig) {
        self.buffer
            .stroke_segment(self.last, to, tool.width, tool.rgba(), tool.composite_mode());
        self.last = to;
    }

    /// The accumulated raster so far (for live preview).
    pub fn pixels(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// End the stroke, yielding the buffer to capture into the cell.
    pub fn finish(self) -> PixelBuffer {
        self.buffer
    }
}
