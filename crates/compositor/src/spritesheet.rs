//! Spritesheet export — all 24 frames in one horizontal strip, PNG-encoded.
//!
//! Frames are composited raw (no view transform, no onion skin), layers
//! bottom-to-top, each frame at horizontal offset `f * frame_width`.

use std::path::Path;

use tracing::{debug, info};

use fl_common::{PixelBuffer, Resolution, TOTAL_FRAMES};
use fl_project::Project;

use crate::error::CompositorResult;

/// Composite every frame of the project into a single strip buffer of size
/// `(frame_width * TOTAL_FRAMES) x frame_height`. Empty cells contribute
/// nothing; a fully empty frame is a transparent column.
pub fn render_spritesheet(project: &Project) -> PixelBuffer {
    let frame_w = project.resolution.width;
    let out_res = Resolution::new(frame_w * TOTAL_FRAMES as u32, project.resolution.height);
    let mut out = PixelBuffer::new(out_res);

    debug!(
        frames = TOTAL_FRAMES,
        strip = %out_res,
        "Rendering spritesheet"
    );

    for f in 0..TOTAL_FRAMES {
        let x_off = f as i64 * frame_w as i64;
        for idx in (0..project.layers.len()).rev() {
            if let Some(buffer) = project.frame(idx, f) {
                out.composite_over(buffer, x_off, 0, 1.0);
            }
        }
    }

    out
}

/// Encode an RGBA buffer as PNG bytes.
pub fn encode_png(buffer: &PixelBuffer) -> CompositorResult<Vec<u8>> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, buffer.width(), buffer.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(buffer.as_bytes())?;
    }
    Ok(bytes)
}

/// Render the spritesheet and write it as a PNG file.
pub fn export_spritesheet(project: &Project, path: &Path) -> CompositorResult<()> {
    let strip = render_spritesheet(project);
    let bytes = encode_png(&strip)?;
    std::fs::write(path, &bytes)?;
    info!(
        path = %path.display(),
        width = strip.width(),
        height = strip.height(),
        "Spritesheet exported"
    );
    Ok(())
}
