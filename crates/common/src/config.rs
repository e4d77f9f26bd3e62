//! Editor configuration.

use serde::{Deserialize, Serialize};

use crate::types::Resolution;

/// Top-level editor configuration: canvas size, playback rate, onion skin,
/// and brush defaults. The toolbar mutates the brush fields live; strokes
/// read them per segment, not once at stroke start.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Drawing canvas size. Every frame buffer is captured at this size.
    pub resolution: Resolution,
    /// Playback rate in frames per second.
    pub fps: u32,
    /// Whether to overlay the previous frame of the active layer.
    pub onion_skin: bool,
    /// Opacity of the onion-skin overlay (0..1).
    pub onion_alpha: f32,
    /// Default brush color as a CSS hex string.
    pub brush_color: String,
    /// Default brush width in canvas pixels.
    pub brush_width: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::DEFAULT,
            fps: 12,
            onion_skin: true,
            onion_alpha: 0.3,
            brush_color: "#000000".to_string(),
            brush_width: 4.0,
        }
    }
}
