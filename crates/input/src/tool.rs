//! Tool configuration — the live source of stroke color, width, and mode.
//!
//! The toolbar mutates this state at any time, including mid-stroke; the
//! router reads it per segment, so changing tool mid-stroke changes the
//! remainder of the stroke.

use serde::{Deserialize, Serialize};

use fl_common::{CompositeMode, EditorConfig, Rgba};

/// The active drawing tool.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
}

/// Current tool settings. Color stays a CSS hex string here because that is
/// what the toolbar hands us; it is parsed at draw time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolConfig {
    pub tool: Tool,
    pub color: String,
    pub width: f32,
}

impl ToolConfig {
    /// Seed tool settings from the editor config's brush defaults.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            tool: Tool::Brush,
            color: config.brush_color.clone(),
            width: config.brush_width,
        }
    }

    /// The composite mode the current tool draws with.
    pub fn composite_mode(&self) -> CompositeMode {
        match self.tool {
            Tool::Brush => CompositeMode::Normal,
            Tool::Eraser => CompositeMode::Erase,
        }
    }

    /// The stroke color, parsed. The eraser always works at full strength
    /// regardless of the selected color.
    pub fn rgba(&self) -> Rgba {
        match self.tool {
            Tool::Brush => Rgba::from_css(&self.color),
            Tool::Eraser => Rgba::BLACK,
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}
