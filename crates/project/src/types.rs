//! Project data model — the layer stack and its frame cells.
//!
//! A [`Project`] owns an ordered stack of [`Layer`]s. Stacking order is
//! insertion order: index 0 is visually topmost. Each layer owns exactly
//! [`TOTAL_FRAMES`] frame slots; a slot is either empty or holds the
//! exclusively-owned [`PixelBuffer`] captured for that (layer, frame) cell.

use serde::{Deserialize, Serialize};
use tracing::debug;

use fl_common::{PixelBuffer, Resolution, TOTAL_FRAMES};

/// Current `.fla` format version.
pub const PROJECT_FORMAT_VERSION: u32 = 1;

fn default_version() -> u32 {
    PROJECT_FORMAT_VERSION
}

/// A single layer: a name and a fixed-length frame sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    /// Display name ("Layer 1", "Layer 2", ...).
    pub name: String,
    /// Exactly [`TOTAL_FRAMES`] slots; `None` renders as transparent.
    pub frames: Vec<Option<PixelBuffer>>,
}

impl Layer {
    /// Create a layer with all frame slots empty.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frames: vec![None; TOTAL_FRAMES],
        }
    }

    /// Number of occupied frame slots.
    pub fn occupied_count(&self) -> usize {
        self.frames.iter().filter(|f| f.is_some()).count()
    }
}

/// The whole project: layer stack plus current selection.
///
/// This struct is both the live model and the `.fla` file payload — saving
/// serializes it wholesale, loading replaces it wholesale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Format version, for forward compatibility of saved files.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Canvas size every frame buffer is captured at.
    #[serde(default)]
    pub resolution: Resolution,
    /// Currently selected frame index, `0..TOTAL_FRAMES`.
    pub current_frame: usize,
    /// Currently selected layer index, `0..layers.len()`.
    pub current_layer: usize,
    /// Layer stack, index 0 topmost.
    pub layers: Vec<Layer>,
}

impl Project {
    /// Create a project with one empty layer ("Layer 1") selected at frame 0.
    pub fn new(resolution: Resolution) -> Self {
        Self {
            version: PROJECT_FORMAT_VERSION,
            resolution,
            current_frame: 0,
            current_layer: 0,
            layers: vec![Layer::new("Layer 1")],
        }
    }

    /// Insert a new empty layer at the top of the stack and select it.
    /// The name continues the "Layer N" sequence.
    pub fn add_layer(&mut self) {
        let name = format!("Layer {}", self.layers.len() + 1);
        debug!(name = %name, "Adding layer");
        self.layers.insert(0, Layer::new(name));
        self.current_layer = 0;
    }

    /// Select a frame. Internally produced indices are always in range;
    /// anything else is clamped rather than panicking.
    pub fn select_frame(&mut self, index: usize) {
        self.current_frame = index.min(TOTAL_FRAMES - 1);
    }

    /// Select a layer, clamped to the existing stack.
    pub fn select_layer(&mut self, index: usize) {
        self.current_layer = index.min(self.layers.len().saturating_sub(1));
    }

    /// Store a captured stroke buffer into the current (layer, frame) cell,
    /// overwriting any prior content. No history is kept.
    pub fn capture_stroke(&mut self, buffer: PixelBuffer) {
        debug!(
            layer = self.current_layer,
            frame = self.current_frame,
            "Capturing stroke"
        );
        self.layers[self.current_layer].frames[self.current_frame] = Some(buffer);
    }

    /// The buffer at a (layer, frame) cell, if occupied and well-formed.
    /// Empty and malformed cells both read as `None`.
    pub fn frame(&self, layer: usize, frame: usize) -> Option<&PixelBuffer> {
        self.layers
            .get(layer)?
            .frames
            .get(frame)?
            .as_ref()
            .filter(|b| b.is_well_formed())
    }

    /// The buffer at the currently selected cell.
    pub fn current_cell(&self) -> Option<&PixelBuffer> {
        self.frame(self.current_layer, self.current_frame)
    }

    /// Layer names in stacking order, for the layer-list UI.
    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|l| l.name.as_str())
    }

    /// Whether a (layer, frame) cell holds content, for the timeline UI.
    pub fn is_occupied(&self, layer: usize, frame: usize) -> bool {
        self.frame(layer, frame).is_some()
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new(Resolution::DEFAULT)
    }
}
