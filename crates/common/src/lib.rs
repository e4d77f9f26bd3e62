//! `fl-common` — Shared types for the FrameLoop animation editor core.
//!
//! This crate is the foundation that all other editor crates depend on.
//! It defines the core abstractions:
//!
//! - **Types**: `Resolution`, `Point`, `TOTAL_FRAMES` (timeline length)
//! - **Color**: `Rgba` with CSS hex parsing (tool colors arrive as strings)
//! - **Buffer**: `PixelBuffer`, the owned RGBA raster stored per (layer, frame) cell
//! - **Compositing**: `CompositeMode` (brush vs. eraser semantics)
//! - **Config**: `EditorConfig` (canvas size, playback rate, onion skin, brush defaults)

pub mod buffer;
pub mod color;
pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use buffer::{CompositeMode, PixelBuffer};
pub use color::Rgba;
pub use config::EditorConfig;
pub use types::{Point, Resolution, TOTAL_FRAMES};
