//! `fl-compositor` — Rendering for the FrameLoop animation editor.
//!
//! This crate turns the project model into pixels:
//!
//! - **[`ViewTransform`]**: pan offset and clamped zoom applied to the view
//! - **[`RenderSurface`]**: the minimal drawing-target abstraction the core
//!   needs (clear, transform, stroke, raster draw) — no graphics-API commitment
//! - **[`SoftwareSurface`]**: CPU implementation over a [`fl_common::PixelBuffer`]
//! - **[`Compositor`]**: stacks layers for the current frame with optional
//!   onion-skin overlay of the active layer's previous frame
//! - **Spritesheet**: raw 1:1 export of all 24 frames side by side as PNG

pub mod compositor;
pub mod error;
pub mod spritesheet;
pub mod surface;
pub mod view;

// Re-export primary API at crate root
pub use compositor::Compositor;
pub use error::{CompositorError, CompositorResult};
pub use spritesheet::{encode_png, export_spritesheet, render_spritesheet};
pub use surface::{RenderSurface, SoftwareSurface};
pub use view::ViewTransform;
