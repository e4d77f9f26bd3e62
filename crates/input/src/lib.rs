//! `fl-input` — Pointer input routing for the FrameLoop animation editor.
//!
//! This crate is intentionally independent of any UI framework. The host
//! shell translates its native pointer/touch/wheel/key events into
//! [`PointerEvent`] values; the [`InputRouter`] state machine turns those
//! into strokes, pans, and zooms against the project model and view
//! transform, reporting what needs resyncing via [`RouterEffect`].
//!
//! - **[`ToolConfig`]**: live brush/eraser settings, read per stroke segment
//! - **[`StrokeCanvas`]**: working raster for an in-progress stroke
//! - **[`InputRouter`]**: `Idle -> Drawing -> Idle` / `Idle -> Panning -> Idle`

pub mod router;
pub mod stroke;
pub mod tool;

// Re-export primary API at crate root
pub use router::{InputRouter, PointerEvent, RouterEffect, RouterState};
pub use stroke::StrokeCanvas;
pub use tool::{Tool, ToolConfig};
