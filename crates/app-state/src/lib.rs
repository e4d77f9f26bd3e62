//! `fl-app-state` — Application state for the FrameLoop animation editor.
//!
//! This crate provides:
//!
//! - **[`Editor`]**: the single owned state object holding the project
//!   model, view transform, tool state, input router, and playback clock —
//!   the explicit-ownership restructure of what the original editor kept in
//!   process-wide globals. All mutation flows through `&mut Editor` on one
//!   logical thread; the borrow checker enforces the single-writer property
//!   the design assumes.
//! - **[`PlaybackClock`]**: fixed-period frame advance gated by a playing flag.
//! - **[`UiSync`]**: dirty flags telling the host shell which external UI
//!   surfaces (layer list, timeline, canvas) need re-rendering.

pub mod playback;
pub mod state;

// Re-export primary types at crate root for convenience.
pub use playback::PlaybackClock;
pub use state::{Editor, UiSync};
