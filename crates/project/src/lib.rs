//! `fl-project` — Project model and `.fla` file handling for FrameLoop.
//!
//! This crate owns the layered frame store at the heart of the editor and
//! its persistence:
//!
//! - **Model**: [`Project`] and [`Layer`] — an ordered layer stack, each
//!   layer holding a fixed 24-slot frame sequence of optional raster buffers
//! - **Save/Load**: JSON serialization to `.fla` project files with atomic
//!   writes and validated loads
//! - **Errors**: [`ProjectError`] (thiserror-based)
//!
//! The `.fla` extension is this editor's own JSON encoding; it has nothing
//! to do with Adobe's binary FLA format.

pub mod error;
pub mod load;
pub mod save;
pub mod types;

// Re-export primary API at crate root
pub use error::{ProjectError, ProjectResult};
pub use load::{from_json_string, load_project};
pub use save::{save_project, to_json_string};
pub use types::{Layer, Project, PROJECT_FORMAT_VERSION};
