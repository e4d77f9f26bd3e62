//! Project serialization — writing `.fla` project files.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{ProjectError, ProjectResult};
use crate::types::Project;

/// Serialize a project to a pretty-printed JSON string.
pub fn to_json_string(project: &Project) -> ProjectResult<String> {
    let json = serde_json::to_string_pretty(project)?;
    debug!(
        layers = project.layers.len(),
        json_len = json.len(),
        "Serialized project to JSON"
    );
    Ok(json)
}

/// Save a project to a `.fla` file at the given path.
///
/// The file is written atomically: data goes to a temporary file in the same
/// directory first, then a rename moves it into place, so an interrupted
/// write never leaves a truncated project file behind.
pub fn save_project(project: &Project, path: &Path) -> ProjectResult<()> {
    let json = to_json_string(project)?;

    let temp_path = path.with_extension("fla.tmp");

    std::fs::write(&temp_path, json.as_bytes()).map_err(|e| {
        tracing::error!(path = %temp_path.display(), error = %e, "Failed to write temp file");
        ProjectError::Io(e)
    })?;

    std::fs::rename(&temp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        tracing::error!(
            from = %temp_path.display(),
            to = %path.display(),
            error = %e,
            "Failed to rename temp file to target"
        );
        ProjectError::Io(e)
    })?;

    info!(
        path = %path.display(),
        layers = project.layers.len(),
        "Project saved"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Project;
    use fl_common::{PixelBuffer, Resolution, Rgba};

    fn sample_project() -> Project {
        let mut p = Project::new(Resolution::new(8, 8));
        let mut buf = PixelBuffer::new(p.resolution);
        buf.set_pixel(2, 2, Rgba::RED);
        p.capture_stroke(buf);
        p
    }

    #[test]
    fn to_json_string_produces_valid_json() {
        let json = to_json_string(&sample_project()).expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse as Value");
        assert_eq!(value["currentFrame"], 0);
        assert_eq!(value["layers"][0]["name"], "Layer 1");
        assert!(value["layers"][0]["frames"][0].is_object());
        assert!(value["layers"][0]["frames"][1].is_null());
    }

    #[test]
    fn save_project_creates_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("test_project.fla");

        save_project(&sample_project(), &path).expect("save");

        assert!(path.exists());
        let contents = std::fs::read_to_string(&path).expect("read");
        assert!(contents.contains("Layer 1"));
    }

    #[test]
    fn save_project_atomic_no_temp_residue() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("atomic.fla");
        let temp_path = path.with_extension("fla.tmp");

        save_project(&sample_project(), &path).expect("save");

        assert!(!temp_path.exists());
        assert!(path.exists());
    }
}
