//! Project deserialization — loading `.fla` project files.
//!
//! Unlike the compositor path, which silently skips bad cells, loading is
//! strict about the *structure* of a project file: wrong frame counts or
//! out-of-range selection indices fail with
//! [`ProjectError::MalformedProject`] instead of propagating broken state
//! into the live model. Bad *pixel data* inside an otherwise sound file is
//! demoted to an empty cell with a warning.

use std::path::Path;

use tracing::{debug, info, warn};

use fl_common::TOTAL_FRAMES;

use crate::error::{ProjectError, ProjectResult};
use crate::types::Project;

/// Deserialize and validate a project from a JSON string.
pub fn from_json_string(json: &str) -> ProjectResult<Project> {
    let mut project: Project = serde_json::from_str(json)?;

    debug!(
        version = project.version,
        layers = project.layers.len(),
        "Deserialized project from JSON"
    );

    validate_project(&project)?;
    scrub_malformed_cells(&mut project);

    Ok(project)
}

/// Load a project from a `.fla` file at the given path.
pub fn load_project(path: &Path) -> ProjectResult<Project> {
    if !path.exists() {
        return Err(ProjectError::NotFound {
            path: path.display().to_string(),
        });
    }

    let json = std::fs::read_to_string(path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to read project file");
        ProjectError::Io(e)
    })?;

    let project = from_json_string(&json)?;

    info!(
        path = %path.display(),
        layers = project.layers.len(),
        frame = project.current_frame,
        "Project loaded"
    );

    Ok(project)
}

/// Check the structural invariants of the project model.
fn validate_project(project: &Project) -> ProjectResult<()> {
    if project.layers.is_empty() {
        return Err(ProjectError::MalformedProject {
            reason: "project has no layers".into(),
        });
    }

    if project.resolution.width == 0 || project.resolution.height == 0 {
        return Err(ProjectError::MalformedProject {
            reason: format!("invalid resolution: {}", project.resolution),
        });
    }

    for (i, layer) in project.layers.iter().enumerate() {
        if layer.frames.len() != TOTAL_FRAMES {
            return Err(ProjectError::MalformedProject {
                reason: format!(
                    "layer {} ({}) has {} frame slots, expected {}",
                    i,
                    layer.name,
                    layer.frames.len(),
                    TOTAL_FRAMES
                ),
            });
        }
    }

    if project.current_frame >= TOTAL_FRAMES {
        return Err(ProjectError::MalformedProject {
            reason: format!("current frame {} out of range", project.current_frame),
        });
    }

    if project.current_layer >= project.layers.len() {
        return Err(ProjectError::MalformedProject {
            reason: format!("current layer {} out of range", project.current_layer),
        });
    }

    Ok(())
}

/// Drop cell buffers whose pixel data does not match the project resolution.
/// Malformed pixel data reads as "empty", never as an error.
fn scrub_malformed_cells(project: &mut Project) {
    let resolution = project.resolution;
    for (li, layer) in project.layers.iter_mut().enumerate() {
        for (fi, slot) in layer.frames.iter_mut().enumerate() {
            let bad = slot
                .as_ref()
                .is_some_and(|b| !b.is_well_formed() || b.resolution() != resolution);
            if bad {
                warn!(layer = li, frame = fi, "Dropping malformed frame buffer");
                *slot = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::save::{save_project, to_json_string};
    use crate::types::{Layer, Project};
    use fl_common::{PixelBuffer, Resolution, Rgba};

    fn sample_project() -> Project {
        let mut p = Project::new(Resolution::new(8, 8));
        p.add_layer();
        p.select_frame(2);
        let mut buf = PixelBuffer::new(p.resolution);
        buf.set_pixel(1, 1, Rgba::RED);
        p.capture_stroke(buf);
        p
    }

    #[test]
    fn roundtrip_preserves_model() {
        let p = sample_project();
        let json = to_json_string(&p).expect("serialize");
        let back = from_json_string(&json).expect("deserialize");

        assert_eq!(back.current_frame, 2);
        assert_eq!(back.current_layer, 0);
        let names: Vec<&str> = back.layer_names().collect();
        assert_eq!(names, vec!["Layer 2", "Layer 1"]);
        assert!(back.is_occupied(0, 2));
        assert!(!back.is_occupied(1, 2));
        assert_eq!(back, p);
    }

    #[test]
    fn save_then_load_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("roundtrip.fla");

        let p = sample_project();
        save_project(&p, &path).expect("save");
        let loaded = load_project(&path).expect("load");
        assert_eq!(loaded, p);
    }

    #[test]
    fn load_missing_file_fails_with_not_found() {
        let err = load_project(Path::new("/nonexistent/project.fla")).unwrap_err();
        assert!(matches!(err, ProjectError::NotFound { .. }));
    }

    #[test]
    fn invalid_json_fails() {
        let err = from_json_string("{{{").unwrap_err();
        assert!(matches!(err, ProjectError::Json(_)));
    }

    #[test]
    fn empty_layer_list_is_rejected() {
        let json = r#"{"currentFrame":0,"currentLayer":0,"layers":[]}"#;
        let err = from_json_string(json).unwrap_err();
        assert!(matches!(err, ProjectError::MalformedProject { .. }));
    }

    #[test]
    fn wrong_frame_slot_count_is_rejected() {
        let mut p = sample_project();
        p.layers[0].frames.pop();
        let json = to_json_string(&p).expect("serialize");
        let err = from_json_string(&json).unwrap_err();
        assert!(matches!(err, ProjectError::MalformedProject { .. }));
        assert!(err.to_string().contains("frame slots"));
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let mut p = sample_project();
        p.current_frame = 24;
        let json = to_json_string(&p).expect("serialize");
        assert!(matches!(
            from_json_string(&json).unwrap_err(),
            ProjectError::MalformedProject { .. }
        ));

        let mut p = sample_project();
        p.current_layer = 5;
        let json = to_json_string(&p).expect("serialize");
        assert!(matches!(
            from_json_string(&json).unwrap_err(),
            ProjectError::MalformedProject { .. }
        ));
    }

    #[test]
    fn malformed_cell_buffer_is_demoted_to_empty() {
        let mut p = sample_project();
        // Wrong byte length for the declared dimensions
        p.layers[0].frames[5] = Some(PixelBuffer::from_parts(8, 8, vec![1, 2, 3]));
        // Well-formed but at the wrong resolution
        p.layers[0].frames[6] = Some(PixelBuffer::new(Resolution::new(2, 2)));
        let json = to_json_string(&p).expect("serialize");

        let back = from_json_string(&json).expect("structurally sound file loads");
        assert!(back.layers[0].frames[5].is_none());
        assert!(back.layers[0].frames[6].is_none());
        // The good cell survives
        assert!(back.is_occupied(0, 2));
    }

    #[test]
    fn extra_layer_with_wrong_count_named_in_error() {
        let mut p = Project::new(Resolution::new(8, 8));
        p.layers.push(Layer {
            name: "Broken".into(),
            frames: vec![None; 3],
        });
        let json = to_json_string(&p).expect("serialize");
        let err = from_json_string(&json).unwrap_err();
        assert!(err.to_string().contains("Broken"));
    }
}
