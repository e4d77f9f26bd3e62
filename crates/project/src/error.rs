//! Error types for the project crate (thiserror-based).

use thiserror::Error;

/// Errors that can occur during project file operations.
#[derive(Error, Debug)]
pub enum ProjectError {
    /// File I/O error (read, write, path resolution).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file parsed as JSON but violates a structural invariant of the
    /// project model (bad frame count, out-of-range selection, no layers).
    #[error("Malformed project: {reason}")]
    MalformedProject { reason: String },

    /// The project file path does not exist or is not a file.
    #[error("Project file not found: {path}")]
    NotFound { path: String },
}

/// Convenience Result type for project operations.
pub type ProjectResult<T> = Result<T, ProjectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ProjectError::MalformedProject {
            reason: "layer 0 has 7 frame slots".into(),
        };
        assert!(err.to_string().contains("7 frame slots"));

        let err = ProjectError::NotFound {
            path: "/tmp/missing.fla".into(),
        };
        assert!(err.to_string().contains("missing.fla"));
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no file");
        let err: ProjectError = io_err.into();
        assert!(matches!(err, ProjectError::Io(_)));
    }

    #[test]
    fn json_error_conversion() {
        let result: Result<crate::types::Project, _> = serde_json::from_str("not json");
        let err: ProjectError = result.unwrap_err().into();
        assert!(matches!(err, ProjectError::Json(_)));
    }
}
