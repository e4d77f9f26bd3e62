//! Error types for the compositor crate (thiserror-based).

use thiserror::Error;

/// Errors that can occur while rendering or exporting.
#[derive(Error, Debug)]
pub enum CompositorError {
    /// File I/O error while writing an export.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoding failed.
    #[error("PNG encoding error: {0}")]
    PngEncode(#[from] png::EncodingError),
}

/// Convenience Result type for compositor operations.
pub type CompositorResult<T> = Result<T, CompositorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CompositorError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
