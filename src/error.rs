//! Error types surfaced by the photo collaborators.
//!
//! Only conditions the user has to hear about are errors. A stroke extended
//! before it began and a commit for a torn-down label are handled in place
//! by the annotation session and never reach this type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhotoError {
    /// No capture device is present or access was not granted.
    #[error("no camera available")]
    CameraUnavailable,

    /// Flatten or save was requested with no photo set.
    #[error("there is no photo to save")]
    MissingBaseImage,

    /// The photo library reported a failed write.
    #[error("failed to save photo: {0}")]
    SaveFailure(String),

    #[error("failed to decode photo {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_failure_message() {
        let err = PhotoError::SaveFailure("disk full".to_string());
        assert_eq!(err.to_string(), "failed to save photo: disk full");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PhotoError = io.into();
        assert!(matches!(err, PhotoError::Io(_)));
    }
}
