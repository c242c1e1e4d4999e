//! User-facing dismissible notices.

use crate::error::PhotoError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NoCameraAvailable,
    ImageSaved,
    SaveFailed,
    CannotAddImage,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::NoCameraAvailable => "No Camera Available",
            Notice::ImageSaved => "Image Saved",
            Notice::SaveFailed => "Error saving image",
            Notice::CannotAddImage => "Cannot add new Image!",
        }
    }

    /// Label for the single button that dismisses the notice
    pub fn dismiss_label(&self) -> &'static str {
        match self {
            Notice::ImageSaved => "Okay",
            _ => "Dismiss",
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::ImageSaved)
    }

    /// Notice to show for a failed collaborator call, if any.
    ///
    /// A missing photo is silent.
    pub fn for_error(error: &PhotoError) -> Option<Notice> {
        match error {
            PhotoError::CameraUnavailable => Some(Notice::NoCameraAvailable),
            PhotoError::MissingBaseImage => None,
            PhotoError::SaveFailure(_) | PhotoError::Io(_) => Some(Notice::SaveFailed),
            PhotoError::Decode { .. } => Some(Notice::CannotAddImage),
        }
    }
}
