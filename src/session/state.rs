//! Session state, events, and results.

use image::RgbaImage;

use crate::annotations::{AnnotationHandle, TextAnnotation};

/// Editing lifecycle of one photo.
///
/// `Idle -> Editing -> Committing -> Idle`. Committing only exists for the
/// duration of [`AnnotationSession::done`](super::AnnotationSession::done).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Editing,
    Committing,
}

/// Change notifications queued by a session for whoever owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Number of saved text labels changed
    AnnotationCountChanged(usize),
    /// Photo and labels were removed
    ImageCleared,
    /// A new photo was set, either captured or flattened
    ImageReplaced,
}

/// Result of committing an edit: the flattened photo plus the labels that
/// stay live on top of it.
#[derive(Debug, Clone)]
pub struct CommitOutput {
    pub image: RgbaImage,
    pub annotations: Vec<TextAnnotation>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapOutcome {
    /// A new empty label was placed at the tap
    Placed(AnnotationHandle),
    /// An existing label was hit and now has focus
    Focused(AnnotationHandle),
}

impl TapOutcome {
    pub fn handle(&self) -> AnnotationHandle {
        match self {
            TapOutcome::Placed(handle) | TapOutcome::Focused(handle) => *handle,
        }
    }
}
