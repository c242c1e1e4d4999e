//! Annotation session: the editing context for one photo.
//!
//! A session moves through `Idle -> Editing -> Committing -> Idle`. Entering
//! editing creates a stroke layer and a live field per saved label; `done`
//! flattens the strokes into the photo and hands the labels back unchanged;
//! `cancel` throws the pass away.
//!
//! ## Module Structure
//!
//! - [`editor`] - The [`AnnotationSession`] itself
//! - [`state`] - State machine, events, and commit results

mod editor;
mod state;

#[cfg(test)]
mod tests;

pub use editor::AnnotationSession;
pub use state::{CommitOutput, SessionEvent, SessionState, TapOutcome};
