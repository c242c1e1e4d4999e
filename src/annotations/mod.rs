//! Annotation building blocks for marking up a photo.
//!
//! Annotations come in two kinds: freehand strokes, which are rasterized into
//! a [`StrokeLayer`] as the user drags, and text labels, which stay live and
//! editable as [`TextAnnotation`] records keyed by frame origin.
//!
//! ## Module Structure
//!
//! - [`text`] - Text label records and their identity key
//! - [`stroke`] - Freehand stroke raster
//! - [`fields`] - Live editable fields shown while editing
//! - [`hit_testing`] - Tap detection on labels
//! - [`state`] - Tool settings (color, width, label size)

mod fields;
mod hit_testing;
mod state;
mod stroke;
mod text;

// Re-exports - Records
pub use text::{AnnotationKey, TextAnnotation};

// Re-exports - Raster
pub use stroke::StrokeLayer;

// Re-exports - Live fields
pub use fields::{AnnotationHandle, FieldId, LiveField, LiveFields};

// Re-exports - Hit Testing
pub use hit_testing::{annotation_at, field_at};

// Re-exports - State
pub use state::AnnotationSettings;
