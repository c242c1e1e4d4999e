//! Settings for annotation tools.

use crate::color::Color;
use crate::constants::{DEFAULT_ANNOTATION_HEIGHT, DEFAULT_ANNOTATION_WIDTH, DEFAULT_STROKE_WIDTH};
use crate::geometry::Size;

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationSettings {
    /// Color for new strokes and new text labels
    pub stroke_color: Color,
    /// Stroke width in display points
    pub stroke_width: f32,
    /// Frame size of a newly placed text label
    pub annotation_size: Size,
}

impl Default for AnnotationSettings {
    fn default() -> Self {
        Self {
            stroke_color: Color::BLACK,
            stroke_width: DEFAULT_STROKE_WIDTH,
            annotation_size: Size::new(DEFAULT_ANNOTATION_WIDTH, DEFAULT_ANNOTATION_HEIGHT),
        }
    }
}
