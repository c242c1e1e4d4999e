//! Text label records and their frame-origin identity.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::{Point, Rect};

/// Hashable identity of a text label: the origin of its frame.
///
/// Two labels never share an origin within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnnotationKey {
    x_bits: u32,
    y_bits: u32,
}

impl AnnotationKey {
    pub fn from_origin(origin: Point) -> Self {
        // -0.0 and 0.0 are the same position
        let bits = |v: f32| if v == 0.0 { 0.0f32.to_bits() } else { v.to_bits() };
        Self {
            x_bits: bits(origin.x),
            y_bits: bits(origin.y),
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(f32::from_bits(self.x_bits), f32::from_bits(self.y_bits))
    }
}

impl From<&Rect> for AnnotationKey {
    fn from(frame: &Rect) -> Self {
        AnnotationKey::from_origin(frame.origin)
    }
}

/// A placed text label.
///
/// Equality and hashing only look at the frame origin; `text` and `color`
/// are attributes of that identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub frame: Rect,
    pub text: String,
    pub color: Color,
}

impl TextAnnotation {
    pub fn new(frame: Rect, text: impl Into<String>, color: Color) -> Self {
        Self {
            frame,
            text: text.into(),
            color,
        }
    }

    pub fn key(&self) -> AnnotationKey {
        AnnotationKey::from(&self.frame)
    }

    /// Empty text marks the label for removal on commit.
    pub fn is_pending_deletion(&self) -> bool {
        self.text.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.frame.contains(point)
    }
}

impl PartialEq for TextAnnotation {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for TextAnnotation {}

impl Hash for TextAnnotation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
