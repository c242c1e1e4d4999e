//! Live, editable text fields shown over the photo while editing.
//!
//! A field is the on-screen counterpart of a [`TextAnnotation`]: the caller
//! renders one text-entry surface per field and reports the committed text
//! back through the session.

use crate::color::Color;
use crate::geometry::{Point, Rect};

use super::text::{AnnotationKey, TextAnnotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub u64);

/// Returned by placing or focusing a label; passed back on commit.
///
/// Carries the frame and creation color so a commit still lands after the
/// field itself was torn down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotationHandle {
    pub field: FieldId,
    pub frame: Rect,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveField {
    pub id: FieldId,
    pub frame: Rect,
    pub text: String,
    pub color: Color,
    /// Whether this field holds keyboard focus
    pub focused: bool,
}

impl LiveField {
    pub fn handle(&self) -> AnnotationHandle {
        AnnotationHandle {
            field: self.id,
            frame: self.frame,
            color: self.color,
        }
    }
}

/// Ordered collection of live fields. Later fields draw on top.
#[derive(Debug, Default, Clone)]
pub struct LiveFields {
    fields: Vec<LiveField>,
    next_id: u64,
}

impl LiveFields {
    /// Add an empty, focused field. Any other field loses focus.
    pub fn place(&mut self, frame: Rect, color: Color) -> AnnotationHandle {
        self.blur_all();
        let field = self.push(frame, String::new(), color, true);
        field.handle()
    }

    /// Recreate an unfocused field for a saved label.
    pub fn restore(&mut self, annotation: &TextAnnotation) -> AnnotationHandle {
        let field = self.push(
            annotation.frame,
            annotation.text.clone(),
            annotation.color,
            false,
        );
        field.handle()
    }

    fn push(&mut self, frame: Rect, text: String, color: Color, focused: bool) -> &LiveField {
        let id = FieldId(self.next_id);
        self.next_id += 1;
        self.fields.push(LiveField {
            id,
            frame,
            text,
            color,
            focused,
        });
        &self.fields[self.fields.len() - 1]
    }

    pub fn get(&self, id: FieldId) -> Option<&LiveField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn get_mut(&mut self, id: FieldId) -> Option<&mut LiveField> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    pub fn remove(&mut self, id: FieldId) -> Option<LiveField> {
        let index = self.fields.iter().position(|f| f.id == id)?;
        Some(self.fields.remove(index))
    }

    /// Give focus to `id` alone. Returns false if no such field exists.
    pub fn focus(&mut self, id: FieldId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        for field in &mut self.fields {
            field.focused = field.id == id;
        }
        true
    }

    pub fn blur_all(&mut self) {
        for field in &mut self.fields {
            field.focused = false;
        }
    }

    pub fn focused(&self) -> Option<&LiveField> {
        self.fields.iter().find(|f| f.focused)
    }

    /// The field whose frame starts at `origin`, if any.
    pub fn at_origin(&self, origin: Point) -> Option<&LiveField> {
        let key = AnnotationKey::from_origin(origin);
        self.fields
            .iter()
            .find(|f| AnnotationKey::from(&f.frame) == key)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LiveField> {
        self.fields.iter()
    }

    pub fn as_slice(&self) -> &[LiveField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }
}
