//! Hit testing functions for detecting taps on text labels.

use crate::geometry::Point;

use super::fields::{LiveField, LiveFields};
use super::text::TextAnnotation;

/// Topmost live field whose frame contains `point`
pub fn field_at(fields: &LiveFields, point: Point) -> Option<&LiveField> {
    fields.iter().rev().find(|f| f.frame.contains(point))
}

/// Any saved label whose frame contains `point`
pub fn annotation_at<'a, I>(annotations: I, point: Point) -> Option<&'a TextAnnotation>
where
    I: IntoIterator<Item = &'a TextAnnotation>,
{
    annotations.into_iter().find(|a| a.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::geometry::Rect;

    #[test]
    fn test_field_at_prefers_topmost() {
        let mut fields = LiveFields::default();
        let below = fields.place(Rect::new(0.0, 0.0, 40.0, 40.0), Color::RED);
        let above = fields.place(Rect::new(20.0, 20.0, 40.0, 40.0), Color::BLUE);

        assert_eq!(field_at(&fields, Point::new(30.0, 30.0)).unwrap().id, above.field);
        assert_eq!(field_at(&fields, Point::new(5.0, 5.0)).unwrap().id, below.field);
        assert!(field_at(&fields, Point::new(100.0, 100.0)).is_none());
    }

    #[test]
    fn test_annotation_at() {
        let labels = [
            TextAnnotation::new(Rect::new(0.0, 0.0, 40.0, 40.0), "a", Color::RED),
            TextAnnotation::new(Rect::new(100.0, 0.0, 40.0, 40.0), "b", Color::RED),
        ];
        let hit = annotation_at(&labels, Point::new(110.0, 10.0)).unwrap();
        assert_eq!(hit.text, "b");
        assert!(annotation_at(&labels, Point::new(60.0, 10.0)).is_none());
    }
}
