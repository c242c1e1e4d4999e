//! Unit tests for the session module.

use image::{Rgba, RgbaImage};

use super::{AnnotationSession, SessionEvent, SessionState, TapOutcome};
use crate::annotations::TextAnnotation;
use crate::color::Color;
use crate::geometry::{Point, Rect, Size};

fn photo(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([200, 200, 200, 255]))
}

fn is_reddish(px: &Rgba<u8>) -> bool {
    px[0] > 200 && px[1] < 80 && px[2] < 80
}

fn is_bluish(px: &Rgba<u8>) -> bool {
    px[2] > 200 && px[0] < 80 && px[1] < 80
}

// Lifecycle tests
#[test]
fn test_new_session_is_idle() {
    let session = AnnotationSession::new(photo(10, 10));
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.stroke_layer().is_none());
    assert_eq!(session.annotation_count(), 0);
}

#[test]
fn test_edit_creates_stroke_layer_at_photo_resolution() {
    let mut session =
        AnnotationSession::new(photo(800, 600)).with_display_size(Size::new(400.0, 300.0));
    assert!(session.edit());
    assert!(session.is_editing());

    let layer = session.stroke_layer().unwrap();
    assert_eq!(layer.pixel_size(), (800, 600));
    assert_eq!(layer.scale(), (2.0, 2.0));
}

#[test]
fn test_blank_session_cannot_edit() {
    let mut session = AnnotationSession::blank();
    assert!(!session.edit());
    assert!(session.place_annotation(Point::new(5.0, 5.0)).is_none());
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn test_done_discards_stroke_layer() {
    let mut session = AnnotationSession::new(photo(50, 50));
    session.begin_stroke(Point::new(5.0, 5.0));
    session.extend_stroke(Point::new(45.0, 45.0));
    session.end_stroke();
    assert!(session.stroke_layer().is_some());

    let output = session.done().unwrap();
    assert!(session.stroke_layer().is_none());
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.base_image().unwrap(), &output.image);
}

#[test]
fn test_done_without_photo_is_silent() {
    let mut session = AnnotationSession::blank();
    assert!(session.done().is_none());
    assert!(session.take_events().is_empty());
}

// Text label tests
#[test]
fn test_place_then_commit_empty_is_net_zero() {
    let mut session = AnnotationSession::new(photo(200, 200));
    let before = session.annotation_count();

    let handle = session.place_annotation(Point::new(50.0, 50.0)).unwrap();
    session.commit_annotation(handle, "");

    assert_eq!(session.annotation_count(), before);
    assert!(session.live_fields().is_empty());
}

#[test]
fn test_place_frame_is_centered_with_default_size() {
    let mut session = AnnotationSession::new(photo(200, 200));
    let handle = session.place_annotation(Point::new(100.0, 100.0)).unwrap();
    assert_eq!(handle.frame, Rect::new(80.0, 80.0, 40.0, 40.0));

    let field = session.live_fields().get(handle.field).unwrap();
    assert!(field.focused);
    assert!(field.text.is_empty());
}

#[test]
fn test_commit_then_reopen_restores_one_field() {
    let mut session = AnnotationSession::new(photo(200, 200));
    let handle = session.place_annotation(Point::new(100.0, 100.0)).unwrap();
    session.commit_annotation(handle, "hello");

    let output = session.done().unwrap();
    assert!(session.live_fields().is_empty());

    assert!(session.reopen(&output.annotations));
    let fields = session.live_fields().as_slice();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].frame, handle.frame);
    assert_eq!(fields[0].text, "hello");
    assert!(!fields[0].focused);
}

#[test]
fn test_recommit_updates_text_but_not_color() {
    let mut session = AnnotationSession::new(photo(200, 200));
    session.set_stroke_color(Color::RED);
    let handle = session.place_annotation(Point::new(60.0, 60.0)).unwrap();
    session.commit_annotation(handle, "first");

    session.set_stroke_color(Color::BLUE);
    let mut recolored = handle;
    recolored.color = Color::BLUE;
    session.commit_annotation(recolored, "second");

    let labels = session.annotations();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].text, "second");
    assert_eq!(labels[0].color, Color::RED);
}

#[test]
fn test_commit_empty_removes_existing_label() {
    let mut session = AnnotationSession::new(photo(200, 200));
    let handle = session.place_annotation(Point::new(60.0, 60.0)).unwrap();
    session.commit_annotation(handle, "keep?");
    assert_eq!(session.annotation_count(), 1);

    session.commit_annotation(handle, "");
    assert_eq!(session.annotation_count(), 0);
}

#[test]
fn test_stale_handle_inserts_as_new() {
    let mut session = AnnotationSession::new(photo(200, 200));
    let handle = session.place_annotation(Point::new(60.0, 60.0)).unwrap();
    session.cancel();
    assert!(session.live_fields().is_empty());

    session.commit_annotation(handle, "late");
    let label = session.annotation_at_origin(handle.frame.origin).unwrap();
    assert_eq!(label.text, "late");
    assert_eq!(label.color, handle.color);
}

#[test]
fn test_same_origin_holds_one_label() {
    let mut session = AnnotationSession::new(photo(200, 200));
    let first = session.place_annotation(Point::new(60.0, 60.0)).unwrap();
    session.commit_annotation(first, "one");
    let second = session.place_annotation(Point::new(60.0, 60.0)).unwrap();

    // Placing on an occupied origin reuses the field there
    assert_eq!(second, first);
    assert_eq!(session.live_fields().len(), 1);
    assert!(session.live_fields().get(first.field).unwrap().focused);

    session.commit_annotation(second, "two");
    let labels = session.annotations();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].text, "two");
}

#[test]
fn test_clearing_shared_origin_leaves_no_orphan_field() {
    let mut session = AnnotationSession::new(photo(200, 200));
    let first = session.place_annotation(Point::new(60.0, 60.0)).unwrap();
    session.commit_annotation(first, "one");
    let second = session.place_annotation(Point::new(60.0, 60.0)).unwrap();
    session.commit_annotation(second, "");

    // What is shown matches what is saved
    assert!(session.live_fields().is_empty());
    assert_eq!(session.annotation_count(), 0);
}

#[test]
fn test_tap_focuses_existing_field() {
    let mut session = AnnotationSession::new(photo(200, 200));
    let placed = match session.tap(Point::new(100.0, 100.0)).unwrap() {
        TapOutcome::Placed(handle) => handle,
        other => panic!("expected placement, got {:?}", other),
    };
    session.commit_annotation(placed, "x");

    let outcome = session.tap(Point::new(105.0, 95.0)).unwrap();
    assert_eq!(outcome, TapOutcome::Focused(placed));
    assert!(session.live_fields().get(placed.field).unwrap().focused);
    assert_eq!(session.live_fields().len(), 1);
}

#[test]
fn test_move_annotation_rekeys_record() {
    let mut session = AnnotationSession::new(photo(300, 300));
    let handle = session.place_annotation(Point::new(100.0, 100.0)).unwrap();
    session.commit_annotation(handle, "moving");

    let moved = session.move_annotation(handle, Point::new(200.0, 150.0)).unwrap();
    assert_eq!(moved.frame.origin, Point::new(180.0, 130.0));
    assert!(session.annotation_at_origin(Point::new(80.0, 80.0)).is_none());
    assert_eq!(
        session.annotation_at_origin(Point::new(180.0, 130.0)).unwrap().text,
        "moving"
    );
}

#[test]
fn test_move_annotation_refuses_origin_of_uncommitted_field() {
    let mut session = AnnotationSession::new(photo(300, 300));
    let a = session.place_annotation(Point::new(100.0, 100.0)).unwrap();
    session.commit_annotation(a, "a");
    session.place_annotation(Point::new(200.0, 200.0)).unwrap();

    assert!(session.move_annotation(a, Point::new(200.0, 200.0)).is_none());
    assert_eq!(session.live_fields().len(), 2);
}

#[test]
fn test_move_annotation_refuses_occupied_origin() {
    let mut session = AnnotationSession::new(photo(300, 300));
    let a = session.place_annotation(Point::new(100.0, 100.0)).unwrap();
    session.commit_annotation(a, "a");
    let b = session.place_annotation(Point::new(200.0, 200.0)).unwrap();
    session.commit_annotation(b, "b");

    assert!(session.move_annotation(b, Point::new(100.0, 100.0)).is_none());
    assert_eq!(session.annotation_count(), 2);
}

// Stroke tests
#[test]
fn test_extend_without_begin_changes_nothing() {
    let mut session = AnnotationSession::new(photo(50, 50));
    session.edit();
    let before = session.stroke_layer().unwrap().image().clone();

    assert!(!session.extend_stroke(Point::new(20.0, 20.0)));
    assert_eq!(session.stroke_layer().unwrap().image(), &before);
}

#[test]
fn test_stroke_move_while_idle_is_ignored() {
    let mut session = AnnotationSession::new(photo(50, 50));
    assert!(!session.extend_stroke(Point::new(20.0, 20.0)));
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn test_two_colored_strokes_stay_separate() {
    let mut session = AnnotationSession::new(photo(100, 100));

    session.set_stroke_color(Color::RED);
    session.begin_stroke(Point::new(10.0, 20.0));
    session.extend_stroke(Point::new(50.0, 20.0));
    session.extend_stroke(Point::new(90.0, 20.0));
    session.end_stroke();

    session.set_stroke_color(Color::BLUE);
    session.begin_stroke(Point::new(10.0, 80.0));
    session.extend_stroke(Point::new(90.0, 80.0));
    session.end_stroke();

    let output = session.done().unwrap();
    let image = &output.image;
    assert!(is_reddish(image.get_pixel(50, 20)));
    assert!(is_bluish(image.get_pixel(50, 80)));
    assert!(!is_bluish(image.get_pixel(50, 20)));
    assert!(!is_reddish(image.get_pixel(50, 80)));
    // Between the strokes the photo shows through
    assert_eq!(*image.get_pixel(50, 50), Rgba([200, 200, 200, 255]));
}

#[test]
fn test_strokes_follow_overlay_with_other_aspect_ratio() {
    // 800x600 photo shown in a square 400x400 overlay
    let mut session =
        AnnotationSession::new(photo(800, 600)).with_display_size(Size::new(400.0, 400.0));
    session.set_stroke_color(Color::RED);

    session.begin_stroke(Point::new(100.0, 200.0));
    session.extend_stroke(Point::new(300.0, 200.0));
    session.end_stroke();
    session.begin_stroke(Point::new(100.0, 390.0));
    session.extend_stroke(Point::new(300.0, 390.0));
    session.end_stroke();

    let output = session.done().unwrap();
    assert_eq!(output.image.dimensions(), (800, 600));
    // Overlay y=200 is halfway down the photo, y=390 is near its bottom
    assert!(is_reddish(output.image.get_pixel(400, 300)));
    assert!(!is_reddish(output.image.get_pixel(400, 400)));
    assert!(is_reddish(output.image.get_pixel(400, 585)));
}

#[test]
fn test_round_trip_keeps_dimensions_and_label() {
    let mut session = AnnotationSession::new(photo(800, 600));
    let handle = session.place_annotation(Point::new(100.0, 100.0)).unwrap();
    session.commit_annotation(handle, "Hi");

    let output = session.done().unwrap();
    assert_eq!(output.image.dimensions(), (800, 600));
    assert_eq!(output.annotations.len(), 1);
    assert_eq!(output.annotations[0].text, "Hi");
    assert_eq!(output.annotations[0].frame.origin, Point::new(80.0, 80.0));
}

#[test]
fn test_labels_are_not_baked_into_image() {
    let base = photo(200, 200);
    let mut session = AnnotationSession::new(base.clone());
    let handle = session.place_annotation(Point::new(100.0, 100.0)).unwrap();
    session.commit_annotation(handle, "not pixels");

    let output = session.done().unwrap();
    assert_eq!(output.image.as_raw(), base.as_raw());
}

// Cancel tests
#[test]
fn test_cancel_restores_labels_and_keeps_photo() {
    let base = photo(200, 200);
    let mut session = AnnotationSession::new(base.clone());
    let kept = session.place_annotation(Point::new(50.0, 50.0)).unwrap();
    session.commit_annotation(kept, "kept");
    session.done();

    session.edit();
    let extra = session.place_annotation(Point::new(150.0, 150.0)).unwrap();
    session.commit_annotation(extra, "extra");
    let restored = session.live_fields().as_slice()[0].handle();
    session.commit_annotation(restored, "");
    session.begin_stroke(Point::new(0.0, 0.0));
    session.extend_stroke(Point::new(199.0, 199.0));
    assert_eq!(session.annotation_count(), 1);

    assert!(session.cancel());
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.stroke_layer().is_none());
    let labels = session.annotations();
    assert_eq!(labels, vec![TextAnnotation::new(kept.frame, "kept", Color::BLACK)]);
    assert_eq!(labels[0].text, "kept");
    assert_eq!(session.base_image().unwrap().as_raw(), base.as_raw());
}

#[test]
fn test_edit_while_editing_keeps_cancel_snapshot() {
    let mut session = AnnotationSession::new(photo(200, 200));
    let kept = session.place_annotation(Point::new(50.0, 50.0)).unwrap();
    session.commit_annotation(kept, "kept");
    session.done();

    assert!(session.edit());
    let extra = session.place_annotation(Point::new(150.0, 150.0)).unwrap();
    session.commit_annotation(extra, "extra");
    assert!(!session.edit());
    assert_eq!(session.live_fields().len(), 2);

    assert!(session.cancel());
    let labels = session.annotations();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].text, "kept");
}

#[test]
fn test_cancel_when_idle_does_nothing() {
    let mut session = AnnotationSession::new(photo(10, 10));
    assert!(!session.cancel());
}

// Event tests
#[test]
fn test_events_report_label_count() {
    let mut session = AnnotationSession::new(photo(100, 100));
    let handle = session.place_annotation(Point::new(50.0, 50.0)).unwrap();
    session.commit_annotation(handle, "a");
    session.commit_annotation(handle, "b");
    session.commit_annotation(handle, "");

    assert_eq!(
        session.take_events(),
        vec![
            SessionEvent::AnnotationCountChanged(1),
            SessionEvent::AnnotationCountChanged(0),
        ]
    );
    assert!(session.take_events().is_empty());
}

#[test]
fn test_clear_drops_everything() {
    let mut session = AnnotationSession::new(photo(100, 100));
    let handle = session.place_annotation(Point::new(50.0, 50.0)).unwrap();
    session.commit_annotation(handle, "a");
    session.take_events();

    assert!(session.clear());
    assert!(!session.has_base_image());
    assert_eq!(session.annotation_count(), 0);
    assert!(session.live_fields().is_empty());
    assert_eq!(
        session.take_events(),
        vec![
            SessionEvent::AnnotationCountChanged(0),
            SessionEvent::ImageCleared
        ]
    );
    assert!(!session.clear());
}

#[test]
fn test_set_base_image_drops_old_labels() {
    let mut session = AnnotationSession::new(photo(100, 100));
    let handle = session.place_annotation(Point::new(50.0, 50.0)).unwrap();
    session.commit_annotation(handle, "old");

    session.set_base_image(photo(30, 20));
    assert_eq!(session.annotation_count(), 0);
    assert_eq!(session.display_size(), Size::new(30.0, 20.0));
    assert_eq!(session.state(), SessionState::Idle);
}
