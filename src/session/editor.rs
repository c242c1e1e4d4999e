//! The per-photo annotation session.

use std::collections::HashMap;

use image::RgbaImage;
use tracing::{debug, info, trace};

use crate::annotations::{
    AnnotationHandle, AnnotationKey, AnnotationSettings, LiveFields, StrokeLayer, TextAnnotation,
    field_at,
};
use crate::color::Color;
use crate::compositor::flatten;
use crate::geometry::{Point, Rect, Size};

use super::state::{CommitOutput, SessionEvent, SessionState, TapOutcome};

/// Editing context for exactly one photo.
///
/// Owns the photo, the stroke layer (only while editing), the saved text
/// labels keyed by frame origin, and the live fields shown while editing.
/// Changes the owner may care about are queued as [`SessionEvent`]s.
#[derive(Debug, Default)]
pub struct AnnotationSession {
    base: Option<RgbaImage>,
    /// Overlay bounds in points; `None` means the photo's pixel size
    display_size: Option<Size>,
    strokes: Option<StrokeLayer>,
    annotations: HashMap<AnnotationKey, TextAnnotation>,
    /// Labels as they were when editing began, restored on cancel
    snapshot: Option<HashMap<AnnotationKey, TextAnnotation>>,
    fields: LiveFields,
    settings: AnnotationSettings,
    state: SessionState,
    events: Vec<SessionEvent>,
}

impl AnnotationSession {
    pub fn new(base: RgbaImage) -> Self {
        Self {
            base: Some(base),
            ..Default::default()
        }
    }

    /// Session with no photo yet, e.g. a page appended by swiping.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: AnnotationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_display_size(mut self, size: Size) -> Self {
        self.set_display_size(size);
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.state == SessionState::Editing
    }

    pub fn base_image(&self) -> Option<&RgbaImage> {
        self.base.as_ref()
    }

    pub fn has_base_image(&self) -> bool {
        self.base.is_some()
    }

    pub fn settings(&self) -> &AnnotationSettings {
        &self.settings
    }

    /// Overlay bounds in display points.
    pub fn display_size(&self) -> Size {
        if let Some(size) = self.display_size {
            return size;
        }
        self.base
            .as_ref()
            .map(|img| Size::new(img.width() as f32, img.height() as f32))
            .unwrap_or_default()
    }

    /// Change the overlay bounds. Takes effect from the next editing pass.
    pub fn set_display_size(&mut self, size: Size) {
        let usable = size.width.is_finite() && size.height.is_finite() && !size.is_empty();
        self.display_size = usable.then_some(size);
    }

    pub fn stroke_color(&self) -> Color {
        self.settings.stroke_color
    }

    /// Color for later strokes and labels. Existing pixels and labels keep
    /// theirs.
    pub fn set_stroke_color(&mut self, color: Color) {
        self.settings.stroke_color = color;
        if let Some(strokes) = self.strokes.as_mut() {
            strokes.set_color(color);
        }
    }

    pub fn stroke_layer(&self) -> Option<&StrokeLayer> {
        self.strokes.as_ref()
    }

    pub fn live_fields(&self) -> &LiveFields {
        &self.fields
    }

    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }

    pub fn annotation_at_origin(&self, origin: Point) -> Option<&TextAnnotation> {
        self.annotations.get(&AnnotationKey::from_origin(origin))
    }

    /// Saved labels, top-to-bottom then left-to-right.
    pub fn annotations(&self) -> Vec<TextAnnotation> {
        let mut labels: Vec<TextAnnotation> = self.annotations.values().cloned().collect();
        labels.sort_by(|a, b| {
            a.frame
                .origin
                .y
                .total_cmp(&b.frame.origin.y)
                .then(a.frame.origin.x.total_cmp(&b.frame.origin.x))
        });
        labels
    }

    /// Drain queued events.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Resume editing with this session's own saved labels.
    pub fn edit(&mut self) -> bool {
        let prior = self.annotations();
        self.reopen(&prior)
    }

    /// Enter editing on the current photo with `prior` as the saved labels,
    /// recreating a live field for each one.
    ///
    /// Returns false when there is no photo to edit, or when an editing pass
    /// is already open (its fields and cancel snapshot are kept).
    pub fn reopen(&mut self, prior: &[TextAnnotation]) -> bool {
        if self.base.is_none() {
            debug!("Cannot edit a session without a photo");
            return false;
        }
        if self.state != SessionState::Idle {
            debug!("Already editing, keeping the open pass");
            return false;
        }

        let before = self.annotations.len();
        self.annotations = prior.iter().map(|a| (a.key(), a.clone())).collect();
        self.snapshot = Some(self.annotations.clone());

        self.fields.clear();
        for annotation in self.annotations() {
            self.fields.restore(&annotation);
        }

        if self.strokes.is_none() {
            self.strokes = Some(self.new_stroke_layer());
        }
        self.state = SessionState::Editing;

        if self.annotations.len() != before {
            self.events
                .push(SessionEvent::AnnotationCountChanged(self.annotations.len()));
        }
        info!("Editing photo with {} text labels", self.annotations.len());
        true
    }

    fn new_stroke_layer(&self) -> StrokeLayer {
        let display = self.display_size();
        let (width, height) = self
            .base
            .as_ref()
            .map(|img| img.dimensions())
            .unwrap_or((display.width as u32, display.height as u32));

        // The overlay stretches over the whole photo, so x and y map separately
        let mut layer = StrokeLayer::covering(width, height, display);
        layer.set_color(self.settings.stroke_color);
        layer.set_width(self.settings.stroke_width);
        layer
    }

    /// Stroke or text input while idle starts an editing pass.
    fn ensure_editing(&mut self) -> bool {
        match self.state {
            SessionState::Editing => true,
            SessionState::Committing => false,
            SessionState::Idle => self.edit(),
        }
    }

    pub fn begin_stroke(&mut self, point: Point) {
        if !self.ensure_editing() {
            return;
        }
        if let Some(strokes) = self.strokes.as_mut() {
            strokes.begin(point);
        }
    }

    /// Returns whether a segment was drawn.
    pub fn extend_stroke(&mut self, point: Point) -> bool {
        match self.strokes.as_mut() {
            Some(strokes) => strokes.extend(point),
            None => {
                trace!("Stroke move outside editing, ignoring");
                false
            }
        }
    }

    pub fn end_stroke(&mut self) {
        if let Some(strokes) = self.strokes.as_mut() {
            strokes.end();
        }
    }

    /// Place an empty, focused label centered on `point`.
    ///
    /// The label joins the saved set when it is committed with text. If a
    /// live field already sits at that origin it is focused and returned
    /// instead, so one origin never shows two fields.
    pub fn place_annotation(&mut self, point: Point) -> Option<AnnotationHandle> {
        if !self.ensure_editing() {
            return None;
        }
        let frame = Rect::centered_on(point, self.settings.annotation_size);
        if let Some(id) = self.fields.at_origin(frame.origin).map(|f| f.id) {
            self.fields.focus(id);
            debug!("Label already at {:?}, focusing it", frame.origin);
            return self.fields.get(id).map(|f| f.handle());
        }
        let handle = self.fields.place(frame, self.settings.stroke_color);
        debug!("Placed text label at {:?}", frame.origin);
        Some(handle)
    }

    /// Focus the label under `point`, or place a new one there.
    pub fn tap(&mut self, point: Point) -> Option<TapOutcome> {
        if !self.ensure_editing() {
            return None;
        }
        if let Some(id) = field_at(&self.fields, point).map(|f| f.id) {
            self.fields.focus(id);
            return self
                .fields
                .get(id)
                .map(|f| TapOutcome::Focused(f.handle()));
        }
        self.place_annotation(point).map(TapOutcome::Placed)
    }

    /// Apply the text the user entered when the field lost focus.
    ///
    /// Empty text removes the label. Otherwise the label keyed by the
    /// handle's frame origin is inserted or has its text replaced; its color
    /// stays what it was at creation.
    pub fn commit_annotation(&mut self, handle: AnnotationHandle, final_text: &str) {
        let key = AnnotationKey::from(&handle.frame);
        let before = self.annotations.len();

        match self.fields.get_mut(handle.field) {
            Some(field) => {
                field.focused = false;
                field.text = final_text.to_string();
            }
            None => debug!(
                "Commit for torn-down field at {:?}, treating as new",
                handle.frame.origin
            ),
        }

        if final_text.is_empty() {
            self.annotations.remove(&key);
            self.fields.remove(handle.field);
        } else if let Some(existing) = self.annotations.get_mut(&key) {
            existing.text = final_text.to_string();
        } else {
            self.annotations.insert(
                key,
                TextAnnotation::new(handle.frame, final_text, handle.color),
            );
        }

        if self.annotations.len() != before {
            self.events
                .push(SessionEvent::AnnotationCountChanged(self.annotations.len()));
        }
    }

    /// Move a label so its frame is centered on `center`.
    ///
    /// Refused (returns `None`) when another label already occupies the new
    /// origin. The saved record is re-keyed along with the field.
    pub fn move_annotation(
        &mut self,
        handle: AnnotationHandle,
        center: Point,
    ) -> Option<AnnotationHandle> {
        let old_key = AnnotationKey::from(&handle.frame);
        let frame = Rect::centered_on(center, handle.frame.size);
        let new_key = AnnotationKey::from(&frame);
        let field_taken = self
            .fields
            .at_origin(frame.origin)
            .is_some_and(|f| f.id != handle.field);
        if new_key != old_key && (self.annotations.contains_key(&new_key) || field_taken) {
            debug!("Label origin {:?} already taken", frame.origin);
            return None;
        }

        if let Some(mut record) = self.annotations.remove(&old_key) {
            record.frame = frame;
            self.annotations.insert(new_key, record);
        }
        if let Some(field) = self.fields.get_mut(handle.field) {
            field.frame = frame;
        }

        Some(AnnotationHandle { frame, ..handle })
    }

    /// Flatten strokes into the photo and leave editing.
    ///
    /// The flattened image becomes the new photo; labels are returned
    /// unchanged alongside it. `None` when there is no photo.
    pub fn done(&mut self) -> Option<CommitOutput> {
        if self.base.is_none() {
            debug!("Nothing to commit: session has no photo");
            self.strokes = None;
            self.fields.clear();
            self.state = SessionState::Idle;
            return None;
        }

        self.state = SessionState::Committing;
        let strokes = self.strokes.take();
        let image = flatten(self.base.as_ref(), strokes.as_ref());
        // The stroke layer is freed here
        drop(strokes);

        self.fields.clear();
        self.snapshot = None;
        self.state = SessionState::Idle;

        let image = image?;
        self.base = Some(image.clone());
        self.events.push(SessionEvent::ImageReplaced);

        let annotations = self.annotations();
        info!(
            "Committed edit: {}x{} image, {} text labels",
            image.width(),
            image.height(),
            annotations.len()
        );
        Some(CommitOutput { image, annotations })
    }

    /// Leave editing without committing. Strokes are dropped and the labels
    /// go back to what they were when editing began.
    pub fn cancel(&mut self) -> bool {
        if self.state != SessionState::Editing {
            return false;
        }

        let before = self.annotations.len();
        self.strokes = None;
        self.fields.clear();
        if let Some(snapshot) = self.snapshot.take() {
            self.annotations = snapshot;
        }
        self.state = SessionState::Idle;

        if self.annotations.len() != before {
            self.events
                .push(SessionEvent::AnnotationCountChanged(self.annotations.len()));
        }
        info!("Edit cancelled");
        true
    }

    /// Replace the photo, as after a new capture. Labels belong to the old
    /// photo and are dropped.
    pub fn set_base_image(&mut self, image: RgbaImage) {
        let had_labels = !self.annotations.is_empty();
        self.base = Some(image);
        self.reset_editing();
        self.annotations.clear();

        self.events.push(SessionEvent::ImageReplaced);
        if had_labels {
            self.events.push(SessionEvent::AnnotationCountChanged(0));
        }
    }

    /// Remove the photo and everything drawn on it.
    ///
    /// Returns false when there was nothing to clear.
    pub fn clear(&mut self) -> bool {
        if self.base.is_none() && self.annotations.is_empty() {
            return false;
        }

        let had_labels = !self.annotations.is_empty();
        self.base = None;
        self.reset_editing();
        self.annotations.clear();

        if had_labels {
            self.events.push(SessionEvent::AnnotationCountChanged(0));
        }
        self.events.push(SessionEvent::ImageCleared);
        info!("Cleared photo");
        true
    }

    fn reset_editing(&mut self) {
        self.strokes = None;
        self.fields.clear();
        self.snapshot = None;
        self.state = SessionState::Idle;
    }
}
