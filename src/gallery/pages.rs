//! Ordered sequence of photo pages.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::annotations::AnnotationSettings;
use crate::constants::SOFT_PAGE_LIMIT;
use crate::session::{AnnotationSession, SessionEvent};

use super::toolbar::{PageIndicator, ToolbarState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(pub u64);

/// One photo and its annotation session.
#[derive(Debug)]
pub struct Page {
    pub id: PageId,
    pub session: AnnotationSession,
}

/// What happens when swiping forward past the last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageGrowth {
    /// Stay on the last page
    #[default]
    Clamp,
    /// Append a blank page and move to it
    AppendOnSwipe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Change notifications for whoever drives the page UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    PageAdded(PageId),
    PageRemoved(PageId),
    CurrentChanged(usize),
    /// Forwarded from a page's session
    Session { page: PageId, event: SessionEvent },
}

/// Never-empty ordered list of pages with a current page.
#[derive(Debug)]
pub struct PageSequence {
    pages: Vec<Page>,
    current: usize,
    next_id: u64,
    growth: PageGrowth,
    soft_limit: usize,
    settings: AnnotationSettings,
    events: Vec<PageEvent>,
}

impl Default for PageSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSequence {
    /// Start with one blank page.
    pub fn new() -> Self {
        Self {
            pages: vec![Page {
                id: PageId(0),
                session: AnnotationSession::blank(),
            }],
            current: 0,
            next_id: 1,
            growth: PageGrowth::default(),
            soft_limit: SOFT_PAGE_LIMIT,
            settings: AnnotationSettings::default(),
            events: Vec::new(),
        }
    }

    pub fn with_growth(mut self, growth: PageGrowth) -> Self {
        self.growth = growth;
        self
    }

    pub fn with_soft_limit(mut self, soft_limit: usize) -> Self {
        self.soft_limit = soft_limit;
        self
    }

    /// Settings given to sessions this sequence creates, including the
    /// initial blank page.
    pub fn with_settings(mut self, settings: AnnotationSettings) -> Self {
        for page in &mut self.pages {
            if !page.session.has_base_image() {
                page.session = AnnotationSession::blank().with_settings(settings.clone());
            }
        }
        self.settings = settings;
        self
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false: the sequence keeps at least one page.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &AnnotationSession {
        &self.pages[self.current].session
    }

    pub fn current_mut(&mut self) -> &mut AnnotationSession {
        &mut self.pages[self.current].session
    }

    pub fn current_page(&self) -> &Page {
        &self.pages[self.current]
    }

    pub fn get(&self, index: usize) -> Option<&AnnotationSession> {
        self.pages.get(index).map(|p| &p.session)
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    fn next_page_id(&mut self) -> PageId {
        let id = PageId(self.next_id);
        self.next_id += 1;
        id
    }

    fn set_current(&mut self, index: usize) {
        if index != self.current {
            self.current = index;
            self.events.push(PageEvent::CurrentChanged(index));
        }
    }

    /// Add `session` as the last page and show it. Returns its index.
    pub fn append(&mut self, session: AnnotationSession) -> usize {
        let id = self.next_page_id();
        self.pages.push(Page { id, session });
        self.events.push(PageEvent::PageAdded(id));

        if self.pages.len() > self.soft_limit {
            warn!(
                "{} pages open, past the soft limit of {}",
                self.pages.len(),
                self.soft_limit
            );
        }

        let index = self.pages.len() - 1;
        self.set_current(index);
        debug!("Appended page {:?} at index {}", id, index);
        index
    }

    /// Remove the page at `index`, then show the last page.
    ///
    /// The only remaining page is never removed; its photo is cleared
    /// instead. Returns false for an out-of-range index.
    pub fn delete(&mut self, index: usize) -> bool {
        if index >= self.pages.len() {
            debug!("Delete for missing page index {}", index);
            return false;
        }

        if self.pages.len() == 1 {
            self.pages[0].session.clear();
            return true;
        }

        let mut removed = self.pages.remove(index);
        // Flush what the removed session had not reported yet
        for event in removed.session.take_events() {
            self.events.push(PageEvent::Session {
                page: removed.id,
                event,
            });
        }
        self.events.push(PageEvent::PageRemoved(removed.id));

        // Always reported: even at the same index the page shown is new
        self.current = self.pages.len() - 1;
        self.events.push(PageEvent::CurrentChanged(self.current));
        info!("Deleted page {:?}, {} left", removed.id, self.pages.len());
        true
    }

    /// Delete the page being shown.
    pub fn delete_current(&mut self) -> bool {
        self.delete(self.current)
    }

    /// Move one page in `direction`.
    ///
    /// Past the first page this returns `None`. Past the last page it
    /// returns `None` or, with [`PageGrowth::AppendOnSwipe`], appends a
    /// blank page.
    pub fn advance(&mut self, direction: Direction) -> Option<&AnnotationSession> {
        match direction {
            Direction::Backward => {
                if self.current == 0 {
                    return None;
                }
                self.set_current(self.current - 1);
            }
            Direction::Forward => {
                if self.current + 1 < self.pages.len() {
                    self.set_current(self.current + 1);
                } else {
                    match self.growth {
                        PageGrowth::Clamp => return None,
                        PageGrowth::AppendOnSwipe => {
                            let blank = AnnotationSession::blank().with_settings(self.settings.clone());
                            self.append(blank);
                        }
                    }
                }
            }
        }
        Some(self.current())
    }

    /// Jump to `index`, as when a page indicator dot is clicked.
    pub fn go_to(&mut self, index: usize) -> Option<&AnnotationSession> {
        if index >= self.pages.len() {
            return None;
        }
        self.set_current(index);
        Some(self.current())
    }

    /// Handle the photo picker's answer.
    ///
    /// `None` (cancelled) changes nothing. A photo fills the current page if
    /// it has none, otherwise it goes on a new last page. The page that got
    /// the photo starts editing right away. Returns that page's index.
    pub fn capture(&mut self, photo: Option<RgbaImage>) -> Option<usize> {
        let Some(photo) = photo else {
            debug!("Capture cancelled");
            return None;
        };

        let index = if self.current().has_base_image() {
            let session = AnnotationSession::new(photo).with_settings(self.settings.clone());
            self.append(session)
        } else {
            self.current_mut().set_base_image(photo);
            self.current
        };

        self.pages[index].session.edit();
        info!("Captured photo into page {}", index);
        Some(index)
    }

    pub fn toolbar(&self) -> ToolbarState {
        ToolbarState::for_session(self.current())
    }

    pub fn page_indicator(&self) -> PageIndicator {
        PageIndicator {
            count: self.pages.len(),
            current: self.current,
        }
    }

    /// Drain queued events, including those queued by page sessions.
    pub fn take_events(&mut self) -> Vec<PageEvent> {
        for page in &mut self.pages {
            for event in page.session.take_events() {
                self.events.push(PageEvent::Session {
                    page: page.id,
                    event,
                });
            }
        }
        std::mem::take(&mut self.events)
    }
}
