//! Toolbar and page indicator state derived from the current page.

use crate::session::AnnotationSession;

/// Which toolbar controls are usable for the page being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolbarState {
    pub delete_enabled: bool,
    pub edit_enabled: bool,
    pub save_enabled: bool,
    /// The "take picture" control shows on pages without a photo
    pub show_capture: bool,
}

impl ToolbarState {
    pub fn for_session(session: &AnnotationSession) -> Self {
        let has_photo = session.has_base_image();
        Self {
            delete_enabled: has_photo,
            edit_enabled: has_photo,
            save_enabled: has_photo,
            show_capture: !has_photo,
        }
    }
}

/// Dots under the pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageIndicator {
    pub count: usize,
    pub current: usize,
}

impl PageIndicator {
    /// A single page shows no indicator.
    pub fn is_hidden(&self) -> bool {
        self.count <= 1
    }
}

#[cfg(test)]
mod tests {
    use image::RgbaImage;

    use super::*;

    #[test]
    fn test_blank_page_only_offers_capture() {
        let state = ToolbarState::for_session(&AnnotationSession::blank());
        assert_eq!(
            state,
            ToolbarState {
                delete_enabled: false,
                edit_enabled: false,
                save_enabled: false,
                show_capture: true,
            }
        );
    }

    #[test]
    fn test_page_with_photo_enables_actions() {
        let session = AnnotationSession::new(RgbaImage::new(4, 4));
        let state = ToolbarState::for_session(&session);
        assert!(state.delete_enabled && state.edit_enabled && state.save_enabled);
        assert!(!state.show_capture);
    }

    #[test]
    fn test_indicator_hidden_for_single_page() {
        assert!(PageIndicator { count: 1, current: 0 }.is_hidden());
        assert!(!PageIndicator { count: 2, current: 1 }.is_hidden());
    }
}
