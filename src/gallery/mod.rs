//! Page gallery: the swipeable list of photos, one session per page.
//!
//! ## Module Structure
//!
//! - [`pages`] - [`PageSequence`] and its navigation and events
//! - [`toolbar`] - Control state derived from the current page

mod pages;
mod toolbar;


pub use pages::{Direction, Page, PageEvent, PageGrowth, PageId, PageSequence};
pub use toolbar::{PageIndicator, ToolbarState};
