//! Photo annotation core: draw freehand strokes and place text labels over
//! photos, flatten the strokes into the image, and keep a swipeable list of
//! annotated pages.

pub mod annotations;
pub mod capture;
pub mod color;
pub mod compositor;
pub mod config;
pub mod constants;
pub mod error;
pub mod gallery;
pub mod geometry;
pub mod library;
pub mod logging;
pub mod notice;
pub mod paths;
pub mod script;
pub mod session;
