//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Stroke width in display points for freehand drawing
pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;

/// Width of a newly placed text label's frame, in display points
pub const DEFAULT_ANNOTATION_WIDTH: f32 = 40.0;

/// Height of a newly placed text label's frame, in display points
pub const DEFAULT_ANNOTATION_HEIGHT: f32 = 40.0;

/// Number of pages past which swipe-growth logs a warning.
/// Growth is never blocked; nothing reuses pages.
pub const SOFT_PAGE_LIMIT: usize = 5;

/// Maximum number of recently opened photos to remember in config
pub const MAX_RECENT_PHOTOS: usize = 5;

/// Sub-directory of the pictures directory that saved photos go into
pub const LIBRARY_FOLDER_NAME: &str = "Photoscribe";
