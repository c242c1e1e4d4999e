//! Photo sources: where a new page's photo comes from.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::{debug, info};

use crate::error::PhotoError;

/// Supported image file extensions
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp", "tif", "tiff"];

/// Something that can hand over a photo.
pub trait PhotoSource {
    /// `Ok(None)` when the user backed out without choosing a photo.
    fn capture(&mut self) -> Result<Option<RgbaImage>, PhotoError>;
}

/// Decode the photo at `path` into RGBA pixels.
pub fn load_photo(path: &Path) -> Result<RgbaImage, PhotoError> {
    let image = image::open(path).map_err(|source| PhotoError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let image = image.to_rgba8();
    info!(
        "Loaded photo {:?} ({}x{})",
        path,
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Reads a fixed file, once per capture.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PhotoSource for FileSource {
    fn capture(&mut self) -> Result<Option<RgbaImage>, PhotoError> {
        if !self.path.exists() {
            return Err(PhotoError::CameraUnavailable);
        }
        load_photo(&self.path).map(Some)
    }
}

/// Native file picker.
#[derive(Debug, Clone, Default)]
pub struct PickerSource {
    start_dir: Option<PathBuf>,
    /// Path of the last photo picked, for the recent list
    picked: Option<PathBuf>,
}

impl PickerSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_dir = Some(dir.into());
        self
    }

    pub fn picked(&self) -> Option<&Path> {
        self.picked.as_deref()
    }
}

impl PhotoSource for PickerSource {
    fn capture(&mut self) -> Result<Option<RgbaImage>, PhotoError> {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Choose a Photo")
            .add_filter("Images", IMAGE_EXTENSIONS);
        if let Some(dir) = &self.start_dir {
            dialog = dialog.set_directory(dir);
        }

        let Some(path) = dialog.pick_file() else {
            debug!("Photo picker cancelled");
            return Ok(None);
        };

        let image = load_photo(&path)?;
        self.picked = Some(path);
        Ok(Some(image))
    }
}
