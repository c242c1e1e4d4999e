//! Photo library: where finished photos are saved.
//!
//! Saving encodes and writes on a worker thread. The caller gets a
//! [`SaveTask`] back and polls it (once per frame in an interactive front
//! end) or waits on it.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

use image::{ImageFormat, RgbaImage};
use tracing::{debug, error, info};

use crate::error::PhotoError;
use crate::notice::Notice;
use crate::session::AnnotationSession;

pub type SaveResult = Result<PathBuf, PhotoError>;

/// Somewhere photos can be saved to.
pub trait PhotoLibrary {
    fn save(&self, image: RgbaImage) -> SaveTask;
}

/// A save in flight.
#[derive(Debug)]
pub struct SaveTask {
    receiver: Receiver<SaveResult>,
}

impl SaveTask {
    fn spawn(job: impl FnOnce() -> SaveResult + Send + 'static) -> Self {
        let (sender, receiver) = mpsc::channel();
        let worker_sender = sender.clone();
        let spawned = std::thread::Builder::new()
            .name("photo-save".to_string())
            .spawn(move || {
                let _ = worker_sender.send(job());
            });
        if let Err(e) = spawned {
            let _ = sender.send(Err(PhotoError::Io(e)));
        }
        Self { receiver }
    }

    /// Already-finished task.
    pub fn ready(result: SaveResult) -> Self {
        let (sender, receiver) = mpsc::channel();
        let _ = sender.send(result);
        Self { receiver }
    }

    /// `None` while the save is still running. Returns the result once.
    pub fn poll(&mut self) -> Option<SaveResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(PhotoError::SaveFailure(
                "save worker stopped without a result".to_string(),
            ))),
        }
    }

    /// Block until the save finishes.
    pub fn wait(self) -> SaveResult {
        self.receiver.recv().unwrap_or_else(|_| {
            Err(PhotoError::SaveFailure(
                "save worker stopped without a result".to_string(),
            ))
        })
    }
}

/// Notice to show once a save has finished.
pub fn save_notice(result: &SaveResult) -> Option<Notice> {
    match result {
        Ok(_) => Some(Notice::ImageSaved),
        Err(e) => Notice::for_error(e),
    }
}

/// Save the photo of `session`, as drawn so far.
///
/// Returns a finished task holding [`PhotoError::MissingBaseImage`] when the
/// session has no photo.
pub fn save_session(library: &impl PhotoLibrary, session: &AnnotationSession) -> SaveTask {
    match session.base_image() {
        Some(image) => library.save(image.clone()),
        None => {
            debug!("Save requested with no photo");
            SaveTask::ready(Err(PhotoError::MissingBaseImage))
        }
    }
}

/// Saves timestamped PNGs into a directory.
#[derive(Debug, Clone)]
pub struct DirectoryLibrary {
    dir: PathBuf,
}

impl Default for DirectoryLibrary {
    fn default() -> Self {
        Self::new(crate::paths::default_library_dir())
    }
}

impl DirectoryLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PhotoLibrary for DirectoryLibrary {
    fn save(&self, image: RgbaImage) -> SaveTask {
        let dir = self.dir.clone();
        SaveTask::spawn(move || {
            let result = write_photo(&dir, &image);
            match &result {
                Ok(path) => info!("Photo saved to {:?}", path),
                Err(e) => error!("{}", e),
            }
            result
        })
    }
}

fn write_photo(dir: &Path, image: &RgbaImage) -> SaveResult {
    std::fs::create_dir_all(dir)?;

    let stem = chrono::Local::now()
        .format("photo_%Y%m%d_%H%M%S_%3f")
        .to_string();
    let mut path = dir.join(format!("{stem}.png"));
    let mut suffix = 1;
    while path.exists() {
        path = dir.join(format!("{stem}-{suffix}.png"));
        suffix += 1;
    }

    image
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|e| PhotoError::SaveFailure(format!("{}: {}", path.display(), e)))?;
    Ok(path)
}
