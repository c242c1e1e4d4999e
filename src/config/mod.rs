use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::annotations::AnnotationSettings;
use crate::color::{Color, array_to_color, color_to_array};
use crate::constants::{
    DEFAULT_ANNOTATION_HEIGHT, DEFAULT_ANNOTATION_WIDTH, DEFAULT_STROKE_WIDTH, MAX_RECENT_PHOTOS,
    SOFT_PAGE_LIMIT,
};
use crate::gallery::PageGrowth;
use crate::geometry::Size;

fn default_stroke_color() -> [f32; 4] {
    color_to_array(Color::BLACK)
}

fn default_stroke_width() -> f32 {
    DEFAULT_STROKE_WIDTH
}

fn default_annotation_size() -> Size {
    Size::new(DEFAULT_ANNOTATION_WIDTH, DEFAULT_ANNOTATION_HEIGHT)
}

fn default_soft_page_limit() -> usize {
    SOFT_PAGE_LIMIT
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Last picked drawing color, RGBA in 0..=1
    #[serde(default = "default_stroke_color")]
    pub stroke_color: [f32; 4],

    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,

    /// Frame size of newly placed text labels
    #[serde(default = "default_annotation_size")]
    pub annotation_size: Size,

    /// Whether swiping past the last page adds a blank one
    #[serde(default)]
    pub page_growth: PageGrowth,

    /// Page count past which growth logs a warning
    #[serde(default = "default_soft_page_limit")]
    pub soft_page_limit: usize,

    /// Where saved photos go (pictures directory when unset)
    #[serde(default)]
    pub library_dir: Option<PathBuf>,

    /// Last opened photo (not auto-loaded, just remembered for quick access)
    #[serde(default)]
    pub last_photo_path: Option<PathBuf>,

    /// Recently opened photos, newest first
    #[serde(default)]
    pub recent_photos: Vec<PathBuf>,
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            stroke_color: default_stroke_color(),
            stroke_width: default_stroke_width(),
            annotation_size: default_annotation_size(),
            page_growth: PageGrowth::default(),
            soft_page_limit: default_soft_page_limit(),
            library_dir: None,
            last_photo_path: None,
            recent_photos: Vec::new(),
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

impl AppConfig {
    /// Tool settings for new annotation sessions.
    pub fn to_settings(&self) -> AnnotationSettings {
        AnnotationSettings {
            stroke_color: self.stroke_color(),
            stroke_width: self.data.stroke_width,
            annotation_size: self.data.annotation_size,
        }
    }

    pub fn stroke_color(&self) -> Color {
        array_to_color(self.data.stroke_color)
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        let stored = color_to_array(color);
        if stored != self.data.stroke_color {
            self.data.stroke_color = stored;
            self.dirty = true;
        }
    }

    /// Directory saved photos are written to.
    pub fn library_dir(&self) -> PathBuf {
        self.data
            .library_dir
            .clone()
            .unwrap_or_else(crate::paths::default_library_dir)
    }

    /// Remember `path` as the latest opened photo.
    pub fn add_recent_photo(&mut self, path: &Path) {
        // Remove if already in list (to move it to front)
        self.data.recent_photos.retain(|p| p != path);
        self.data.recent_photos.insert(0, path.to_path_buf());
        self.data.recent_photos.truncate(MAX_RECENT_PHOTOS);

        self.data.last_photo_path = Some(path.to_path_buf());
        self.dirty = true;
    }

    /// Write to disk if anything changed since the last save.
    pub fn save_if_dirty(&mut self) {
        if self.dirty && save_config(self).is_ok() {
            self.dirty = false;
        }
    }
}

/// Result of loading config from disk
#[derive(Debug)]
pub struct LoadConfigResult {
    pub config: AppConfig,
    /// Error message if config was reset to defaults due to an error
    pub reset_reason: Option<String>,
}

/// Load configuration from the platform config file
pub fn load_config() -> LoadConfigResult {
    load_config_from(crate::paths::config_file())
}

pub fn load_config_from(config_path: PathBuf) -> LoadConfigResult {
    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    (data, None)
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}", e);
                    (
                        AppConfigData::default(),
                        Some(format!("Configuration file was corrupted: {}", e)),
                    )
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    LoadConfigResult {
        config: AppConfig {
            data,
            config_path,
            dirty: false,
        },
        reset_reason,
    }
}

/// Save configuration to disk
pub fn save_config(config: &AppConfig) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(&config.data).map_err(|e| {
        error!("Failed to serialize config: {}", e);
        std::io::Error::from(e)
    })?;

    match std::fs::write(&config.config_path, json) {
        Ok(()) => {
            info!("Config saved to {:?}", config.config_path);
            Ok(())
        }
        Err(e) => {
            error!("Failed to save config: {}", e);
            Err(e)
        }
    }
}
