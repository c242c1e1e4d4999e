//! Where photoscribe keeps its files.
//!
//! Debug builds and `cargo run` keep config and logs in the working
//! directory. Installed builds use the platform config and data directories
//! under `photoscribe/`. Saved photos always go to the pictures directory.

use std::path::PathBuf;

use crate::constants::LIBRARY_FOLDER_NAME;

const APP_DIR_NAME: &str = "photoscribe";

fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// Root for app files of one kind, `None` in dev mode.
fn installed_dir(base: Option<PathBuf>) -> Option<PathBuf> {
    if is_dev_mode() {
        return None;
    }
    base.map(|p| p.join(APP_DIR_NAME))
}

/// `config.json` in the working directory (dev) or the config directory.
pub fn config_file() -> PathBuf {
    installed_dir(dirs::config_dir())
        .unwrap_or_default()
        .join("config.json")
}

/// `logs/` in the working directory (dev) or the data directory.
pub fn logs_dir() -> PathBuf {
    installed_dir(dirs::data_dir())
        .unwrap_or_default()
        .join("logs")
}

/// Directory finished photos are saved into (the "photo library").
///
/// `{pictures_dir}/Photoscribe/`, falling back to `./Photoscribe/` on
/// platforms without a pictures directory.
pub fn default_library_dir() -> PathBuf {
    dirs::picture_dir()
        .map(|p| p.join(LIBRARY_FOLDER_NAME))
        .unwrap_or_else(|| PathBuf::from(LIBRARY_FOLDER_NAME))
}

/// Create the config and log directories of an installed build.
pub fn ensure_directories() -> std::io::Result<()> {
    if let Some(parent) = config_file().parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::create_dir_all(logs_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_paths_are_local() {
        // Tests build with debug assertions
        assert_eq!(config_file(), PathBuf::from("config.json"));
        assert_eq!(logs_dir(), PathBuf::from("logs"));
    }

    #[test]
    fn test_library_dir_ends_with_folder_name() {
        assert!(default_library_dir().ends_with(LIBRARY_FOLDER_NAME));
    }
}
