use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use tracing::{debug, error, info, warn};

use photoscribe::capture::{FileSource, PhotoSource, PickerSource};
use photoscribe::config;
use photoscribe::gallery::PageSequence;
use photoscribe::geometry::Size;
use photoscribe::library::{DirectoryLibrary, save_notice, save_session};
use photoscribe::logging::setup_logging;
use photoscribe::notice::Notice;
use photoscribe::paths;
use photoscribe::script::EditScript;

/// Size the photo is shown at, in display points.
#[derive(Copy, Clone, Debug, PartialEq)]
struct DisplaySize(Size);

impl FromStr for DisplaySize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((a, b)) = s.to_lowercase().split_once('x') {
            let width: f32 = a.trim().parse().unwrap_or(0.0);
            let height: f32 = b.trim().parse().unwrap_or(0.0);
            let size = Size::new(width, height);
            if width.is_finite() && height.is_finite() && !size.is_empty() {
                return Ok(DisplaySize(size));
            }
        }
        Err(format!(
            "Invalid display size '{s}', must be given as WIDTHxHEIGHT"
        ))
    }
}

fn report(notice: &Notice) {
    if notice.is_error() {
        error!("{} [{}]", notice.title(), notice.dismiss_label());
    } else {
        info!("{} [{}]", notice.title(), notice.dismiss_label());
    }
}

fn main() -> ExitCode {
    let flags = xflags::parse_or_exit! {
        /// JSON file of edits to apply to the photo.
        optional -s,--script script: PathBuf
        /// Directory to save into instead of the configured photo library.
        optional -l,--library library: PathBuf
        /// Size the photo is shown at, as WIDTHxHEIGHT display points.
        /// Stroke widths and label sizes are in these units.
        optional -d,--display display: DisplaySize
        /// Apply the edits but do not save the result.
        optional --no-save
        /// Photo to annotate. Without it a file picker opens.
        optional photo: PathBuf
    };

    // Keep the guard alive for the duration of the program
    let _log_guard = setup_logging();

    if let Err(e) = paths::ensure_directories() {
        warn!("Could not create app directories: {}", e);
    }

    let loaded = config::load_config();
    if let Some(reason) = &loaded.reset_reason {
        warn!("Configuration reset to defaults: {}", reason);
    }
    let mut config = loaded.config;

    let mut pages = PageSequence::new()
        .with_growth(config.data.page_growth)
        .with_soft_limit(config.data.soft_page_limit)
        .with_settings(config.to_settings());
    if let Some(DisplaySize(size)) = flags.display {
        pages.current_mut().set_display_size(size);
    }

    let photo = match &flags.photo {
        Some(path) => {
            config.add_recent_photo(path);
            FileSource::new(path).capture()
        }
        None => {
            let mut picker = PickerSource::new();
            if let Some(dir) = config
                .data
                .last_photo_path
                .as_ref()
                .and_then(|p| p.parent())
            {
                picker = picker.with_start_dir(dir);
            }
            let photo = picker.capture();
            if let Some(path) = picker.picked() {
                config.add_recent_photo(path);
            }
            photo
        }
    };

    let photo = match photo {
        Ok(photo) => photo,
        Err(e) => {
            error!("{}", e);
            if let Some(notice) = Notice::for_error(&e) {
                report(&notice);
            }
            config.save_if_dirty();
            return ExitCode::FAILURE;
        }
    };
    if pages.capture(photo).is_none() {
        info!("No photo chosen");
        config.save_if_dirty();
        return ExitCode::SUCCESS;
    }

    if let Some(script_path) = &flags.script {
        match EditScript::load(script_path) {
            Ok(script) => {
                script.apply(pages.current_mut());
            }
            Err(e) => {
                error!("{}", e);
                config.save_if_dirty();
                return ExitCode::FAILURE;
            }
        }
    }

    // Keep whatever was drawn but not committed yet
    if pages.current().is_editing() {
        pages.current_mut().done();
    }
    for event in pages.take_events() {
        debug!("{:?}", event);
    }

    let mut status = ExitCode::SUCCESS;
    if flags.no_save {
        info!("Not saving (--no-save)");
    } else {
        let dir = flags.library.clone().unwrap_or_else(|| config.library_dir());
        let library = DirectoryLibrary::new(dir);
        let result = save_session(&library, pages.current()).wait();
        if let Some(notice) = save_notice(&result) {
            report(&notice);
        }
        if result.is_err() {
            status = ExitCode::FAILURE;
        }
    }

    config.set_stroke_color(pages.current().stroke_color());
    config.save_if_dirty();
    status
}
