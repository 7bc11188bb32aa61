use std::fs::{self, OpenOptions};

use crate::config::{self, LogSettings};

/// Route `log` output to a file; the terminal belongs to the UI.
///
/// `RUST_LOG` overrides `log.level`. If no log file can be opened, logging
/// stays off rather than writing over the screen.
pub fn init(settings: &LogSettings) {
    let Some(path) = settings.file.clone().or_else(config::default_log_path) else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.level.as_str()),
    )
    .format_timestamp_millis()
    .target(env_logger::Target::Pipe(Box::new(file)))
    .try_init();
}
