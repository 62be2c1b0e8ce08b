//! Logging setup.
//!
//! Records go through the `log` facade to `env_logger`, piped into a file so
//! they never land on the terminal the UI is drawing on. `PLAYDECK_LOG`
//! overrides the configured filter.

use std::fs::OpenOptions;
use std::path::PathBuf;

use env_logger::{Builder, Env, Target};

use crate::config::LogSettings;

/// The file records are written to.
pub fn log_file_path(settings: &LogSettings) -> PathBuf {
    settings
        .file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("playdeck.log"))
}

/// Install the global logger. Fails if the log file cannot be opened or a
/// logger is already installed.
pub fn init(settings: &LogSettings) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = log_file_path(settings);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    Builder::from_env(Env::default().filter_or("PLAYDECK_LOG", settings.level.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;

    Ok(path)
}
