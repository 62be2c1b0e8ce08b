use std::{env, path::PathBuf};

use thiserror::Error;

use super::schema::Settings;

/// Why a configuration could not be used.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load config: {0}")]
    Load(#[from] ::config::ConfigError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then lets environment
/// variables (prefix `PLAYDECK__`) override it, and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("PLAYDECK")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Load and validate in one step.
    pub fn load_checked() -> Result<Self, SettingsError> {
        let settings = Self::load()?;
        settings.validate().map_err(SettingsError::Invalid)?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.audio.tick_ms == 0 {
            return Err("audio.tick_ms must be >= 1".to_string());
        }
        if self.upload.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err("upload.extensions must name at least one extension".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `PLAYDECK_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("PLAYDECK_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/playdeck/config.toml`
/// or `~/.config/playdeck/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("playdeck").join("config.toml"))
}
