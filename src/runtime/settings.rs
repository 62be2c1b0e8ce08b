use crate::config::{Settings, SettingsError};

/// Load settings, falling back to defaults.
///
/// Logging is configured from the settings themselves, so a problem is
/// handed back for the caller to report once a logger exists.
pub fn load_settings() -> (Settings, Option<SettingsError>) {
    match Settings::load_checked() {
        Ok(s) => (s, None),
        // Config is optional; a bad one must not keep the player from starting.
        Err(e) => (Settings::default(), Some(e)),
    }
}
