use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/playdeck/config.toml`
/// or `~/.config/playdeck/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `PLAYDECK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub playback: PlaybackSettings,
    pub upload: UploadSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Interval between time-progressed notifications while playing (milliseconds).
    pub tick_ms: u64,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            tick_ms: 250,
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether the controls footer is rendered.
    pub show_controls: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ playdeck ~ ".to_string(),
            show_controls: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// What happens when the active track finishes.
    pub end_of_track: EndOfTrack,
    /// Start playing when tracks are added to an empty playlist.
    pub autoplay_on_add: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            end_of_track: EndOfTrack::Stop,
            autoplay_on_add: false,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndOfTrack {
    /// Stay on the finished track, idle.
    #[default]
    #[serde(alias = "idle")]
    Stop,
    /// Move to the next track (wrapping) and keep playing.
    #[serde(alias = "next", alias = "auto-advance", alias = "auto_advance")]
    Advance,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// File extensions accepted as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to recurse into subdirectories when a directory is added.
    pub recursive: bool,
    /// Whether to follow symlinks while walking a directory.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            recursive: true,
            follow_links: true,
            include_hidden: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default filter when `PLAYDECK_LOG` is not set (e.g. "warn", "playdeck=debug").
    pub level: String,
    /// Log file. Defaults to `playdeck.log` in the system temp directory.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}
