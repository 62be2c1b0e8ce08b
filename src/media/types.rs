//! Media-element commands, notifications, shared info and errors.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

#[derive(Debug)]
pub(super) enum MediaCmd {
    /// Replace the pending source; `None` clears it.
    SetSource(Option<PathBuf>),
    /// Drop the current sink and open the pending source under `generation`.
    Load { generation: u64 },
    Play,
    Pause,
    /// Move the play head to an absolute position.
    Seek(Duration),
    /// Quit the media thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Notifications emitted by the media thread.
///
/// Each carries the generation of the load it belongs to, so notifications
/// queued before a reload can be told apart from fresh ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    TimeProgressed { generation: u64, position: Duration },
    MetadataLoaded { generation: u64, duration: Duration },
    Ended { generation: u64 },
}

impl MediaEvent {
    pub fn generation(&self) -> u64 {
        match *self {
            MediaEvent::TimeProgressed { generation, .. }
            | MediaEvent::MetadataLoaded { generation, .. }
            | MediaEvent::Ended { generation } => generation,
        }
    }
}

/// Last-known state of the media thread, readable from the UI thread.
#[derive(Debug, Clone, Default)]
pub struct MediaInfo {
    pub position: Duration,
    pub duration: Option<Duration>,
}

pub type InfoHandle = Arc<Mutex<MediaInfo>>;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("no audio output device: {0}")]
    NoOutput(#[from] rodio::StreamError),
}
