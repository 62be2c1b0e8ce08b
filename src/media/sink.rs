//! Utilities for creating `rodio` sinks from file paths.
//!
//! The helpers here open and decode a file, prepare a paused `Sink` at the
//! requested start position, and probe the total duration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::file::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::MediaError;

/// A paused sink plus the duration the decoder reported, if any.
pub(super) struct Opened {
    pub sink: Sink,
    pub decoder_duration: Option<Duration>,
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<Opened, MediaError> {
    let file = File::open(path).map_err(|source| MediaError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| MediaError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let decoder_duration = decoder.total_duration();

    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = decoder.skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(Opened {
        sink,
        decoder_duration,
    })
}

/// Read the container's duration from its tags/properties.
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    match lofty::read_from_path(path) {
        Ok(tagged) => {
            let d = tagged.properties().duration();
            (!d.is_zero()).then_some(d)
        }
        Err(e) => {
            log::debug!("no duration for {}: {e}", path.display());
            None
        }
    }
}
