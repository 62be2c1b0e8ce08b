use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;
use crate::playlist::SourceHandle;

use super::thread::spawn_media_thread;
use super::types::{InfoHandle, MediaCmd, MediaEvent, MediaInfo};

/// The playback primitive the player drives.
///
/// Every call is safe with nothing loaded; it just has no audible effect.
pub trait MediaElement {
    /// Point the element at a new source (or at nothing).
    fn set_source(&mut self, source: Option<&SourceHandle>);
    /// Open the current source. Starts a new generation.
    fn load(&mut self);
    fn play(&mut self);
    fn pause(&mut self);
    fn set_position(&mut self, position: Duration);
    fn position(&self) -> Duration;
    fn duration(&self) -> Option<Duration>;
    /// Generation of the most recent `load`; notifications from older loads are stale.
    fn generation(&self) -> u64;
}

/// `rodio`-backed media element running on its own thread.
pub struct RodioElement {
    tx: Sender<MediaCmd>,
    info: InfoHandle,
    generation: u64,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioElement {
    /// Spawn the media thread. The receiver yields its notifications.
    pub fn new(audio_settings: AudioSettings) -> (Self, Receiver<MediaEvent>) {
        let (tx, rx) = mpsc::channel::<MediaCmd>();
        let (event_tx, event_rx) = mpsc::channel::<MediaEvent>();
        let info: InfoHandle = Arc::new(Mutex::new(MediaInfo::default()));

        let handle = spawn_media_thread(rx, event_tx, info.clone(), audio_settings);

        let element = Self {
            tx,
            info,
            generation: 0,
            join: Mutex::new(Some(handle)),
        };
        (element, event_rx)
    }

    fn send(&self, cmd: MediaCmd) {
        if let Err(e) = self.tx.send(cmd) {
            log::debug!("media thread is gone, dropping {:?}", e.0);
        }
    }

    /// Fade out, stop the media thread and wait for it.
    pub fn quit_softly(&self, fade_out: Duration) {
        self.send(MediaCmd::Quit {
            fade_out_ms: fade_out_millis(fade_out),
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                if h.join().is_err() {
                    log::warn!("media thread panicked before shutdown");
                }
            }
        }
    }
}

/// Whole milliseconds of `fade_out`, saturating at `u64::MAX`.
pub(super) fn fade_out_millis(fade_out: Duration) -> u64 {
    u64::try_from(fade_out.as_millis()).unwrap_or(u64::MAX)
}

impl MediaElement for RodioElement {
    fn set_source(&mut self, source: Option<&SourceHandle>) {
        let path = source.and_then(|h| {
            let resolved = h.resolve();
            if resolved.is_none() {
                log::warn!("source {:?} was revoked before it could be set", h.id());
            }
            resolved
        });
        self.send(MediaCmd::SetSource(path));
    }

    fn load(&mut self) {
        self.generation += 1;
        if let Ok(mut i) = self.info.lock() {
            *i = MediaInfo::default();
        }
        self.send(MediaCmd::Load {
            generation: self.generation,
        });
    }

    fn play(&mut self) {
        self.send(MediaCmd::Play);
    }

    fn pause(&mut self) {
        self.send(MediaCmd::Pause);
    }

    fn set_position(&mut self, position: Duration) {
        if let Ok(mut i) = self.info.lock() {
            i.position = position;
        }
        self.send(MediaCmd::Seek(position));
    }

    fn position(&self) -> Duration {
        self.info.lock().map(|i| i.position).unwrap_or_default()
    }

    fn duration(&self) -> Option<Duration> {
        self.info.lock().ok().and_then(|i| i.duration)
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}
