//! Player model: `PlayerState`, the messages that mutate it, and the
//! transport operations.
//!
//! The runtime owns one `PlayerState` and funnels every user command and
//! media notification through `PlayerState::update`, which is the only place
//! the model changes.

use std::time::Duration;

use crate::config::EndOfTrack;
use crate::media::{MediaElement, MediaEvent};
use crate::playlist::Track;

use super::observer::PlaybackObserver;

/// Inputs to `PlayerState::update`.
#[derive(Debug)]
pub enum Msg {
    /// Append freshly ingested tracks.
    Upload(Vec<Track>),
    PlayPause,
    Next,
    Previous,
    /// Make the track at the index active.
    Select(usize),
    /// Remove the track at the index, releasing its source.
    Remove(usize),
    Media(MediaEvent),
}

/// The whole state of the playlist player.
#[derive(Debug)]
pub struct PlayerState {
    pub tracks: Vec<Track>,
    pub current_index: usize,
    pub is_playing: bool,
    pub elapsed: Duration,
    pub duration: Option<Duration>,
    /// Elapsed over duration, 0..=100.
    pub progress: f64,
    pub end_of_track: EndOfTrack,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(EndOfTrack::default())
    }
}

impl PlayerState {
    pub fn new(end_of_track: EndOfTrack) -> Self {
        Self {
            tracks: Vec::new(),
            current_index: 0,
            is_playing: false,
            elapsed: Duration::ZERO,
            duration: None,
            progress: 0.0,
            end_of_track,
        }
    }

    /// The active track, if the playlist is not empty.
    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.current_index)
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    /// Apply one message.
    pub fn update(&mut self, msg: Msg, media: &mut dyn MediaElement) {
        match msg {
            Msg::Upload(tracks) => self.upload(tracks, media),
            Msg::PlayPause => self.play_pause(media),
            Msg::Next => self.next(media),
            Msg::Previous => self.previous(media),
            Msg::Select(index) => self.select(index, media),
            Msg::Remove(index) => self.remove(index, media),
            Msg::Media(event) => {
                if event.generation() != media.generation() {
                    log::trace!("dropping stale media event {:?}", event);
                    return;
                }
                match event {
                    MediaEvent::TimeProgressed { position, .. } => {
                        self.on_time_progressed(position)
                    }
                    MediaEvent::MetadataLoaded { duration, .. } => {
                        self.on_metadata_loaded(duration)
                    }
                    MediaEvent::Ended { .. } => self.handle_ended(media),
                }
            }
        }
    }

    /// Append tracks, keeping existing order and the current index.
    ///
    /// A changed track sequence always reloads the active track.
    pub fn upload(&mut self, tracks: Vec<Track>, media: &mut dyn MediaElement) {
        if tracks.is_empty() {
            return;
        }
        self.tracks.extend(tracks);
        self.reload(media);
    }

    /// Toggle between playing and paused. No-op on an empty playlist.
    pub fn play_pause(&mut self, media: &mut dyn MediaElement) {
        if !self.has_tracks() {
            return;
        }
        if self.is_playing {
            media.pause();
            self.is_playing = false;
        } else {
            media.play();
            self.is_playing = true;
        }
    }

    /// Advance one track, wrapping past the end. No-op on an empty playlist.
    pub fn next(&mut self, media: &mut dyn MediaElement) {
        if !self.has_tracks() {
            return;
        }
        self.current_index = (self.current_index + 1) % self.tracks.len();
        self.reload(media);
    }

    /// Step back one track, wrapping to the last one. No-op on an empty playlist.
    pub fn previous(&mut self, media: &mut dyn MediaElement) {
        if !self.has_tracks() {
            return;
        }
        self.current_index = match self.current_index {
            0 => self.tracks.len() - 1,
            i => i - 1,
        };
        self.reload(media);
    }

    /// Jump to `index`. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize, media: &mut dyn MediaElement) {
        if index >= self.tracks.len() {
            return;
        }
        self.current_index = index;
        self.reload(media);
    }

    /// Remove the track at `index`; dropping it revokes its source.
    ///
    /// The active track stays active when it survives. Removing the active
    /// track makes its successor (or the new last track) active. Either way
    /// the sequence changed, so the active track is reloaded.
    pub fn remove(&mut self, index: usize, media: &mut dyn MediaElement) {
        if index >= self.tracks.len() {
            return;
        }

        let removed_active = index == self.current_index;
        if index < self.current_index {
            self.current_index -= 1;
        }

        if removed_active {
            // The element must stop using the source before it is revoked.
            media.pause();
            media.set_source(None);
        }
        let track = self.tracks.remove(index);
        log::debug!("removed {}", track.path.display());
        drop(track);

        if self.tracks.is_empty() {
            self.current_index = 0;
            self.is_playing = false;
        } else {
            self.current_index = self.current_index.min(self.tracks.len() - 1);
        }
        self.reload(media);
    }

    /// Point the element at the active track and reset progress.
    ///
    /// Order matters: pause, set source, load, rewind, then resume only if
    /// the player was already playing.
    fn reload(&mut self, media: &mut dyn MediaElement) {
        media.pause();
        media.set_source(self.tracks.get(self.current_index).map(|t| &t.source));
        media.load();
        media.set_position(Duration::ZERO);

        self.elapsed = Duration::ZERO;
        self.duration = None;
        self.progress = 0.0;

        if let Some(track) = self.current_track() {
            log::info!("now on {} ({})", track.title, self.current_index);
        }

        if self.is_playing {
            media.play();
        }
    }

    fn handle_ended(&mut self, media: &mut dyn MediaElement) {
        // No metadata arrived for this source; take what the element measured.
        if self.duration.is_none() {
            self.duration = media.duration();
            self.elapsed = media.position();
        }
        // A pause can race the end of the source; only a playing track advances.
        let was_playing = self.is_playing;
        self.on_ended();
        if self.end_of_track == EndOfTrack::Advance && was_playing && self.has_tracks() {
            self.is_playing = true;
            self.next(media);
        }
    }
}
