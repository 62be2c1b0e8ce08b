use std::time::Duration;

use super::model::PlayerState;

/// Receiver of media-element notifications.
pub trait PlaybackObserver {
    /// The play head moved.
    fn on_time_progressed(&mut self, position: Duration);
    /// The loaded source reported its total duration.
    fn on_metadata_loaded(&mut self, duration: Duration);
    /// The loaded source played to the end.
    fn on_ended(&mut self) {}
}

impl PlaybackObserver for PlayerState {
    fn on_time_progressed(&mut self, position: Duration) {
        // Progress is meaningless until a non-zero duration is known.
        let Some(duration) = self.duration.filter(|d| !d.is_zero()) else {
            return;
        };
        self.elapsed = position.min(duration);
        let ratio = self.elapsed.as_secs_f64() / duration.as_secs_f64();
        self.progress = (ratio * 100.0).clamp(0.0, 100.0);
    }

    fn on_metadata_loaded(&mut self, duration: Duration) {
        self.duration = Some(duration);
        if self.elapsed > duration {
            self.elapsed = duration;
        }
    }

    fn on_ended(&mut self) {
        self.is_playing = false;
        if let Some(d) = self.duration {
            self.elapsed = d;
            self.progress = 100.0;
        }
    }
}
