use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::config::AudioSettings;

use super::sink::{create_sink_at, probe_duration};
use super::types::{InfoHandle, MediaCmd, MediaError, MediaEvent};

/// Everything the media thread owns about the loaded source.
struct Playhead {
    path: Option<PathBuf>,
    generation: u64,
    sink: Option<Sink>,
    duration: Option<Duration>,
    paused: bool,
    // Track start time and accumulated elapsed when paused.
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Playhead {
    fn new() -> Self {
        Self {
            path: None,
            generation: 0,
            sink: None,
            duration: None,
            paused: true,
            started_at: None,
            accumulated: Duration::ZERO,
        }
    }

    fn position(&self) -> Duration {
        let pos = self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed());
        match self.duration {
            Some(d) => pos.min(d),
            None => pos,
        }
    }

    /// Reopen the current source paused at zero.
    fn rewind(&mut self, stream: &OutputStream) {
        let Some(path) = self.path.as_ref() else {
            return;
        };
        match create_sink_at(stream, path, Duration::ZERO) {
            Ok(opened) => {
                self.sink = Some(opened.sink);
                self.paused = true;
                self.started_at = None;
                self.accumulated = Duration::ZERO;
            }
            Err(e) => log::warn!("{e}"),
        }
    }

    fn halt(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
        self.paused = true;
    }
}

fn open_output() -> Option<OutputStream> {
    match OutputStreamBuilder::open_default_stream() {
        Ok(mut stream) => {
            // rodio logs to stderr when OutputStream is dropped; that would
            // scribble over the TUI.
            stream.log_on_drop(false);
            Some(stream)
        }
        Err(e) => {
            log::error!("{}", MediaError::from(e));
            None
        }
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

pub(super) fn spawn_media_thread(
    rx: Receiver<MediaCmd>,
    events: Sender<MediaEvent>,
    info: InfoHandle,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        // Without a device we keep draining commands so the UI stays usable.
        let stream = open_output();
        let tick = Duration::from_millis(audio_settings.tick_ms.max(1));

        let mut head = Playhead::new();

        let publish = |head: &Playhead| {
            if let Ok(mut i) = info.lock() {
                i.position = head.position();
                i.duration = head.duration;
            }
        };

        loop {
            match rx.recv_timeout(tick) {
                Ok(cmd) => match cmd {
                    MediaCmd::SetSource(path) => {
                        head.path = path;
                    }

                    MediaCmd::Load { generation } => {
                        if let Some(s) = head.sink.take() {
                            s.stop();
                        }
                        head.generation = generation;
                        head.duration = None;
                        head.paused = true;
                        head.started_at = None;
                        head.accumulated = Duration::ZERO;

                        if let (Some(stream), Some(path)) = (stream.as_ref(), head.path.as_ref()) {
                            match create_sink_at(stream, path, Duration::ZERO) {
                                Ok(opened) => {
                                    head.sink = Some(opened.sink);
                                    head.duration = probe_duration(path)
                                        .or(opened.decoder_duration)
                                        .filter(|d| !d.is_zero());
                                    log::debug!(
                                        "loaded {} (generation {generation}, duration {:?})",
                                        path.display(),
                                        head.duration
                                    );
                                    if let Some(duration) = head.duration {
                                        let _ = events.send(MediaEvent::MetadataLoaded {
                                            generation,
                                            duration,
                                        });
                                    }
                                }
                                // Unplayable sources stay silent; nothing is reported upstream.
                                Err(e) => log::warn!("{e}"),
                            }
                        }
                        publish(&head);
                    }

                    MediaCmd::Play => {
                        // A finished source starts over.
                        if head.sink.as_ref().is_some_and(Sink::empty) {
                            if let Some(stream) = stream.as_ref() {
                                head.rewind(stream);
                            }
                        }
                        if let Some(ref s) = head.sink {
                            s.play();
                            if head.paused {
                                head.started_at = Some(Instant::now());
                                head.paused = false;
                            }
                        }
                        publish(&head);
                    }

                    MediaCmd::Pause => {
                        head.halt();
                        publish(&head);
                    }

                    MediaCmd::Seek(to) => {
                        let (Some(stream), Some(path)) = (stream.as_ref(), head.path.clone()) else {
                            continue;
                        };
                        if head.sink.is_none() || head.position() == to {
                            continue;
                        }

                        // Rebuild the sink and skip into the file.
                        if let Some(s) = head.sink.take() {
                            s.stop();
                        }
                        match create_sink_at(stream, &path, to) {
                            Ok(opened) => {
                                if !head.paused {
                                    opened.sink.play();
                                    head.started_at = Some(Instant::now());
                                } else {
                                    head.started_at = None;
                                }
                                head.sink = Some(opened.sink);
                                head.accumulated = to;
                            }
                            Err(e) => {
                                log::warn!("{e}");
                                head.paused = true;
                                head.started_at = None;
                            }
                        }
                        publish(&head);
                    }

                    MediaCmd::Quit { fade_out_ms } => {
                        if let Some(ref s) = head.sink {
                            if !head.paused {
                                fade_out_sink(s, fade_out_ms);
                            }
                            s.stop();
                        }
                        head.halt();
                        publish(&head);
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    if head.paused {
                        continue;
                    }
                    let Some(drained) = head.sink.as_ref().map(Sink::empty) else {
                        continue;
                    };

                    let generation = head.generation;
                    let position = if drained {
                        head.duration.unwrap_or_else(|| head.position())
                    } else {
                        head.position()
                    };
                    let _ = events.send(MediaEvent::TimeProgressed {
                        generation,
                        position,
                    });

                    if drained {
                        head.halt();
                        if let Some(d) = head.duration {
                            head.accumulated = d;
                        }
                        let _ = events.send(MediaEvent::Ended { generation });
                    }
                    publish(&head);
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
