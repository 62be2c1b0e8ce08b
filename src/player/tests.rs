use super::*;
use crate::config::EndOfTrack;
use crate::media::{MediaElement, MediaEvent};
use crate::playlist::{SourceHandle, SourceId, SourceRegistry, Track, UNKNOWN_ARTIST};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Pause,
    SetSource(Option<SourceId>),
    Load,
    SetPosition(Duration),
    Play,
}

/// Media element that records what it was asked to do.
#[derive(Default)]
struct FakeMedia {
    calls: Vec<Call>,
    generation: u64,
    position: Duration,
}

impl FakeMedia {
    fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
}

impl MediaElement for FakeMedia {
    fn set_source(&mut self, source: Option<&SourceHandle>) {
        self.calls.push(Call::SetSource(source.map(SourceHandle::id)));
    }
    fn load(&mut self) {
        self.generation += 1;
        self.calls.push(Call::Load);
    }
    fn play(&mut self) {
        self.calls.push(Call::Play);
    }
    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }
    fn set_position(&mut self, position: Duration) {
        self.position = position;
        self.calls.push(Call::SetPosition(position));
    }
    fn position(&self) -> Duration {
        self.position
    }
    fn duration(&self) -> Option<Duration> {
        None
    }
    fn generation(&self) -> u64 {
        self.generation
    }
}

fn tracks(registry: &SourceRegistry, names: &[&str]) -> Vec<Track> {
    names
        .iter()
        .map(|n| {
            let path = PathBuf::from(format!("/music/{n}"));
            Track {
                title: n.to_string(),
                artist: UNKNOWN_ARTIST.to_string(),
                source: registry.mint(&path),
                path,
            }
        })
        .collect()
}

fn loaded(names: &[&str]) -> (PlayerState, FakeMedia, SourceRegistry) {
    let registry = SourceRegistry::new();
    let mut media = FakeMedia::default();
    let mut state = PlayerState::default();
    state.update(Msg::Upload(tracks(&registry, names)), &mut media);
    media.take_calls();
    (state, media, registry)
}

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

#[test]
fn format_time_truncates_and_pads_seconds() {
    assert_eq!(format_time(secs(0)), "0:00");
    assert_eq!(format_time(secs(59)), "0:59");
    assert_eq!(format_time(secs(60)), "1:00");
    assert_eq!(format_time(secs(65)), "1:05");
    assert_eq!(format_time(secs(125)), "2:05");
    assert_eq!(format_time(secs(3599)), "59:59");
    assert_eq!(format_time(secs(3600)), "60:00");
    assert_eq!(format_time(Duration::from_millis(59_999)), "0:59");
}

#[test]
fn empty_playlist_transport_is_a_no_op() {
    let mut media = FakeMedia::default();
    let mut state = PlayerState::default();

    state.update(Msg::Next, &mut media);
    state.update(Msg::Previous, &mut media);
    state.update(Msg::PlayPause, &mut media);
    state.update(Msg::Select(0), &mut media);
    state.update(Msg::Remove(0), &mut media);

    assert_eq!(state.current_index, 0);
    assert!(!state.is_playing);
    assert!(media.calls.is_empty());
}

#[test]
fn upload_appends_in_order_and_reloads_the_active_track() {
    let (mut state, mut media, registry) = loaded(&["a", "b"]);
    state.update(Msg::Next, &mut media);
    media.take_calls();

    state.update(Msg::Upload(tracks(&registry, &["c", "d", "e"])), &mut media);

    let titles: Vec<&str> = state.tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b", "c", "d", "e"]);
    assert_eq!(state.current_index, 1);
    let b = state.tracks[1].source.id();
    assert_eq!(
        media.take_calls(),
        vec![
            Call::Pause,
            Call::SetSource(Some(b)),
            Call::Load,
            Call::SetPosition(Duration::ZERO),
        ]
    );
}

#[test]
fn upload_while_playing_restarts_the_active_track() {
    let (mut state, mut media, registry) = loaded(&["a", "b"]);
    state.update(Msg::PlayPause, &mut media);
    let generation = media.generation();
    state.update(
        Msg::Media(MediaEvent::MetadataLoaded {
            generation,
            duration: secs(100),
        }),
        &mut media,
    );
    state.update(
        Msg::Media(MediaEvent::TimeProgressed {
            generation,
            position: secs(40),
        }),
        &mut media,
    );
    assert_eq!(state.elapsed, secs(40));
    media.take_calls();

    state.update(Msg::Upload(tracks(&registry, &["c"])), &mut media);

    let a = state.tracks[0].source.id();
    assert_eq!(
        media.take_calls(),
        vec![
            Call::Pause,
            Call::SetSource(Some(a)),
            Call::Load,
            Call::SetPosition(Duration::ZERO),
            Call::Play,
        ]
    );
    assert_eq!(state.current_index, 0);
    assert!(state.is_playing);
    assert_eq!(state.elapsed, Duration::ZERO);
    assert_eq!(state.duration, None);
    assert_eq!(state.progress, 0.0);
}

#[test]
fn first_upload_loads_track_zero() {
    let registry = SourceRegistry::new();
    let mut media = FakeMedia::default();
    let mut state = PlayerState::default();

    let new = tracks(&registry, &["a", "b"]);
    let first = new[0].source.id();
    state.update(Msg::Upload(new), &mut media);

    assert_eq!(state.current_index, 0);
    assert_eq!(
        media.calls,
        vec![
            Call::Pause,
            Call::SetSource(Some(first)),
            Call::Load,
            Call::SetPosition(Duration::ZERO),
        ]
    );
}

#[test]
fn next_and_previous_wrap_around() {
    let (mut state, mut media, _registry) = loaded(&["a", "b", "c"]);

    state.update(Msg::Previous, &mut media);
    assert_eq!(state.current_index, 2);
    state.update(Msg::Next, &mut media);
    assert_eq!(state.current_index, 0);
}

#[test]
fn next_then_previous_round_trips_from_every_index() {
    let (mut state, mut media, _registry) = loaded(&["a", "b", "c", "d"]);
    for start in 0..4 {
        state.update(Msg::Select(start), &mut media);
        state.update(Msg::Next, &mut media);
        state.update(Msg::Previous, &mut media);
        assert_eq!(state.current_index, start);
    }
}

#[test]
fn single_track_next_stays_on_it() {
    let (mut state, mut media, _registry) = loaded(&["only"]);
    state.update(Msg::Next, &mut media);
    assert_eq!(state.current_index, 0);
    state.update(Msg::Previous, &mut media);
    assert_eq!(state.current_index, 0);
}

#[test]
fn reload_runs_in_order_and_resumes_only_when_playing() {
    let (mut state, mut media, _registry) = loaded(&["a", "b"]);
    let second = state.tracks[1].source.id();

    state.update(Msg::Next, &mut media);
    assert_eq!(
        media.take_calls(),
        vec![
            Call::Pause,
            Call::SetSource(Some(second)),
            Call::Load,
            Call::SetPosition(Duration::ZERO),
        ]
    );
    assert!(!state.is_playing);

    state.update(Msg::PlayPause, &mut media);
    assert_eq!(media.take_calls(), vec![Call::Play]);

    let first = state.tracks[0].source.id();
    state.update(Msg::Next, &mut media);
    assert_eq!(
        media.take_calls(),
        vec![
            Call::Pause,
            Call::SetSource(Some(first)),
            Call::Load,
            Call::SetPosition(Duration::ZERO),
            Call::Play,
        ]
    );
    assert!(state.is_playing);
}

#[test]
fn play_pause_toggles_the_element() {
    let (mut state, mut media, _registry) = loaded(&["a"]);

    state.update(Msg::PlayPause, &mut media);
    assert!(state.is_playing);
    state.update(Msg::PlayPause, &mut media);
    assert!(!state.is_playing);
    assert_eq!(media.take_calls(), vec![Call::Play, Call::Pause]);
}

#[test]
fn progress_waits_for_duration_and_clamps() {
    let (mut state, mut media, _registry) = loaded(&["a"]);
    let generation = media.generation();

    state.update(
        Msg::Media(MediaEvent::TimeProgressed {
            generation,
            position: secs(5),
        }),
        &mut media,
    );
    assert_eq!(state.elapsed, Duration::ZERO);
    assert_eq!(state.progress, 0.0);

    state.update(
        Msg::Media(MediaEvent::MetadataLoaded {
            generation,
            duration: secs(200),
        }),
        &mut media,
    );
    state.update(
        Msg::Media(MediaEvent::TimeProgressed {
            generation,
            position: secs(50),
        }),
        &mut media,
    );
    assert_eq!(state.duration, Some(secs(200)));
    assert_eq!(state.elapsed, secs(50));
    assert!((state.progress - 25.0).abs() < 1e-9);

    state.update(
        Msg::Media(MediaEvent::TimeProgressed {
            generation,
            position: secs(250),
        }),
        &mut media,
    );
    assert_eq!(state.elapsed, secs(200));
    assert_eq!(state.progress, 100.0);
}

#[test]
fn zero_duration_never_divides() {
    let (mut state, mut media, _registry) = loaded(&["a"]);
    let generation = media.generation();
    state.update(
        Msg::Media(MediaEvent::MetadataLoaded {
            generation,
            duration: Duration::ZERO,
        }),
        &mut media,
    );
    state.update(
        Msg::Media(MediaEvent::TimeProgressed {
            generation,
            position: secs(3),
        }),
        &mut media,
    );
    assert_eq!(state.elapsed, Duration::ZERO);
    assert!(state.progress.is_finite());
    assert_eq!(state.progress, 0.0);
}

#[test]
fn track_change_resets_progress_and_ignores_stale_events() {
    let (mut state, mut media, _registry) = loaded(&["a", "b"]);
    let old = media.generation();
    state.update(
        Msg::Media(MediaEvent::MetadataLoaded {
            generation: old,
            duration: secs(100),
        }),
        &mut media,
    );
    state.update(
        Msg::Media(MediaEvent::TimeProgressed {
            generation: old,
            position: secs(40),
        }),
        &mut media,
    );
    assert_eq!(state.elapsed, secs(40));

    state.update(Msg::Next, &mut media);
    assert_eq!(state.elapsed, Duration::ZERO);
    assert_eq!(state.progress, 0.0);
    assert_eq!(state.duration, None);

    // Still queued from the previous track.
    state.update(
        Msg::Media(MediaEvent::MetadataLoaded {
            generation: old,
            duration: secs(100),
        }),
        &mut media,
    );
    state.update(
        Msg::Media(MediaEvent::TimeProgressed {
            generation: old,
            position: secs(41),
        }),
        &mut media,
    );
    assert_eq!(state.elapsed, Duration::ZERO);
    assert_eq!(state.duration, None);
}

#[test]
fn end_of_track_stop_leaves_player_idle() {
    let (mut state, mut media, _registry) = loaded(&["a", "b"]);
    state.update(Msg::PlayPause, &mut media);
    let generation = media.generation();
    media.take_calls();

    state.update(
        Msg::Media(MediaEvent::MetadataLoaded {
            generation,
            duration: secs(30),
        }),
        &mut media,
    );
    state.update(Msg::Media(MediaEvent::Ended { generation }), &mut media);

    assert!(!state.is_playing);
    assert_eq!(state.current_index, 0);
    assert_eq!(state.elapsed, secs(30));
    assert_eq!(state.progress, 100.0);
    assert!(media.calls.is_empty());
}

#[test]
fn end_of_track_advance_plays_the_next_track() {
    let registry = SourceRegistry::new();
    let mut media = FakeMedia::default();
    let mut state = PlayerState::new(EndOfTrack::Advance);
    state.update(Msg::Upload(tracks(&registry, &["a", "b"])), &mut media);
    state.update(Msg::Select(1), &mut media);
    state.update(Msg::PlayPause, &mut media);
    let generation = media.generation();
    media.take_calls();

    state.update(Msg::Media(MediaEvent::Ended { generation }), &mut media);

    assert_eq!(state.current_index, 0);
    assert!(state.is_playing);
    assert_eq!(media.calls.last(), Some(&Call::Play));
}

#[test]
fn end_of_track_after_pause_does_not_advance() {
    let registry = SourceRegistry::new();
    let mut media = FakeMedia::default();
    let mut state = PlayerState::new(EndOfTrack::Advance);
    state.update(Msg::Upload(tracks(&registry, &["a", "b"])), &mut media);
    state.update(Msg::PlayPause, &mut media);
    state.update(Msg::PlayPause, &mut media);
    let generation = media.generation();
    media.take_calls();

    // The source drained just before the pause reached the media thread.
    state.update(Msg::Media(MediaEvent::Ended { generation }), &mut media);

    assert_eq!(state.current_index, 0);
    assert!(!state.is_playing);
    assert!(media.calls.is_empty());
}

#[test]
fn select_ignores_out_of_range() {
    let (mut state, mut media, _registry) = loaded(&["a", "b"]);
    state.update(Msg::Select(7), &mut media);
    assert_eq!(state.current_index, 0);
    assert!(media.calls.is_empty());
}

#[test]
fn remove_before_active_keeps_the_same_track_active() {
    let (mut state, mut media, registry) = loaded(&["a", "b", "c"]);
    state.update(Msg::Select(2), &mut media);
    media.take_calls();

    let removed = state.tracks[0].source.id();
    state.update(Msg::Remove(0), &mut media);

    assert_eq!(state.current_index, 1);
    assert_eq!(state.current_track().unwrap().title, "c");
    let c = state.tracks[1].source.id();
    assert_eq!(
        media.take_calls(),
        vec![
            Call::Pause,
            Call::SetSource(Some(c)),
            Call::Load,
            Call::SetPosition(Duration::ZERO),
        ]
    );
    assert_eq!(registry.resolve(removed), None);
    assert_eq!(registry.live_count(), 2);
}

#[test]
fn remove_active_moves_to_successor_and_reloads() {
    let (mut state, mut media, registry) = loaded(&["a", "b", "c"]);
    state.update(Msg::Select(2), &mut media);
    state.update(Msg::PlayPause, &mut media);
    media.take_calls();

    state.update(Msg::Remove(2), &mut media);
    assert_eq!(state.current_index, 1);
    assert!(state.is_playing);

    let b = state.tracks[1].source.id();
    assert_eq!(
        media.take_calls(),
        vec![
            Call::Pause,
            Call::SetSource(None),
            Call::Pause,
            Call::SetSource(Some(b)),
            Call::Load,
            Call::SetPosition(Duration::ZERO),
            Call::Play,
        ]
    );
    assert_eq!(registry.live_count(), 2);
}

#[test]
fn removing_the_last_track_stops_and_clears_the_source() {
    let (mut state, mut media, registry) = loaded(&["a"]);
    state.update(Msg::PlayPause, &mut media);
    state.update(Msg::Remove(0), &mut media);

    assert!(state.tracks.is_empty());
    assert!(!state.is_playing);
    assert_eq!(state.current_index, 0);
    assert_eq!(registry.live_count(), 0);

    // Transport stays inert afterwards.
    media.take_calls();
    state.update(Msg::Next, &mut media);
    state.update(Msg::PlayPause, &mut media);
    assert!(media.calls.is_empty());
}

#[test]
fn dropping_the_state_releases_every_source() {
    let (state, _media, registry) = loaded(&["a", "b", "c"]);
    assert_eq!(registry.live_count(), 3);
    drop(state);
    assert_eq!(registry.live_count(), 0);
}
