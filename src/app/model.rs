//! Application model: the player plus terminal-only view state.
//!
//! `App` owns the `PlayerState`, the list cursor, the add prompt, and the
//! source registry new uploads are minted from.

use std::path::PathBuf;

use crate::config::{Settings, UploadSettings};
use crate::media::MediaElement;
use crate::player::{Msg, PlayerState};
use crate::playlist::{SourceRegistry, ingest, parse_selection};

/// The main application model.
pub struct App {
    pub player: PlayerState,
    /// Highlighted row in the track list.
    pub cursor: usize,
    /// Text typed into the add prompt, while it is open.
    pub prompt: Option<String>,
    /// One-line feedback shown under the list.
    pub status: Option<String>,
    pub autoplay_on_add: bool,
    upload: UploadSettings,
    registry: SourceRegistry,
}

impl App {
    /// Create an empty `App` configured from `settings`.
    pub fn new(settings: &Settings) -> Self {
        Self {
            player: PlayerState::new(settings.playback.end_of_track),
            cursor: 0,
            prompt: None,
            status: None,
            autoplay_on_add: settings.playback.autoplay_on_add,
            upload: settings.upload.clone(),
            registry: SourceRegistry::new(),
        }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Apply a message to the player and keep the cursor on a valid row.
    pub fn dispatch(&mut self, msg: Msg, media: &mut dyn MediaElement) {
        let follows = matches!(
            msg,
            Msg::Next | Msg::Previous | Msg::Select(_) | Msg::Media(_)
        );
        let before = self.player.current_index;
        self.player.update(msg, media);
        if follows && self.player.current_index != before {
            self.cursor = self.player.current_index;
        }
        self.clamp_cursor();
    }

    /// Ingest `paths` and append the resulting tracks.
    ///
    /// Returns how many tracks were added.
    pub fn add_paths(&mut self, paths: &[PathBuf], media: &mut dyn MediaElement) -> usize {
        let tracks = ingest(paths, &self.upload, &self.registry);
        let added = tracks.len();
        let was_empty = !self.player.has_tracks();

        self.dispatch(Msg::Upload(tracks), media);

        if added > 0 && was_empty && self.autoplay_on_add && !self.player.is_playing {
            self.dispatch(Msg::PlayPause, media);
        }
        self.status = Some(match added {
            0 => "nothing to add".to_string(),
            1 => "added 1 track".to_string(),
            n => format!("added {n} tracks"),
        });
        added
    }

    /// Move the cursor down, wrapping to the top.
    pub fn cursor_down(&mut self) {
        let len = self.player.tracks.len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn cursor_up(&mut self) {
        let len = self.player.tracks.len();
        if len > 0 {
            self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.player.tracks.len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Open the add prompt.
    pub fn open_prompt(&mut self) {
        self.prompt = Some(String::new());
        self.status = None;
    }
    /// Close the add prompt without adding anything.
    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }
    /// Append a character to the prompt input.
    pub fn push_prompt_char(&mut self, c: char) {
        if let Some(p) = self.prompt.as_mut() {
            p.push(c);
        }
    }
    /// Remove the last character from the prompt input.
    pub fn pop_prompt_char(&mut self) {
        if let Some(p) = self.prompt.as_mut() {
            p.pop();
        }
    }

    /// Close the prompt and add whatever it named.
    pub fn submit_prompt(&mut self, media: &mut dyn MediaElement) -> usize {
        let Some(input) = self.prompt.take() else {
            return 0;
        };
        let paths = parse_selection(&input);
        if paths.is_empty() {
            return 0;
        }
        self.add_paths(&paths, media)
    }
}
