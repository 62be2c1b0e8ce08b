//! UI rendering helpers for the terminal user interface.
//!
//! This module renders the player with `ratatui`: header, now-playing card,
//! progress gauge with elapsed/total time, the track list, and either the
//! add prompt or the controls footer.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::config::UiSettings;
use crate::player::{PlayerState, format_time};
use crate::playlist::UNKNOWN_ARTIST;

/// Shown in place of a title when nothing is loaded.
const PLACEHOLDER_TITLE: &str = "Audio Title";

const CONTROLS: &[(&str, &str)] = &[
    ("h/l", "prev/next"),
    ("space/p", "play/pause"),
    ("j/k", "up/down"),
    ("enter", "play selected"),
    ("a", "add files"),
    ("x", "remove"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Title and artist of the active track, or placeholders.
pub(crate) fn now_playing(player: &PlayerState) -> (&str, &str) {
    match player.current_track() {
        Some(t) => (t.title.as_str(), t.artist.as_str()),
        None => (PLACEHOLDER_TITLE, UNKNOWN_ARTIST),
    }
}

/// `elapsed / total`, with a zero total until the duration is known.
pub(crate) fn time_text(player: &PlayerState) -> String {
    format!(
        "{} / {}",
        format_time(player.elapsed),
        format_time(player.duration.unwrap_or_default())
    )
}

fn left_padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame`.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let bottom_height = if app.prompt.is_some() || ui_settings.show_controls {
        4
    } else {
        0
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(bottom_height),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" playdeck ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Now playing
    let player = &app.player;
    let (title, artist) = now_playing(player);
    let state = if !player.has_tracks() {
        "Empty"
    } else if player.is_playing {
        "Playing"
    } else {
        "Paused"
    };
    let card = Paragraph::new(format!("{title}\n{artist}"))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {state} ")),
        );
    frame.render_widget(card, chunks[1]);

    // Progress
    let percent = player.progress.clamp(0.0, 100.0).round() as u16;
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .gauge_style(Style::default().add_modifier(Modifier::BOLD))
        .percent(percent)
        .label(time_text(player));
    frame.render_widget(gauge, chunks[2]);

    // Track list
    let items: Vec<ListItem> = player
        .tracks
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let marker = if i == player.current_index { "♪ " } else { "  " };
            ListItem::new(format!("{marker}{}", t.title))
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    if player.has_tracks() {
        list_state.select(Some(app.cursor));
    }
    frame.render_stateful_widget(list, chunks[3], &mut list_state);

    // Prompt or footer
    if let Some(input) = app.prompt.as_deref() {
        let title = " add: path to a file or folder, ';' separates, enter adds, esc cancels ";
        let prompt = Paragraph::new(format!("{input}_"))
            .block(left_padded(title))
            .wrap(Wrap { trim: false });
        frame.render_widget(prompt, chunks[4]);
    } else if ui_settings.show_controls {
        let text = match app.status.as_deref() {
            Some(status) => format!("{status}\n{}", controls_text()),
            None => controls_text(),
        };
        let footer = Paragraph::new(text)
            .block(left_padded(" controls "))
            .wrap(Wrap { trim: true });
        frame.render_widget(footer, chunks[4]);
    }
}
