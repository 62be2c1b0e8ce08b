use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::media::{MediaElement, MediaEvent};
use crate::player::Msg;
use crate::ui;

/// Main terminal event loop: applies media notifications, draws, and handles
/// input. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    media: &mut dyn MediaElement,
    media_events: &Receiver<MediaEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(ev) = media_events.try_recv() {
            app.dispatch(Msg::Media(ev), media);
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, media) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Returns `true` when the user asked to quit.
fn handle_key_event(key: KeyEvent, app: &mut App, media: &mut dyn MediaElement) -> bool {
    if app.prompt.is_some() {
        match key.code {
            KeyCode::Esc => app.cancel_prompt(),
            KeyCode::Backspace => app.pop_prompt_char(),
            KeyCode::Enter => {
                app.submit_prompt(media);
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    app.push_prompt_char(c);
                }
            }
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('p') | KeyCode::Char(' ') => app.dispatch(Msg::PlayPause, media),
        KeyCode::Char('l') | KeyCode::Right => app.dispatch(Msg::Next, media),
        KeyCode::Char('h') | KeyCode::Left => app.dispatch(Msg::Previous, media),
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Enter => {
            if app.player.has_tracks() {
                let cursor = app.cursor;
                if cursor != app.player.current_index {
                    app.dispatch(Msg::Select(cursor), media);
                }
                if !app.player.is_playing {
                    app.dispatch(Msg::PlayPause, media);
                }
            }
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            let cursor = app.cursor;
            app.dispatch(Msg::Remove(cursor), media);
        }
        KeyCode::Char('a') => app.open_prompt(),
        _ => {}
    }

    false
}
