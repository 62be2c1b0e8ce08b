use std::env;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::logging;
use crate::media::RodioElement;

mod event_loop;
mod settings;
mod startup;

type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_problem) = settings::load_settings();

    match logging::init(&settings.log) {
        Ok(path) => {
            log::info!("playdeck starting, logging to {}", path.display());
            if let Some(e) = &config_problem {
                log::warn!("{e}; using defaults");
            }
        }
        Err(e) => {
            eprintln!("playdeck: logging disabled: {e}");
            if let Some(e) = &config_problem {
                eprintln!("playdeck: {e}; using defaults");
            }
        }
    }

    let args: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();

    let (mut media, media_events) = RodioElement::new(settings.audio.clone());
    let mut app = App::new(&settings);
    startup::add_initial_paths(&mut app, &mut media, &args);

    let mut terminal = match setup_terminal() {
        Ok(t) => t,
        Err(e) => {
            media.quit_softly(Duration::ZERO);
            return Err(e.into());
        }
    };

    let run_result =
        event_loop::run(&mut terminal, &settings, &mut app, &mut media, &media_events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    media.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
    let registry = app.registry().clone();
    drop(app);
    log::info!(
        "shut down, {} source(s) still registered",
        registry.live_count()
    );

    run_result
}

/// Enter raw mode and the alternate screen, undoing raw mode if the rest fails.
fn setup_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    let attempt = (|| {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        Terminal::new(CrosstermBackend::new(stdout))
    })();
    undo_on_err(attempt, restore_terminal)
}

fn restore_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    if let Err(e) = disable_raw_mode() {
        log::warn!("failed to leave raw mode: {e}");
    }
}

/// Run `undo` when `attempt` failed, passing the result through.
fn undo_on_err<T, E>(attempt: Result<T, E>, undo: impl FnOnce()) -> Result<T, E> {
    if attempt.is_err() {
        undo();
    }
    attempt
}
