//! playdeck: a terminal playlist player.
//!
//! Usage: `playdeck [PATH...]` where each path is an audio file or a folder
//! of them. More can be added at runtime with `a`.

mod app;
mod config;
mod logging;
mod media;
mod player;
mod playlist;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
