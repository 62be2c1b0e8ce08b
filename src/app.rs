//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and wraps the player with the
//! cursor and add-prompt state the terminal needs.

mod model;

pub use model::*;
